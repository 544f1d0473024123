//! Correctness checks for a clone
//!
//! `shallow_check` is the benchmark's pass/fail rule: one designated scalar
//! per level of the graph must match the source. `deep_check` goes further and
//! also proves the clone is independent of its source.

use crate::error::CloneResult;
use crate::model::Customer;
use crate::reflect::find_aliases;
use std::fmt;

/// Last name, address city and state code, `None` where a level is missing
fn designated_fields(customer: &Customer) -> [Option<String>; 3] {
    let address = customer.address.as_ref().map(|address| address.borrow());
    let city = address.as_ref().map(|address| address.city.clone());
    let code = address
        .as_ref()
        .and_then(|address| address.state.as_ref().map(|state| state.borrow().code.clone()));
    [Some(customer.last_name.clone()), city, code]
}

/// Compare the three designated fields; a level missing on both sides matches
pub fn shallow_check(source: &Customer, clone: &Customer) -> bool {
    designated_fields(source) == designated_fields(clone)
}

/// Result of a full structural validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepVerdict {
    /// Every field of every node compares equal
    pub equal: bool,
    /// Reference fields whose clone node is the source node itself
    pub aliases: Vec<String>,
    /// Writing into the clone's nested nodes changed the source
    pub mutation_leaked: bool,
}

impl DeepVerdict {
    pub fn passed(&self) -> bool {
        self.equal && self.aliases.is_empty() && !self.mutation_leaked
    }
}

impl fmt::Display for DeepVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "deep copy verified");
        }
        let mut problems = Vec::new();
        if !self.equal {
            problems.push("values differ".to_string());
        }
        if !self.aliases.is_empty() {
            problems.push(format!("shared nodes: {}", self.aliases.join(", ")));
        }
        if self.mutation_leaked {
            problems.push("mutation reached the source".to_string());
        }
        write!(f, "{}", problems.join("; "))
    }
}

/// Full equality, alias detection and a mutation probe
///
/// The probe writes marker values into the clone's nested nodes, reads the
/// source, then restores the clone.
pub fn deep_check(source: &Customer, clone: &Customer) -> CloneResult<DeepVerdict> {
    let equal = source == clone;
    let aliases = find_aliases(source, clone)?;
    let mutation_leaked = probe_mutation(source, clone);
    Ok(DeepVerdict {
        equal,
        aliases,
        mutation_leaked,
    })
}

const PROBE: &str = "<probe>";

fn probe_mutation(source: &Customer, clone: &Customer) -> bool {
    let Some(address) = clone.address.as_ref() else {
        return false;
    };

    let saved_city = std::mem::replace(&mut address.borrow_mut().city, PROBE.to_string());
    let state = address.borrow().state.clone();
    let saved_code = state
        .as_ref()
        .map(|state| std::mem::replace(&mut state.borrow_mut().code, PROBE.to_string()));

    let leaked = designated_fields(source)
        .iter()
        .flatten()
        .any(|value| value == PROBE);

    address.borrow_mut().city = saved_city;
    if let (Some(state), Some(code)) = (state, saved_code) {
        state.borrow_mut().code = code;
    }
    leaked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{create_sample_graph, node, State};
    use crate::strategies::DeepClone;

    #[test]
    fn test_shallow_check_matches_identical_graphs() {
        let source = create_sample_graph();
        assert!(shallow_check(&source, &source.deep_clone()));
    }

    #[test]
    fn test_shallow_check_detects_each_level() {
        let source = create_sample_graph();

        let mut clone = source.deep_clone();
        clone.last_name = "Six".to_string();
        assert!(!shallow_check(&source, &clone));

        let clone = source.deep_clone();
        clone.address.as_ref().unwrap().borrow_mut().city = "Salem".to_string();
        assert!(!shallow_check(&source, &clone));

        let clone = source.deep_clone();
        let address = clone.address.as_ref().unwrap();
        address.borrow_mut().state = Some(node(State {
            name: "Washington".to_string(),
            code: "WA".to_string(),
        }));
        assert!(!shallow_check(&source, &clone));

        let mut clone = source.deep_clone();
        clone.address = None;
        assert!(!shallow_check(&source, &clone));
    }

    #[test]
    fn test_deep_check_passes_independent_copy() {
        let source = create_sample_graph();
        let verdict = deep_check(&source, &source.deep_clone()).unwrap();
        assert!(verdict.passed(), "{}", verdict);
        assert_eq!(verdict.to_string(), "deep copy verified");
    }

    #[test]
    fn test_deep_check_flags_shallow_copy() {
        let source = create_sample_graph();
        let shallow = source.clone();
        let verdict = deep_check(&source, &shallow).unwrap();

        assert!(verdict.equal);
        assert_eq!(verdict.aliases, vec!["Customer.address".to_string(), "Customer.address.state".to_string()]);
        assert!(verdict.mutation_leaked);
        assert!(!verdict.passed());

        // The probe restores what it wrote
        assert_eq!(source, create_sample_graph());
    }
}
