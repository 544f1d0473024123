//! Plan-composing cloner
//!
//! For each kind, a copy plan is assembled once from the kind's layout and
//! cached: the resolved constructor plus one step per field, where reference
//! steps point at the child kind's own plan. Later clones run the cached plan
//! without looking at the layout again.
//!
//! Planning recurses through the kind graph, so a kind that (transitively)
//! references itself makes planning recurse without bound.

use crate::error::{CloneError, CloneResult};
use crate::reflect::{downcast, FieldRef, FieldType, FieldValue, Kind, KindRegistry, Reflect};
use crate::strategy::CloneStrategy;
use std::collections::HashMap;
use std::rc::Rc;

enum Step {
    Scalar(&'static str),
    Child(&'static str, Rc<CopyPlan>),
}

/// Compiled copy procedure for one kind
pub struct CopyPlan {
    kind: &'static Kind,
    construct: fn() -> Box<dyn Reflect>,
    steps: Vec<Step>,
}

impl CopyPlan {
    /// Run the plan against a node of the plan's kind
    pub fn run(&self, source: &dyn Reflect) -> CloneResult<Box<dyn Reflect>> {
        if source.kind().name != self.kind.name {
            return Err(CloneError::KindMismatch {
                expected: self.kind.name.to_string(),
                found: source.kind().name.to_string(),
            });
        }

        let mut clone = (self.construct)();
        for step in &self.steps {
            let (name, value) = match step {
                Step::Scalar(name) => {
                    let mut value = None;
                    source.visit_field(name, &mut |field_ref| {
                        value = field_ref.to_scalar();
                        Ok(())
                    })?;
                    (*name, value)
                }
                Step::Child(name, plan) => {
                    let mut value = None;
                    source.visit_field(name, &mut |field_ref| {
                        value = match field_ref {
                            FieldRef::Node(Some(child)) => Some(FieldValue::Node(Some(plan.run(child)?))),
                            FieldRef::Node(None) => Some(FieldValue::Node(None)),
                            _ => None,
                        };
                        Ok(())
                    })?;
                    (*name, value)
                }
            };
            let value = value.ok_or_else(|| self.kind.mismatch(name))?;
            clone.set_field(name, value)?;
        }
        Ok(clone)
    }
}

/// Clone strategy that builds and caches one [`CopyPlan`] per kind
pub struct ComposedCloner {
    registry: KindRegistry,
    plans: HashMap<&'static str, Rc<CopyPlan>>,
}

impl ComposedCloner {
    pub fn new(registry: KindRegistry) -> Self {
        Self {
            registry,
            plans: HashMap::new(),
        }
    }

    /// Number of kinds planned so far
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    /// Fetch the cached plan for `kind`, building it on first request
    pub fn plan_for(&mut self, kind: &'static Kind) -> CloneResult<Rc<CopyPlan>> {
        if let Some(plan) = self.plans.get(kind.name) {
            return Ok(Rc::clone(plan));
        }

        let construct = kind.constructor.ok_or_else(|| CloneError::NotConstructible {
            kind: kind.name.to_string(),
        })?;

        let mut steps = Vec::with_capacity(kind.fields.len());
        for field in kind.fields {
            let step = match field.ty {
                FieldType::Text | FieldType::Integer | FieldType::Boolean => Step::Scalar(field.name),
                FieldType::Node(child_name) => {
                    let child_kind = self.registry.lookup(child_name).ok_or_else(|| {
                        CloneError::NotSupportedKind {
                            kind: kind.name.to_string(),
                            field: field.name.to_string(),
                            type_name: child_name.to_string(),
                        }
                    })?;
                    Step::Child(field.name, self.plan_for(child_kind)?)
                }
                FieldType::Opaque(type_name) => {
                    return Err(CloneError::NotSupportedKind {
                        kind: kind.name.to_string(),
                        field: field.name.to_string(),
                        type_name: type_name.to_string(),
                    })
                }
            };
            steps.push(step);
        }

        log::debug!("planned {} with {} steps", kind.name, steps.len());
        let plan = Rc::new(CopyPlan {
            kind,
            construct,
            steps,
        });
        self.plans.insert(kind.name, Rc::clone(&plan));
        Ok(plan)
    }
}

impl<T: Reflect> CloneStrategy<T> for ComposedCloner {
    fn name(&self) -> &str {
        "Composed plan"
    }

    fn clone_graph(&mut self, source: &T) -> CloneResult<T> {
        let plan = self.plan_for(source.kind())?;
        downcast::<T>(plan.run(source)?)
    }
}
