//! Abstract Syntax Tree for clone routines
//!
//! A routine takes one node and rebuilds it as a nested record literal:
//!
//! ```text
//! fn clone_state(src: State) -> State {
//!     State { name: src.name, code: src.code }
//! }
//! ```

use crate::lexer::Position;
use std::fmt;

/// A complete clone routine
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub name: String,
    /// Name of the single parameter
    pub param: String,
    /// Kind of the parameter
    pub param_kind: String,
    pub return_kind: String,
    pub body: Record,
    pub position: Position,
}

/// `Kind { field: value, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: String,
    pub fields: Vec<FieldInit>,
    pub position: Position,
}

/// One `field: value` entry of a record literal
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInit {
    pub name: String,
    pub value: FieldExpr,
    pub position: Position,
}

/// Right-hand side of a field initializer
#[derive(Debug, Clone, PartialEq)]
pub enum FieldExpr {
    /// Read from the source graph
    Path(Path),
    /// Build a nested node
    Record(Record),
    /// Leave the reference empty
    Null,
}

/// `root.segment.segment...`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub root: String,
    pub segments: Vec<String>,
    pub position: Position,
}

impl Path {
    /// Segments leading up to the final field
    pub fn parent(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// The field the path finally reads
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            write!(f, ".{}", segment)?;
        }
        Ok(())
    }
}

impl Record {
    /// Count record literals in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .fields
            .iter()
            .map(|field| match &field.value {
                FieldExpr::Record(record) => record.node_count(),
                _ => 0,
            })
            .sum::<usize>()
    }
}
