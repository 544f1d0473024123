//! Explicit recursive copy
//!
//! Each kind supplies its own [`DeepClone`]: a member-wise (shallow) copy of
//! itself, after which every reference field is replaced by the deep clone of
//! the node it points to. There is no generic fallback. A kind that forgets to
//! fix up one of its reference fields leaves that node shared between source
//! and clone; `find_aliases` in the reflection layer is how such gaps show up.

use crate::error::CloneResult;
use crate::model::{node, Address, Customer, NodeRef, State};
use crate::strategy::CloneStrategy;

/// Kind-supplied deep copy: shallow-copy self, then deep-copy the children
pub trait DeepClone: Clone {
    fn deep_clone(&self) -> Self;
}

/// Replace a shallow-copied reference with an independent deep copy
pub fn deep_clone_child<T: DeepClone>(child: &Option<NodeRef<T>>) -> Option<NodeRef<T>> {
    child.as_ref().map(|child| node(child.borrow().deep_clone()))
}

impl DeepClone for Customer {
    fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.address = deep_clone_child(&self.address);
        copy
    }
}

impl DeepClone for Address {
    fn deep_clone(&self) -> Self {
        let mut copy = self.clone();
        copy.state = deep_clone_child(&self.state);
        copy
    }
}

impl DeepClone for State {
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

/// Strategy adapter over [`DeepClone`]
#[derive(Debug, Default)]
pub struct RecursiveCopy;

impl RecursiveCopy {
    pub fn new() -> Self {
        Self
    }
}

impl<T: DeepClone> CloneStrategy<T> for RecursiveCopy {
    fn name(&self) -> &str {
        "Recursive copy"
    }

    fn clone_graph(&mut self, source: &T) -> CloneResult<T> {
        Ok(source.deep_clone())
    }
}
