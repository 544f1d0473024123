//! Structural (reflective) cloner
//!
//! Duplicates any node graph by walking it through the [`Reflect`] layer:
//! allocate an empty node of the source's kind, copy scalar fields by value,
//! and recurse into every non-null reference field.
//!
//! There is no cycle detection. A graph whose references loop back on
//! themselves recurses until the stack is exhausted.

use crate::error::{CloneError, CloneResult};
use crate::reflect::{downcast, FieldRef, FieldType, FieldValue, Reflect};
use crate::strategy::CloneStrategy;

/// Clone a type-erased node
pub fn clone_node(source: &dyn Reflect) -> CloneResult<Box<dyn Reflect>> {
    let kind = source.kind();
    let mut clone = kind.construct()?;

    for field in kind.fields {
        if let FieldType::Opaque(type_name) = field.ty {
            return Err(CloneError::NotSupportedKind {
                kind: kind.name.to_string(),
                field: field.name.to_string(),
                type_name: type_name.to_string(),
            });
        }

        let mut value = None;
        source.visit_field(field.name, &mut |field_ref| {
            value = Some(match field_ref {
                FieldRef::Node(None) => FieldValue::Node(None),
                FieldRef::Node(Some(child)) => FieldValue::Node(Some(clone_node(child)?)),
                scalar => scalar.to_scalar().ok_or_else(|| kind.mismatch(field.name))?,
            });
            Ok(())
        })?;

        if let Some(value) = value {
            clone.set_field(field.name, value)?;
        }
    }

    Ok(clone)
}

/// Reflection-driven clone strategy
#[derive(Debug, Default)]
pub struct ReflectiveCloner;

impl ReflectiveCloner {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Reflect> CloneStrategy<T> for ReflectiveCloner {
    fn name(&self) -> &str {
        "Reflection"
    }

    fn clone_graph(&mut self, source: &T) -> CloneResult<T> {
        downcast::<T>(clone_node(source)?)
    }
}
