//! Run-time introspection over node graphs
//!
//! Every kind in a clonable graph describes itself with a `'static` [`Kind`]
//! (name, field layout, construction path, encoding eligibility) and
//! implements [`Reflect`] so generic code can read and write its fields
//! without compile-time knowledge of the concrete type.
//!
//! Architecture:
//! - `Kind` / `FieldInfo` / `FieldType`: static layout descriptors
//! - `FieldRef`: a borrowed field value lent to a visitor callback
//! - `FieldValue`: an owned field value written back with `set_field`
//! - `KindRegistry`: name-based kind lookup, built once at startup

use crate::error::{CloneError, CloneResult};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
    /// Reference to a nested node of the named kind
    Node(&'static str),
    /// A value the reflection layer cannot look inside (handles, resources)
    Opaque(&'static str),
}

impl FieldType {
    /// Scalars are copied by value; no sharing is possible
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Integer | FieldType::Boolean)
    }
}

/// A single writable field of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldInfo {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Static description of a node kind
pub struct Kind {
    /// Kind name, unique within a registry
    pub name: &'static str,
    /// Writable fields in declaration order
    pub fields: &'static [FieldInfo],
    /// No-argument construction path, if the kind has one
    pub constructor: Option<fn() -> Box<dyn Reflect>>,
    /// Opt-in marker required by the round-trip codecs
    pub encodable: bool,
}

impl Kind {
    /// Allocate a new, empty instance of this kind
    pub fn construct(&self) -> CloneResult<Box<dyn Reflect>> {
        match self.constructor {
            Some(construct) => Ok(construct()),
            None => Err(CloneError::NotConstructible {
                kind: self.name.to_string(),
            }),
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Error for a write the kind cannot accept
    pub fn mismatch(&self, field: &str) -> CloneError {
        CloneError::FieldMismatch {
            kind: self.name.to_string(),
            field: field.to_string(),
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("constructible", &self.constructor.is_some())
            .field("encodable", &self.encodable)
            .finish()
    }
}

/// Borrowed view of a field value
pub enum FieldRef<'a> {
    Text(&'a str),
    Integer(i64),
    Boolean(bool),
    Node(Option<&'a dyn Reflect>),
}

/// Owned field value, written with [`Reflect::set_field`]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Node(Option<Box<dyn Reflect>>),
}

impl FieldValue {
    /// Unwrap a text value destined for `kind.field`
    pub fn into_text(self, kind: &Kind, field: &str) -> CloneResult<String> {
        match self {
            FieldValue::Text(text) => Ok(text),
            _ => Err(kind.mismatch(field)),
        }
    }

    /// Unwrap a node value and recover its concrete type
    pub fn into_node<T: Reflect>(self, kind: &Kind, field: &str) -> CloneResult<Option<T>> {
        match self {
            FieldValue::Node(None) => Ok(None),
            FieldValue::Node(Some(node)) => downcast::<T>(node).map(Some),
            _ => Err(kind.mismatch(field)),
        }
    }
}

impl<'a> FieldRef<'a> {
    /// Copy a scalar into an owned value. Node references are not copied here.
    pub fn to_scalar(&self) -> Option<FieldValue> {
        match self {
            FieldRef::Text(text) => Some(FieldValue::Text((*text).to_string())),
            FieldRef::Integer(value) => Some(FieldValue::Integer(*value)),
            FieldRef::Boolean(value) => Some(FieldValue::Boolean(*value)),
            FieldRef::Node(_) => None,
        }
    }
}

/// Callback receiving a borrowed field
pub type FieldVisitor<'v> = dyn FnMut(FieldRef<'_>) -> CloneResult<()> + 'v;

/// Run-time introspection capability implemented by every node kind
pub trait Reflect: Any {
    /// Static layout of this node's kind
    fn kind(&self) -> &'static Kind;

    /// Lend the named field to `visit`.
    ///
    /// Reference fields stay borrowed for the duration of the callback.
    fn visit_field(&self, name: &str, visit: &mut FieldVisitor<'_>) -> CloneResult<()>;

    /// Overwrite the named field
    fn set_field(&mut self, name: &str, value: FieldValue) -> CloneResult<()>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Recover a concrete node from a type-erased one
pub fn downcast<T: Reflect>(node: Box<dyn Reflect>) -> CloneResult<T> {
    let found = node.kind().name;
    node.into_any()
        .downcast::<T>()
        .map(|node| *node)
        .map_err(|_| CloneError::KindMismatch {
            expected: std::any::type_name::<T>().to_string(),
            found: found.to_string(),
        })
}

/// Address of the node's data, for identity comparisons
fn node_addr(node: &dyn Reflect) -> *const u8 {
    node as *const dyn Reflect as *const u8
}

/// Walk `source` and `clone` in lockstep and return the dotted path of every
/// reference field whose clone node is the very allocation of the source node.
pub fn find_aliases(source: &dyn Reflect, clone: &dyn Reflect) -> CloneResult<Vec<String>> {
    let mut aliases = Vec::new();
    collect_aliases(source, clone, source.kind().name, &mut aliases)?;
    Ok(aliases)
}

fn collect_aliases(
    source: &dyn Reflect,
    clone: &dyn Reflect,
    path: &str,
    aliases: &mut Vec<String>,
) -> CloneResult<()> {
    let kind = source.kind();
    if kind.name != clone.kind().name {
        return Err(CloneError::KindMismatch {
            expected: kind.name.to_string(),
            found: clone.kind().name.to_string(),
        });
    }

    for field in kind.fields {
        if !matches!(field.ty, FieldType::Node(_)) {
            continue;
        }
        let field_path = format!("{}.{}", path, field.name);
        source.visit_field(field.name, &mut |source_ref| {
            let FieldRef::Node(Some(source_child)) = source_ref else {
                return Ok(());
            };
            clone.visit_field(field.name, &mut |clone_ref| {
                let FieldRef::Node(Some(clone_child)) = clone_ref else {
                    return Ok(());
                };
                if node_addr(source_child) == node_addr(clone_child) {
                    aliases.push(field_path.clone());
                }
                collect_aliases(source_child, clone_child, &field_path, aliases)
            })
        })?;
    }
    Ok(())
}

/// Name-based lookup of the kinds a process knows about.
///
/// Built explicitly at startup and handed to whatever needs it; there is no
/// global instance.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: HashMap<&'static str, &'static Kind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind, replacing any previous kind of the same name
    pub fn register(&mut self, kind: &'static Kind) {
        self.kinds.insert(kind.name, kind);
    }

    pub fn with_kinds(kinds: &[&'static Kind]) -> Self {
        let mut registry = Self::new();
        for kind in kinds {
            registry.register(kind);
        }
        registry
    }

    pub fn lookup(&self, name: &str) -> Option<&'static Kind> {
        self.kinds.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
