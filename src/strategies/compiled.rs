//! Run-time compiled cloner
//!
//! Synthesizes a clone routine for the sample model as source text, compiles
//! it to native code on first use, and calls the finalized function directly
//! on every later call.

use crate::codegen;
use crate::error::{CloneError, CloneResult};
use crate::reflect::{Kind, KindRegistry, Reflect};
use crate::strategy::CloneStrategy;
use cranelift_jit::JITModule;
use std::any::TypeId;
use std::fmt;

/// Clone routine for the customer graph, one record literal per level
pub const CUSTOMER_ROUTINE: &str = r#"
// Rebuilds every node; empty references stay empty.
fn clone_customer(src: Customer) -> Customer {
    Customer {
        id: src.id,
        first_name: src.first_name,
        last_name: src.last_name,
        address: Address {
            street: src.address.street,
            city: src.address.city,
            state: State {
                name: src.address.state.name,
                code: src.address.state.code,
            },
        },
    }
}
"#;

/// Native signature of a compiled routine: source node in, new node out
type RoutineFn = unsafe extern "C" fn(*const u8) -> *mut u8;

/// A finalized routine and the JIT module that owns its code
pub struct CompiledRoutine {
    module: Option<JITModule>,
    entry: *const u8,
    kind: &'static Kind,
    /// Rust type behind `kind` that the runtime helpers dereference
    node_type: TypeId,
}

impl CompiledRoutine {
    pub(crate) fn new(module: JITModule, entry: *const u8, kind: &'static Kind, node_type: TypeId) -> Self {
        Self {
            module: Some(module),
            entry,
            kind,
            node_type,
        }
    }

    /// Kind the routine accepts and returns
    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    /// Run the routine on `source`
    ///
    /// The routine's helpers read and allocate one concrete Rust type. The
    /// pointer casts below are only sound when `T` is that exact type, so a
    /// matching kind name alone is not accepted.
    pub fn invoke<T: Reflect>(&self, source: &T) -> CloneResult<T> {
        let found = source.kind();
        if found.name != self.kind.name {
            return Err(CloneError::KindMismatch {
                expected: self.kind.name.to_string(),
                found: found.name.to_string(),
            });
        }
        if source.as_any().type_id() != self.node_type {
            return Err(CloneError::KindMismatch {
                expected: self.kind.name.to_string(),
                found: std::any::type_name::<T>().to_string(),
            });
        }

        let routine = unsafe { std::mem::transmute::<*const u8, RoutineFn>(self.entry) };
        let clone = unsafe { routine(source as *const T as *const u8) } as *mut T;
        if clone.is_null() {
            return Err(CloneError::CompilationError(format!(
                "routine for '{}' produced no node",
                self.kind.name
            )));
        }
        Ok(*unsafe { Box::from_raw(clone) })
    }
}

impl fmt::Debug for CompiledRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRoutine")
            .field("kind", &self.kind.name)
            .field("entry", &self.entry)
            .field("node_type", &self.node_type)
            .finish()
    }
}

impl Drop for CompiledRoutine {
    fn drop(&mut self) {
        if let Some(module) = self.module.take() {
            // No caller can hold the entry pointer past this point
            unsafe { module.free_memory() };
        }
    }
}

/// Clones through a routine compiled on the first call
pub struct CompiledCloner {
    registry: KindRegistry,
    source: String,
    /// Outcome of the one compilation attempt; a failure is kept, not retried
    routine: Option<CloneResult<CompiledRoutine>>,
}

impl CompiledCloner {
    /// Cloner for the sample model using [`CUSTOMER_ROUTINE`]
    pub fn new(registry: KindRegistry) -> Self {
        Self::with_source(registry, CUSTOMER_ROUTINE)
    }

    /// Cloner for an arbitrary routine text
    pub fn with_source(registry: KindRegistry, source: impl Into<String>) -> Self {
        Self {
            registry,
            source: source.into(),
            routine: None,
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self.routine, Some(Ok(_)))
    }

    /// Whether the one compilation attempt has already failed
    pub fn has_failed(&self) -> bool {
        matches!(self.routine, Some(Err(_)))
    }

    /// Compile the routine on the first call. Later calls return the same
    /// routine, or the same error if compilation failed.
    pub fn routine(&mut self) -> CloneResult<&CompiledRoutine> {
        let (source, registry) = (&self.source, &self.registry);
        self.routine
            .get_or_insert_with(|| {
                log::debug!("Compiling clone routine ({} bytes of source)", source.len());
                codegen::compile(source, registry)
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl<T: Reflect> CloneStrategy<T> for CompiledCloner {
    fn name(&self) -> &str {
        "Compiled routine"
    }

    fn clone_graph(&mut self, source: &T) -> CloneResult<T> {
        self.routine()?.invoke(source)
    }
}
