//! Lowering state for one routine
//!
//! Tracks which runtime helpers have been imported into the function being
//! built so every helper is declared once per routine.

use super::runtime;
use crate::ast::{FieldExpr, Record};
use crate::error::{CloneError, CloneResult};
use crate::reflect::{FieldType, Kind, KindRegistry};

use cranelift::prelude::{AbiParam, InstBuilder, Type, Value};
use cranelift_codegen::ir::FuncRef;
use cranelift_frontend::FunctionBuilder;
use cranelift_jit::JITModule;
use cranelift_module::{Linkage, Module};
use std::collections::HashMap;

/// Compilation context for lowering a checked routine
pub struct LoweringContext<'m> {
    module: &'m mut JITModule,
    registry: &'m KindRegistry,
    pointer_type: Type,
    /// Helper name -> reference valid inside the current function
    helpers: HashMap<String, FuncRef>,
}

impl<'m> LoweringContext<'m> {
    pub fn new(module: &'m mut JITModule, registry: &'m KindRegistry) -> Self {
        let pointer_type = module.target_config().pointer_type();
        Self {
            module,
            registry,
            pointer_type,
            helpers: HashMap::new(),
        }
    }

    /// Number of distinct helpers imported so far
    pub fn helper_count(&self) -> usize {
        self.helpers.len()
    }

    /// Import a helper taking `params` pointers, returning a pointer if `returns`
    fn helper(
        &mut self,
        builder: &mut FunctionBuilder,
        name: &str,
        params: usize,
        returns: bool,
    ) -> CloneResult<FuncRef> {
        if let Some(func_ref) = self.helpers.get(name) {
            return Ok(*func_ref);
        }
        if runtime::lookup(name).is_none() {
            return Err(CloneError::CompilationError(format!(
                "no runtime helper named '{}'",
                name
            )));
        }

        let mut sig = self.module.make_signature();
        for _ in 0..params {
            sig.params.push(AbiParam::new(self.pointer_type));
        }
        if returns {
            sig.returns.push(AbiParam::new(self.pointer_type));
        }

        let func_id = self.module.declare_function(name, Linkage::Import, &sig)?;
        let func_ref = self.module.declare_func_in_func(func_id, builder.func);
        self.helpers.insert(name.to_string(), func_ref);
        log::trace!("Imported runtime helper {}", name);
        Ok(func_ref)
    }

    fn call(
        &mut self,
        builder: &mut FunctionBuilder,
        name: &str,
        args: &[Value],
        returns: bool,
    ) -> CloneResult<Option<Value>> {
        let func_ref = self.helper(builder, name, args.len(), returns)?;
        let inst = builder.ins().call(func_ref, args);
        Ok(builder.inst_results(inst).first().copied())
    }

    fn call_value(&mut self, builder: &mut FunctionBuilder, name: &str, args: &[Value]) -> CloneResult<Value> {
        self.call(builder, name, args, true)?.ok_or_else(|| {
            CloneError::CompilationError(format!("runtime helper '{}' returned no value", name))
        })
    }

    /// Emit code building `record` from the node pointer `src`; yields the new node
    pub fn lower_record(
        &mut self,
        builder: &mut FunctionBuilder,
        record: &Record,
        kind: &'static Kind,
        src: Value,
    ) -> CloneResult<Value> {
        let dst = self.call_value(builder, &runtime::new_helper(kind.name), &[])?;

        for init in &record.fields {
            let setter = runtime::set_helper(kind.name, &init.name);
            match &init.value {
                FieldExpr::Path(path) => {
                    let leaf = path.leaf().ok_or_else(|| {
                        CloneError::CompilationError(format!("path '{}' names no field", path))
                    })?;
                    let value = self.call_value(builder, &runtime::get_helper(kind.name, leaf), &[src])?;
                    self.call(builder, &setter, &[dst, value], false)?;
                }
                FieldExpr::Null => {
                    let null = builder.ins().iconst(self.pointer_type, 0);
                    self.call(builder, &setter, &[dst, null], false)?;
                }
                FieldExpr::Record(child) => {
                    let child_kind = self.child_kind(kind, &init.name)?;
                    let child_src =
                        self.call_value(builder, &runtime::get_helper(kind.name, &init.name), &[src])?;

                    // An empty source reference stays empty in the clone
                    let build_block = builder.create_block();
                    let merge_block = builder.create_block();
                    builder.ins().brif(child_src, build_block, &[], merge_block, &[]);

                    builder.switch_to_block(build_block);
                    builder.seal_block(build_block);
                    let child_dst = self.lower_record(builder, child, child_kind, child_src)?;
                    self.call(builder, &setter, &[dst, child_dst], false)?;
                    builder.ins().jump(merge_block, &[]);

                    builder.switch_to_block(merge_block);
                    builder.seal_block(merge_block);
                }
            }
        }

        Ok(dst)
    }

    fn child_kind(&self, kind: &'static Kind, field: &str) -> CloneResult<&'static Kind> {
        match kind.field(field).map(|info| info.ty) {
            Some(FieldType::Node(name)) => self.registry.lookup(name).ok_or_else(|| {
                CloneError::CompilationError(format!("unknown kind '{}'", name))
            }),
            _ => Err(CloneError::CompilationError(format!(
                "field '{}.{}' is not a reference",
                kind.name, field
            ))),
        }
    }
}
