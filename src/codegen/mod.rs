//! Cranelift JIT backend for clone routines
//!
//! Architecture:
//! - `check`: validates a parsed routine against the kind registry
//! - `context`: lowering state and helper imports
//! - `runtime`: `extern "C"` helpers the generated code calls
//!
//! A routine compiles to a single native function `(src) -> clone` taking and
//! returning node pointers.

pub mod check;
pub mod context;
pub mod runtime;

pub use context::LoweringContext;

use crate::error::{CloneError, CloneResult};
use crate::parser::Parser;
use crate::reflect::KindRegistry;
use crate::strategies::compiled::CompiledRoutine;

use cranelift::prelude::{AbiParam, InstBuilder};
use cranelift_codegen::ir::UserFuncName;
use cranelift_codegen::settings::{self, Configurable};
use cranelift_frontend::{FunctionBuilder, FunctionBuilderContext};
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{Linkage, Module};
use target_lexicon::Triple;

/// Compiles routine source text to native code
pub struct RoutineCompiler<'r> {
    registry: &'r KindRegistry,
}

impl<'r> RoutineCompiler<'r> {
    pub fn new(registry: &'r KindRegistry) -> Self {
        Self { registry }
    }

    /// Parse, check, lower and finalize a routine
    pub fn compile(&self, source: &str) -> CloneResult<CompiledRoutine> {
        let routine = Parser::new(source)?.parse_routine()?;
        log::debug!("Parsed routine '{}' ({} nodes)", routine.name, routine.body.node_count());

        let kind = check::check_routine(&routine, self.registry)?;

        let mut module = Self::create_module()?;
        let mut sig = module.make_signature();
        let pointer_type = module.target_config().pointer_type();
        sig.params.push(AbiParam::new(pointer_type));
        sig.returns.push(AbiParam::new(pointer_type));

        let func_id = module.declare_function(&routine.name, Linkage::Local, &sig)?;
        let mut ctx = module.make_context();
        ctx.func.signature = sig;
        ctx.func.name = UserFuncName::user(0, func_id.as_u32());

        let mut builder_context = FunctionBuilderContext::new();
        let helper_count = {
            let mut builder = FunctionBuilder::new(&mut ctx.func, &mut builder_context);
            let entry = builder.create_block();
            builder.append_block_params_for_function_params(entry);
            builder.switch_to_block(entry);
            builder.seal_block(entry);
            let src = builder.block_params(entry)[0];

            let mut lowering = LoweringContext::new(&mut module, self.registry);
            let clone = lowering.lower_record(&mut builder, &routine.body, kind, src)?;
            builder.ins().return_(&[clone]);
            builder.finalize();
            lowering.helper_count()
        };

        let node_type = runtime::node_type(kind.name).ok_or_else(|| {
            CloneError::CompilationError(format!("No runtime helpers for kind '{}'", kind.name))
        })?;

        module
            .define_function(func_id, &mut ctx)
            .map_err(|e| CloneError::CompilationError(format!("Failed to define '{}': {}", routine.name, e)))?;
        module.clear_context(&mut ctx);
        module.finalize_definitions()?;
        let entry = module.get_finalized_function(func_id);

        log::debug!(
            "Compiled routine '{}' for kind {} using {} runtime helpers",
            routine.name,
            kind.name,
            helper_count
        );
        Ok(CompiledRoutine::new(module, entry, kind, node_type))
    }

    /// Create a JIT module for the host with every runtime helper registered
    fn create_module() -> CloneResult<JITModule> {
        let mut flag_builder = settings::builder();
        flag_builder
            .set("use_colocated_libcalls", "false")
            .map_err(|e| CloneError::CompilationError(format!("Failed to set compiler flag: {}", e)))?;
        flag_builder
            .set("is_pic", "false")
            .map_err(|e| CloneError::CompilationError(format!("Failed to set compiler flag: {}", e)))?;
        flag_builder
            .set("opt_level", "speed")
            .map_err(|e| CloneError::CompilationError(format!("Failed to set compiler flag: {}", e)))?;

        let isa_builder = cranelift_codegen::isa::lookup(Triple::host())
            .map_err(|e| CloneError::CompilationError(format!("Failed to create ISA: {}", e)))?;
        let isa = isa_builder
            .finish(settings::Flags::new(flag_builder))
            .map_err(|e| CloneError::CompilationError(format!("Failed to finalize ISA: {}", e)))?;

        let mut builder = JITBuilder::with_isa(isa, cranelift_module::default_libcall_names());
        for (name, address) in runtime::symbols() {
            builder.symbol(name, address);
        }
        Ok(JITModule::new(builder))
    }
}

/// Compile `source` against `registry`
pub fn compile(source: &str, registry: &KindRegistry) -> CloneResult<CompiledRoutine> {
    RoutineCompiler::new(registry).compile(source)
}
