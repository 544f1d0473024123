//! Deep duplication of in-memory node graphs by interchangeable strategies,
//! with a harness that times and validates each one.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod harness;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod profiling;
pub mod reflect;
pub mod strategies;
pub mod strategy;

pub use error::{CloneError, CloneResult};
pub use harness::{BenchmarkRun, DeepVerdict, Harness, HarnessConfig, StrategyResult};
pub use model::{create_sample_graph, kind_registry, node, Address, Customer, NodeRef, State};
pub use reflect::{FieldInfo, FieldType, Kind, KindRegistry, Reflect};
pub use strategies::standard_lineup;
pub use strategy::CloneStrategy;
