//! Clone strategies
//!
//! - `encoding`: round-trip through JSON text, a JSON tree, or a tagged binary format
//! - `recursive`: kind-supplied explicit deep copy
//! - `reflective`: field-by-field copy driven by run-time introspection
//! - `composed`: per-kind copy plans built once and cached
//! - `compiled`: a routine compiled to native code at run time

pub mod compiled;
pub mod composed;
pub mod encoding;
pub mod recursive;
pub mod reflective;

pub use compiled::{CompiledCloner, CompiledRoutine, CUSTOMER_ROUTINE};
pub use composed::{ComposedCloner, CopyPlan};
pub use encoding::{BinaryCodec, Codec, JsonText, JsonTree, RoundTrip};
pub use recursive::{DeepClone, RecursiveCopy};
pub use reflective::ReflectiveCloner;

use crate::model::Customer;
use crate::reflect::KindRegistry;
use crate::strategy::CloneStrategy;

/// Every strategy for the sample model, in report order
pub fn standard_lineup(registry: &KindRegistry) -> Vec<Box<dyn CloneStrategy<Customer>>> {
    vec![
        Box::new(RoundTrip::new("JSON text", JsonText)),
        Box::new(RoundTrip::new("JSON tree", JsonTree)),
        Box::new(RoundTrip::new("Binary", BinaryCodec::new(registry.clone()))),
        Box::new(RecursiveCopy::new()),
        Box::new(ReflectiveCloner::new()),
        Box::new(ComposedCloner::new(registry.clone())),
        Box::new(CompiledCloner::new(registry.clone())),
    ]
}
