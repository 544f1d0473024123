pub mod parser;
pub mod error;

#[cfg(test)]
mod tests;

pub use parser::Parser;
pub use error::{ParseError, ParseResult};
