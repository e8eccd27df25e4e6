pub use crate::errors::{print_error, ConvertError, ErrorContext};

pub mod catalog;
pub mod cli;
pub mod emit;
pub mod engine;
pub mod errors;
pub mod params;
pub mod registry;
pub mod rewrite;
pub mod scan;
