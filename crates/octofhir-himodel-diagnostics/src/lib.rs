//! Value model diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by the value
//! model crates: numbered error codes and the [`ModelError`] type returned by
//! every fallible parsing and loading entry point.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for value model operations
pub type Result<T> = std::result::Result<T, ModelError>;
