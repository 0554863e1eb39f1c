//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the pipeline:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - The `ErrorsHandler` sink the analyzer reports into
//! - Helpful error messages and suggestions

pub mod errors;
pub mod handler;

#[cfg(test)]
mod tests;
