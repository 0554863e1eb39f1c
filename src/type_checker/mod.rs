//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the AST. It walks the tree
//! once while:
//!
//! - Resolving variable and function references through nested scopes
//! - Assigning a type to every expression node
//! - Checking function signatures against their call sites
//! - Checking that non-unit functions return a value
//!
//! Errors are reported through an [`ErrorsHandler`](crate::errors::handler::ErrorsHandler)
//! and never stop the walk. A node whose type could not be worked out is
//! typed `Unknown`, which silences further errors about it.

pub mod data_type;
pub mod environment;
pub mod type_checker;
