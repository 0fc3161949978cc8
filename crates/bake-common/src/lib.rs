//! # bake-common
//!
//! Shared types for the bake workspace:
//! - Error types for loading and validating compose files
//! - The process environment snapshot used for build-argument and
//!   variable resolution

#![warn(missing_docs)]

pub mod env;
pub mod error;

pub use env::Environment;
pub use error::{BakeError, BakeResult, ComposeError};
