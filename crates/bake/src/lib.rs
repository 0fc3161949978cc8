//! # bake
//!
//! Turns the services of a compose file into build targets.
//!
//! Every service with a non-empty `build` section becomes a [`Target`]
//! and is listed in the single `default` [`Group`]. Services that only
//! reference an image are skipped; services with neither are rejected.
//! Build arguments declared without a value are filled in from an
//! explicit [`Environment`](bake_common::Environment) and dropped when
//! the variable is unset.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod extract;

pub use cli::OutputFormat;
pub use config::{Config, Group, Target};
pub use extract::{DEFAULT_GROUP, extract, load_config, parse_compose, resolve_args};
