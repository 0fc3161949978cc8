//! # bake-compose
//!
//! Compose document model and loader for bake.
//!
//! The loader reads the `services` section of a compose file, expands
//! `${VAR}` references against an explicit [`Environment`], and keeps
//! field values raw: nothing is defaulted, so an unset `dockerfile` stays
//! distinguishable from an empty one.

#![warn(missing_docs)]

pub mod interpolate;
pub mod loader;
pub mod model;
pub mod paths;
pub mod spec;

pub use bake_common::{ComposeError, Environment};
pub use loader::{load, load_file, load_str};
pub use model::{BuildSpec, CompositionModel, Service};
pub use paths::{DEFAULT_COMPOSE_FILES, find_compose_file};
pub use spec::{BuildConfig, ServiceSpec};
