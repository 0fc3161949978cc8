//! Error types for the bake workspace.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`BakeError`].
pub type BakeResult<T> = Result<T, BakeError>;

/// Errors raised while loading a compose document.
#[derive(Error, Diagnostic, Debug)]
pub enum ComposeError {
    /// The compose file could not be read.
    #[error("Failed to read compose file {path}: {source}")]
    #[diagnostic(code(bake::compose::io))]
    Io {
        /// Path of the compose file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("Failed to parse compose file: {0}")]
    #[diagnostic(code(bake::compose::yaml))]
    Yaml(#[from] serde_yaml::Error),

    /// The document is valid YAML but not a compose document.
    #[error("Invalid compose document: {message}")]
    #[diagnostic(
        code(bake::compose::document),
        help("A compose file is a mapping with a top-level `services` mapping")
    )]
    InvalidDocument {
        /// What is wrong with the document.
        message: String,
    },

    /// A service entry has the wrong shape.
    #[error("Invalid service {service}: {message}")]
    #[diagnostic(code(bake::compose::service))]
    InvalidService {
        /// Name of the offending service.
        service: String,
        /// What is wrong with the service.
        message: String,
    },

    /// A `${...}` expression could not be expanded.
    #[error("Invalid interpolation in {value:?}: {message}")]
    #[diagnostic(
        code(bake::compose::interpolation),
        help("Use `$$` for a literal dollar sign")
    )]
    Interpolation {
        /// The string being interpolated.
        value: String,
        /// Why expansion failed.
        message: String,
    },

    /// No compose file was given and none was found.
    #[error("No compose file found in {dir}")]
    #[diagnostic(
        code(bake::compose::not_found),
        help("Pass a file with --file or create compose.yaml")
    )]
    NotFound {
        /// Directory that was searched.
        dir: PathBuf,
    },
}

/// Errors raised while turning a compose document into build targets.
#[derive(Error, Diagnostic, Debug)]
pub enum BakeError {
    /// The compose document failed to load.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ComposeError),

    /// A service can neither be built nor pulled.
    #[error(
        "compose file invalid: service {service} has neither an image nor a build context specified; at least one must be provided"
    )]
    #[diagnostic(
        code(bake::validation),
        help("Add an `image` or a `build` section to the service")
    )]
    Validation {
        /// Name of the offending service.
        service: String,
    },
}

impl BakeError {
    /// Name of the service the error refers to, if any.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::Validation { service }
            | Self::Parse(ComposeError::InvalidService { service, .. }) => Some(service),
            Self::Parse(_) => None,
        }
    }
}
