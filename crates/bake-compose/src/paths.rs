//! Compose file discovery.

use std::path::{Path, PathBuf};

use bake_common::ComposeError;

/// File names searched for when no compose file is given, in order.
pub const DEFAULT_COMPOSE_FILES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yml",
    "docker-compose.yaml",
];

/// Find the first default compose file in `dir`.
pub fn find_compose_file(dir: &Path) -> Result<PathBuf, ComposeError> {
    DEFAULT_COMPOSE_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ComposeError::NotFound {
            dir: dir.to_path_buf(),
        })
}
