//! Compose services to build targets.

use std::collections::BTreeMap;
use std::path::Path;

use bake_common::{BakeError, BakeResult, Environment};
use bake_compose::{BuildSpec, CompositionModel, Service};

use crate::config::{Config, Group, Target};

/// Name of the group every target is added to.
pub const DEFAULT_GROUP: &str = "default";

/// Load a compose document from bytes and extract its build targets.
///
/// The environment is used both for `${VAR}` interpolation in the
/// document and for build arguments declared without a value.
pub fn parse_compose(bytes: &[u8], env: &Environment) -> BakeResult<Config> {
    let model = bake_compose::load(bytes, env)?;
    extract(&model, env)
}

/// Load a compose file from disk and extract its build targets.
pub fn load_config(path: &Path, env: &Environment) -> BakeResult<Config> {
    let model = bake_compose::load_file(path, env)?;
    extract(&model, env)
}

/// Extract build targets from a loaded compose model.
///
/// Services are visited in declaration order. A service with a non-empty
/// `build` section becomes a target; a service with only an image is
/// skipped. The first service with neither fails the whole extraction.
pub fn extract(model: &CompositionModel, env: &Environment) -> BakeResult<Config> {
    let mut config = Config::default();
    let mut group = Group::new(DEFAULT_GROUP);

    for service in &model.services {
        let Some(build) = service.effective_build() else {
            if is_blank(service.image.as_deref()) {
                return Err(BakeError::Validation {
                    service: service.name.clone(),
                });
            }
            tracing::debug!(service = %service.name, "Skipping image-only service");
            continue;
        };

        let target = build_target(service, build, env);
        tracing::debug!(
            service = %service.name,
            context = ?target.context,
            args = target.args.len(),
            "Extracted build target"
        );
        group.targets.push(service.name.clone());
        config.targets.push(target);
    }

    if !group.targets.is_empty() {
        config.groups.push(group);
    }

    tracing::info!(
        services = model.len(),
        targets = config.targets.len(),
        "Extracted build targets"
    );
    Ok(config)
}

fn build_target(service: &Service, build: &BuildSpec, env: &Environment) -> Target {
    Target {
        name: service.name.clone(),
        context: non_empty(build.context.as_deref()),
        dockerfile: non_empty(build.dockerfile.as_deref()),
        target: non_empty(build.target.as_deref()),
        tags: non_empty(service.image.as_deref()).into_iter().collect(),
        args: resolve_args(&build.args, env),
        labels: build.labels.clone(),
        cache_from: build.cache_from.clone(),
    }
}

/// Resolve build arguments to concrete values.
///
/// An explicit value, even an empty one, is kept as is. A value-less
/// argument takes its value from `env` and is dropped when the variable
/// is not set.
#[must_use]
pub fn resolve_args(
    args: &BTreeMap<String, Option<String>>,
    env: &Environment,
) -> BTreeMap<String, String> {
    args.iter()
        .filter_map(|(key, value)| match value {
            Some(value) => Some((key.clone(), value.clone())),
            None => env.get(key).map(|value| (key.clone(), value.to_string())),
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}
