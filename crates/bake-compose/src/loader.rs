//! Compose document loading.
//!
//! Only the build-relevant parts of each service are read: `image` and
//! `build` (`context`, `dockerfile`, `args`, `labels`, `cache_from`,
//! `target`). Everything else in the document is accepted and ignored.

use std::path::Path;

use bake_common::{ComposeError, Environment};
use serde_yaml::Value;

use crate::interpolate::interpolate;
use crate::model::{CompositionModel, Service};
use crate::spec::ServiceSpec;

/// Load a compose document from raw bytes.
pub fn load(bytes: &[u8], env: &Environment) -> Result<CompositionModel, ComposeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(CompositionModel::default());
    }
    let mut doc: Value = serde_yaml::from_slice(bytes)?;
    doc.apply_merge()?;
    interpolate_value(&mut doc, env)?;

    let services = match doc {
        Value::Null => return Ok(CompositionModel::default()),
        Value::Mapping(mut root) => match root.remove("services") {
            None | Some(Value::Null) => return Ok(CompositionModel::default()),
            Some(Value::Mapping(services)) => services,
            Some(_) => {
                return Err(ComposeError::InvalidDocument {
                    message: "`services` must be a mapping".to_string(),
                });
            }
        },
        _ => {
            return Err(ComposeError::InvalidDocument {
                message: "top level must be a mapping".to_string(),
            });
        }
    };

    // Mapping keeps insertion order, so services stay in declaration order.
    let mut model = Vec::with_capacity(services.len());
    for (key, body) in services {
        let name = match key {
            Value::String(name) if !name.is_empty() => name,
            _ => {
                return Err(ComposeError::InvalidDocument {
                    message: format!("service names must be non-empty strings, got {key:?}"),
                });
            }
        };
        let service = parse_service(name, body)?;
        tracing::debug!(
            service = %service.name,
            image = ?service.image,
            build = service.build.is_some(),
            "Loaded service"
        );
        model.push(service);
    }

    Ok(CompositionModel::new(model))
}

/// Load a compose document from a string.
pub fn load_str(yaml: &str, env: &Environment) -> Result<CompositionModel, ComposeError> {
    load(yaml.as_bytes(), env)
}

/// Load a compose file from disk.
pub fn load_file(path: &Path, env: &Environment) -> Result<CompositionModel, ComposeError> {
    tracing::info!(path = %path.display(), "Loading compose file");
    let bytes = std::fs::read(path).map_err(|source| ComposeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load(&bytes, env)
}

fn interpolate_value(value: &mut Value, env: &Environment) -> Result<(), ComposeError> {
    match value {
        Value::String(s) => *s = interpolate(s, env)?,
        Value::Sequence(items) => {
            for item in items {
                interpolate_value(item, env)?;
            }
        }
        Value::Mapping(map) => {
            for item in map.values_mut() {
                interpolate_value(item, env)?;
            }
        }
        Value::Tagged(tagged) => interpolate_value(&mut tagged.value, env)?,
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

fn parse_service(name: String, body: Value) -> Result<Service, ComposeError> {
    match body {
        Value::Null => Ok(Service::new(name)),
        Value::Mapping(_) => match serde_yaml::from_value::<ServiceSpec>(body) {
            Ok(spec) => Ok(spec.into_service(name)),
            Err(err) => Err(ComposeError::InvalidService {
                service: name,
                message: err.to_string(),
            }),
        },
        _ => Err(ComposeError::InvalidService {
            service: name,
            message: "service definition must be a mapping".to_string(),
        }),
    }
}
