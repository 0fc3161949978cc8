//! Compose service schema.
//!
//! Mirrors the build-relevant parts of a compose service. Unknown keys
//! are ignored and nothing is defaulted.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{BuildSpec, Service};

/// Service section of a compose file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSpec {
    /// Image to use or tag.
    #[serde(default)]
    pub image: Option<String>,

    /// Build configuration.
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// Build configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BuildConfig {
    /// Simple context path.
    Path(String),
    /// Full build configuration.
    Full(BuildFields),
}

/// Long form of the `build` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildFields {
    /// Build context.
    #[serde(default)]
    pub context: Option<String>,
    /// Dockerfile path.
    #[serde(default)]
    pub dockerfile: Option<String>,
    /// Build arguments.
    #[serde(default)]
    pub args: Option<ArgsSpec>,
    /// Image labels.
    #[serde(default)]
    pub labels: Option<LabelsSpec>,
    /// Cache sources.
    #[serde(default)]
    pub cache_from: Option<Vec<Scalar>>,
    /// Build stage.
    #[serde(default)]
    pub target: Option<String>,
}

/// Build arguments as `KEY: value` pairs or `KEY=value` entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArgsSpec {
    /// `KEY: value`; a null value defers to the environment.
    Map(BTreeMap<String, Option<Scalar>>),
    /// `KEY=value`; a bare `KEY` defers to the environment.
    List(Vec<Scalar>),
}

/// Labels as `KEY: value` pairs or `KEY=value` entries.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelsSpec {
    /// `KEY: value`; a null value is the empty string.
    Map(BTreeMap<String, Option<Scalar>>),
    /// `KEY=value`; a bare `KEY` is the empty string.
    List(Vec<Scalar>),
}

/// A YAML scalar read as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Plain or quoted string.
    String(String),
    /// Integer or float, as written.
    Number(serde_yaml::Number),
    /// `true` or `false`.
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

impl ServiceSpec {
    /// Convert into the model for the named service.
    #[must_use]
    pub fn into_service(self, name: String) -> Service {
        Service {
            name,
            image: self.image,
            build: self.build.map(BuildConfig::into_build),
        }
    }
}

impl BuildConfig {
    /// Convert into the model.
    #[must_use]
    pub fn into_build(self) -> BuildSpec {
        match self {
            Self::Path(context) => BuildSpec::with_context(context),
            Self::Full(fields) => BuildSpec {
                context: fields.context,
                dockerfile: fields.dockerfile,
                args: fields.args.map(ArgsSpec::into_map).unwrap_or_default(),
                labels: fields.labels.map(LabelsSpec::into_map).unwrap_or_default(),
                cache_from: fields
                    .cache_from
                    .unwrap_or_default()
                    .into_iter()
                    .map(String::from)
                    .collect(),
                target: fields.target,
            },
        }
    }
}

impl ArgsSpec {
    fn into_map(self) -> BTreeMap<String, Option<String>> {
        match self {
            Self::Map(args) => args
                .into_iter()
                .map(|(key, value)| (key, value.map(String::from)))
                .collect(),
            Self::List(entries) => entries
                .into_iter()
                .map(|entry| {
                    let entry = String::from(entry);
                    if let Some((key, value)) = entry.split_once('=') {
                        (key.to_string(), Some(value.to_string()))
                    } else {
                        (entry, None)
                    }
                })
                .collect(),
        }
    }
}

impl LabelsSpec {
    fn into_map(self) -> BTreeMap<String, String> {
        match self {
            Self::Map(labels) => labels
                .into_iter()
                .map(|(key, value)| (key, value.map(String::from).unwrap_or_default()))
                .collect(),
            Self::List(entries) => entries
                .into_iter()
                .map(|entry| {
                    let entry = String::from(entry);
                    if let Some((key, value)) = entry.split_once('=') {
                        (key.to_string(), value.to_string())
                    } else {
                        (entry, String::new())
                    }
                })
                .collect(),
        }
    }
}
