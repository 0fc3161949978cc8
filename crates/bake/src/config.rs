//! Build definition produced from a compose file.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// A single build target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Target name, same as the service name.
    #[serde(skip)]
    pub name: String,

    /// Build context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Dockerfile path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,

    /// Build stage to stop at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Image tags to apply.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Resolved build arguments.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,

    /// Image labels.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Cache sources.
    #[serde(rename = "cache-from", skip_serializing_if = "Vec::is_empty")]
    pub cache_from: Vec<String>,
}

impl Target {
    /// Create an empty target.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named set of targets built together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Group name.
    pub name: String,
    /// Target names, in the order they were added.
    pub targets: Vec<String>,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
        }
    }
}

/// Complete build definition.
///
/// Serializes to the bake definition layout:
///
/// ```json
/// {
///   "group": { "default": { "targets": ["api"] } },
///   "target": { "api": { "context": "./api" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Groups; at most the `default` group.
    pub groups: Vec<Group>,
    /// Targets in service declaration order.
    pub targets: Vec<Target>,
}

impl Config {
    /// Look up a target by name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Whether there is nothing to build.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[derive(Serialize)]
struct Definition<'a> {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    group: BTreeMap<&'a str, GroupBody<'a>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    target: BTreeMap<&'a str, &'a Target>,
}

#[derive(Serialize)]
struct GroupBody<'a> {
    targets: &'a [String],
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Definition {
            group: self
                .groups
                .iter()
                .map(|g| (g.name.as_str(), GroupBody { targets: &g.targets }))
                .collect(),
            target: self.targets.iter().map(|t| (t.name.as_str(), t)).collect(),
        }
        .serialize(serializer)
    }
}
