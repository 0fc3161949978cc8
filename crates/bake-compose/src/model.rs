//! In-memory compose model.

use std::collections::BTreeMap;

/// A loaded compose document, reduced to what a build needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionModel {
    /// Services in declaration order.
    pub services: Vec<Service>,
}

impl CompositionModel {
    /// Create a model from services in declaration order.
    #[must_use]
    pub const fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// Look up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Number of services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the document declares no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// A single service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    /// Service name.
    pub name: String,
    /// Pre-built image reference.
    pub image: Option<String>,
    /// Build configuration.
    pub build: Option<BuildSpec>,
}

impl Service {
    /// Create a service with neither image nor build.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the build configuration.
    #[must_use]
    pub fn with_build(mut self, build: BuildSpec) -> Self {
        self.build = Some(build);
        self
    }

    /// The build configuration, unless it is missing or empty.
    #[must_use]
    pub fn effective_build(&self) -> Option<&BuildSpec> {
        self.build.as_ref().filter(|b| !b.is_empty())
    }
}

/// Build section of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSpec {
    /// Build context path or URL.
    pub context: Option<String>,
    /// Dockerfile path, relative to the context.
    pub dockerfile: Option<String>,
    /// Build arguments. `None` defers the value to the environment.
    pub args: BTreeMap<String, Option<String>>,
    /// Image labels.
    pub labels: BTreeMap<String, String>,
    /// Cache sources, in order.
    pub cache_from: Vec<String>,
    /// Build stage to stop at.
    pub target: Option<String>,
}

impl BuildSpec {
    /// Create a build configuration with only a context.
    #[must_use]
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::default()
        }
    }

    /// Whether every field is at its zero value.
    ///
    /// Strings count as zero when unset or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(self.context.as_deref())
            && is_blank(self.dockerfile.as_deref())
            && is_blank(self.target.as_deref())
            && self.args.is_empty()
            && self.labels.is_empty()
            && self.cache_from.is_empty()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}
