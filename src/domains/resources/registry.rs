//! Resource Registry - URI-template to handler bindings.
//!
//! Resolution walks the registered templates in registration order and
//! returns the first match together with its extracted placeholder bindings.
//! Registration happens once at server startup; afterwards the registry is
//! shared read-only by all dispatches.

use tracing::info;

use super::definitions::ResourceHandler;
use super::error::ResourceError;
use super::template::{PlaceholderBindings, UriTemplate};

/// A registered resource: its template and handler.
#[derive(Debug)]
pub struct RegisteredResource {
    /// The URI template this resource answers to.
    pub template: UriTemplate,

    /// Human-readable description advertised to clients.
    pub description: String,

    /// The handler invoked with extracted placeholder bindings.
    pub handler: ResourceHandler,
}

/// Registry of all available resources.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: Vec<RegisteredResource>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under a URI template.
    ///
    /// Fails if the template string is invalid or already registered.
    pub fn register(
        &mut self,
        template: &str,
        description: impl Into<String>,
        handler: ResourceHandler,
    ) -> Result<(), ResourceError> {
        let template = UriTemplate::parse(template)?;
        if self
            .resources
            .iter()
            .any(|resource| resource.template.as_str() == template.as_str())
        {
            return Err(ResourceError::duplicate_template(template.as_str()));
        }
        info!(template = template.as_str(), "Registering resource");
        self.resources.push(RegisteredResource {
            template,
            description: description.into(),
            handler,
        });
        Ok(())
    }

    /// Resolve a URI to a registered resource and its placeholder bindings.
    pub fn resolve(&self, uri: &str) -> Option<(&RegisteredResource, PlaceholderBindings)> {
        self.resources.iter().find_map(|resource| {
            resource
                .template
                .match_uri(uri)
                .map(|bindings| (resource, bindings))
        })
    }

    /// Iterate over all registered resources.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredResource> {
        self.resources.iter()
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
