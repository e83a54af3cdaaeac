//! Dynamic greeting resource.

use crate::core::protocol::ResourceContent;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::template::PlaceholderBindings;

/// Greets the person named in the URI, e.g. `greeting://Alice`.
#[derive(Debug, Clone)]
pub struct GreetingResource;

impl GreetingResource {
    /// URI template this resource answers to.
    pub const TEMPLATE: &'static str = "greeting://{name}";

    /// Resource description shown to clients.
    pub const DESCRIPTION: &'static str = "A personalized greeting for the named person";

    /// Produce the greeting for the matched URI.
    pub fn read(
        uri: &str,
        bindings: &PlaceholderBindings,
    ) -> Result<Vec<ResourceContent>, ResourceError> {
        let name = bindings.get("name").ok_or_else(|| {
            ResourceError::internal("placeholder 'name' missing after template match")
        })?;

        Ok(vec![ResourceContent {
            uri: uri.to_string(),
            text: format!("Hello, {}!", name),
        }])
    }
}
