//! Resource definitions module.
//!
//! Each resource lives in its own file and provides its URI template,
//! description, and read logic. The [`ResourceHandler`] union below is the
//! closed set of handler variants the dispatcher can invoke.

pub mod greeting;

pub use greeting::GreetingResource;

use crate::core::protocol::ResourceContent;

use super::error::ResourceError;
use super::registry::ResourceRegistry;
use super::template::PlaceholderBindings;

/// The closed set of resource handlers.
#[derive(Debug)]
pub enum ResourceHandler {
    /// Personalized greeting.
    Greeting,
}

impl ResourceHandler {
    /// Read the resource for a matched URI with its placeholder bindings.
    pub async fn read(
        &self,
        uri: &str,
        bindings: &PlaceholderBindings,
    ) -> Result<Vec<ResourceContent>, ResourceError> {
        match self {
            Self::Greeting => GreetingResource::read(uri, bindings),
        }
    }
}

/// Register the default resource set into `registry`.
pub fn register_defaults(registry: &mut ResourceRegistry) -> Result<(), ResourceError> {
    registry.register(
        GreetingResource::TEMPLATE,
        GreetingResource::DESCRIPTION,
        ResourceHandler::Greeting,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defaults_installs_greeting() {
        let mut registry = ResourceRegistry::new();
        register_defaults(&mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("greeting://Bob").is_some());
    }
}
