//! Resources domain module.
//!
//! Resources are URI-addressable data sources with placeholder-templated
//! addressing, e.g. `greeting://{name}`.
//!
//! ## Architecture
//!
//! - `template.rs` - URI template parsing and matching
//! - `registry.rs` - template to handler bindings
//! - `definitions/` - individual resource implementations
//! - `error.rs` - resource-specific error types

pub mod definitions;
mod error;
mod registry;
pub mod template;

pub use definitions::{GreetingResource, ResourceHandler, register_defaults};
pub use error::ResourceError;
pub use registry::{RegisteredResource, ResourceRegistry};
pub use template::{PlaceholderBindings, UriTemplate};
