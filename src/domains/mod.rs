//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the
//! dispatch server: `tools` for schema-validated callable operations and
//! `resources` for URI-addressable data sources.

pub mod resources;
pub mod tools;
