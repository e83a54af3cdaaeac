//! URI templates with named placeholders.
//!
//! A template is a `scheme://` prefix followed by `/`-separated segments,
//! each either a literal or a `{name}` placeholder, e.g. `greeting://{name}`
//! or `config://{section}/{key}`. Matching compares literal segments by
//! equality and captures placeholder segments as opaque strings; a template
//! matches only URIs with exactly the same segment count. No regular
//! expressions, no wildcard segments.

use std::collections::{HashMap, HashSet};

use super::error::ResourceError;

/// Placeholder name to captured value, extracted by a successful match.
pub type PlaceholderBindings = HashMap<String, String>;

/// One path segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Matches only itself.
    Literal(String),

    /// Matches any single segment and captures it under the given name.
    Placeholder(String),
}

/// A parsed URI template.
#[derive(Debug, Clone)]
pub struct UriTemplate {
    raw: String,
    scheme: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a template string.
    ///
    /// Fails when the `://` separator is missing, a placeholder name is
    /// empty, or the same placeholder name appears twice.
    pub fn parse(template: &str) -> Result<Self, ResourceError> {
        let (scheme, path) = template.split_once("://").ok_or_else(|| {
            ResourceError::invalid_template(format!("'{}': missing '://' separator", template))
        })?;

        let mut seen = HashSet::new();
        let mut segments = Vec::new();

        for part in path.split('/') {
            let segment = match part
                .strip_prefix('{')
                .and_then(|inner| inner.strip_suffix('}'))
            {
                Some(name) => {
                    if name.is_empty() {
                        return Err(ResourceError::invalid_template(format!(
                            "'{}': empty placeholder name",
                            template
                        )));
                    }
                    if !seen.insert(name.to_string()) {
                        return Err(ResourceError::invalid_template(format!(
                            "'{}': duplicate placeholder '{{{}}}'",
                            template, name
                        )));
                    }
                    Segment::Placeholder(name.to_string())
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: template.to_string(),
            scheme: scheme.to_string(),
            segments,
        })
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the placeholders, in template order.
    pub fn placeholder_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a candidate URI against this template.
    ///
    /// Returns the placeholder bindings on a match, `None` otherwise.
    /// Placeholder values are captured as opaque strings regardless of any
    /// semantic type they represent.
    pub fn match_uri(&self, uri: &str) -> Option<PlaceholderBindings> {
        let (scheme, path) = uri.split_once("://")?;
        if scheme != self.scheme {
            return None;
        }

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bindings = PlaceholderBindings::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Placeholder(name) => {
                    bindings.insert(name.clone(), part.to_string());
                }
            }
        }

        Some(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_template_extracts_name() {
        let template = UriTemplate::parse("greeting://{name}").unwrap();
        let bindings = template.match_uri("greeting://Alice").unwrap();
        assert_eq!(bindings.get("name").map(String::as_str), Some("Alice"));
    }

    #[test]
    fn test_scheme_must_match() {
        let template = UriTemplate::parse("greeting://{name}").unwrap();
        assert!(template.match_uri("farewell://Alice").is_none());
    }

    #[test]
    fn test_segment_count_must_match() {
        let template = UriTemplate::parse("greeting://{name}").unwrap();
        assert!(template.match_uri("greeting://Alice/extra").is_none());
    }

    #[test]
    fn test_literal_segments_compared_by_equality() {
        let template = UriTemplate::parse("docs://guide/{page}").unwrap();
        assert!(template.match_uri("docs://guide/intro").is_some());
        assert!(template.match_uri("docs://manual/intro").is_none());
    }

    #[test]
    fn test_multiple_placeholders() {
        let template = UriTemplate::parse("config://{section}/{key}").unwrap();
        let bindings = template.match_uri("config://logging/level").unwrap();
        assert_eq!(bindings.get("section").map(String::as_str), Some("logging"));
        assert_eq!(bindings.get("key").map(String::as_str), Some("level"));
    }

    #[test]
    fn test_placeholder_value_is_opaque() {
        // A numeric-looking value is still captured as a string.
        let template = UriTemplate::parse("greeting://{name}").unwrap();
        let bindings = template.match_uri("greeting://42").unwrap();
        assert_eq!(bindings.get("name").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_missing_scheme_separator_rejected() {
        assert!(matches!(
            UriTemplate::parse("greeting/{name}"),
            Err(ResourceError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_duplicate_placeholder_rejected() {
        assert!(matches!(
            UriTemplate::parse("pair://{name}/{name}"),
            Err(ResourceError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_empty_placeholder_name_rejected() {
        assert!(matches!(
            UriTemplate::parse("greeting://{}"),
            Err(ResourceError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_placeholder_names_in_order() {
        let template = UriTemplate::parse("config://{section}/{key}").unwrap();
        let names: Vec<&str> = template.placeholder_names().collect();
        assert_eq!(names, vec!["section", "key"]);
    }
}
