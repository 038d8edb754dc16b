//! Route table and dispatch
//!
//! Routes are data, not control flow: the table is built once at startup
//! from configuration (or the builtin set) and never mutated afterwards.
//! Matching is exact, case-sensitive string equality on the request path.
//! There is no prefix matching, no parameter extraction, and the request
//! method plays no part in dispatch.

use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::config::RoutesConfig;

/// Payload of a fixed reply, either literal text or a JSON document.
///
/// Untagged so that a TOML string deserializes as `Text` and a TOML table
/// as `Json`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ResponseBody {
    Text(String),
    Json(serde_json::Value),
}

impl ResponseBody {
    /// Serialize the payload to the bytes sent on the wire.
    ///
    /// JSON documents serialize compactly (`{"message":"Welcome"}`); text
    /// passes through unchanged.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Json(value) => serde_json::to_string(value),
        }
    }
}

/// A fixed reply: exactly one status code, one content type, one body.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub status: u16,
    pub content_type: String,
    pub body: ResponseBody,
}

impl ResponseDescriptor {
    /// JSON descriptor with `application/json` content type.
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: ResponseBody::Json(body),
        }
    }

    /// Plain-text descriptor with `text/plain` content type.
    #[allow(dead_code)]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: ResponseBody::Text(body.into()),
        }
    }
}

/// Immutable mapping from exact request path to its response descriptor.
///
/// Every lookup resolves: paths without an entry get the fallback
/// descriptor, so no request is ever left without a response.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, ResponseDescriptor>,
    fallback: ResponseDescriptor,
}

impl RouteTable {
    pub fn new(routes: HashMap<String, ResponseDescriptor>, fallback: ResponseDescriptor) -> Self {
        Self { routes, fallback }
    }

    /// The builtin route set served when configuration supplies none.
    pub fn builtin() -> Self {
        Self::new(builtin_routes(), not_found_fallback())
    }

    /// Build the table from configuration.
    ///
    /// An absent `[routes]` map means the builtin set; an explicitly empty
    /// map means every path resolves to the fallback (the unconditional
    /// single-response layout). An absent fallback means 404.
    pub fn from_config(cfg: &RoutesConfig) -> Self {
        let defaults = Self::builtin();
        Self::new(
            cfg.routes.clone().unwrap_or(defaults.routes),
            cfg.fallback.clone().unwrap_or(defaults.fallback),
        )
    }

    /// Resolve a request path to its response descriptor.
    ///
    /// Pure lookup: exact match on the path, fallback on miss. No error
    /// path exists; an unknown path is a normal, representable outcome.
    pub fn dispatch(&self, path: &str) -> &ResponseDescriptor {
        self.routes.get(path).unwrap_or(&self.fallback)
    }
}

fn builtin_routes() -> HashMap<String, ResponseDescriptor> {
    let mut routes = HashMap::new();
    routes.insert(
        "/".to_string(),
        ResponseDescriptor::json(200, json!({"message": "Welcome"})),
    );
    routes.insert(
        "/books".to_string(),
        ResponseDescriptor::json(200, json!({"message": "List of books"})),
    );
    routes
}

fn not_found_fallback() -> ResponseDescriptor {
    ResponseDescriptor::json(404, json!({"error": "Not Found"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_root() {
        let table = RouteTable::builtin();
        let descriptor = table.dispatch("/");
        assert_eq!(descriptor.status, 200);
        assert_eq!(descriptor.content_type, "application/json");
        assert_eq!(
            descriptor.body.to_payload().unwrap(),
            r#"{"message":"Welcome"}"#
        );
    }

    #[test]
    fn test_dispatch_books() {
        let table = RouteTable::builtin();
        let descriptor = table.dispatch("/books");
        assert_eq!(descriptor.status, 200);
        assert_eq!(
            descriptor.body.to_payload().unwrap(),
            r#"{"message":"List of books"}"#
        );
    }

    #[test]
    fn test_dispatch_unknown_falls_back() {
        let table = RouteTable::builtin();
        let descriptor = table.dispatch("/unknown");
        assert_eq!(descriptor.status, 404);
        assert_eq!(descriptor.content_type, "application/json");
        assert_eq!(
            descriptor.body.to_payload().unwrap(),
            r#"{"error":"Not Found"}"#
        );
    }

    #[test]
    fn test_dispatch_is_exact_and_case_sensitive() {
        let table = RouteTable::builtin();
        assert_eq!(table.dispatch("/books/").status, 404);
        assert_eq!(table.dispatch("/Books").status, 404);
        assert_eq!(table.dispatch("/books?page=1").status, 404);
    }

    #[test]
    fn test_dispatch_is_stateless() {
        let table = RouteTable::builtin();
        let first = table.dispatch("/").clone();
        let second = table.dispatch("/").clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_response_layout() {
        // Empty route map: every path, including the empty string, gets
        // the fallback descriptor.
        let table = RouteTable::new(
            HashMap::new(),
            ResponseDescriptor::text(200, "Hello World"),
        );
        for path in ["/", "/books", "/anything", ""] {
            let descriptor = table.dispatch(path);
            assert_eq!(descriptor.status, 200);
            assert_eq!(descriptor.content_type, "text/plain");
            assert_eq!(descriptor.body.to_payload().unwrap(), "Hello World");
        }
    }

    #[test]
    fn test_from_config_defaults_to_builtin() {
        let cfg = RoutesConfig::default();
        let table = RouteTable::from_config(&cfg);
        assert_eq!(table.dispatch("/").status, 200);
        assert_eq!(table.dispatch("/books").status, 200);
        assert_eq!(table.dispatch("/missing").status, 404);
    }

    #[test]
    fn test_from_config_overrides() {
        let cfg = RoutesConfig {
            routes: Some(HashMap::from([(
                "/ping".to_string(),
                ResponseDescriptor::text(200, "pong"),
            )])),
            fallback: Some(ResponseDescriptor::text(404, "gone")),
        };
        let table = RouteTable::from_config(&cfg);
        assert_eq!(table.dispatch("/ping").body.to_payload().unwrap(), "pong");
        assert_eq!(table.dispatch("/").status, 404);
        assert_eq!(table.dispatch("/").body.to_payload().unwrap(), "gone");
    }

    #[test]
    fn test_body_deserializes_untagged() {
        let text: ResponseBody = serde_json::from_str(r#""Hello World""#).unwrap();
        assert_eq!(text, ResponseBody::Text("Hello World".to_string()));

        let json: ResponseBody = serde_json::from_str(r#"{"message":"Welcome"}"#).unwrap();
        assert_eq!(
            json.to_payload().unwrap(),
            r#"{"message":"Welcome"}"#
        );
    }
}
