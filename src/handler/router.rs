//! Request dispatch module
//!
//! Entry point for HTTP request processing: extracts the request path,
//! resolves it against the route table, and renders the matched
//! descriptor. Absence of a match is a normal outcome (the fallback
//! descriptor), never an error.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling
///
/// The request method plays no part in dispatch: a POST to `/books`
/// receives the same response as a GET. hyper's `uri().path()` already
/// excludes query string and fragment, so the table sees a bare path.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path();

    let descriptor = state.route_table.dispatch(path);
    let response = http::render_descriptor(descriptor);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            path.to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = http_version_str(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = content_length(&response);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn http_version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("Content-Length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}
