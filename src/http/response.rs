//! HTTP response building module
//!
//! Renders route descriptors into hyper responses. Build failures never
//! panic on the request path: they degrade to a plain 500 and are logged.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::routing::ResponseDescriptor;

/// Render a response descriptor into a wire-ready response.
///
/// Writes status, `Content-Type`, `Content-Length`, and the serialized
/// body. A payload that fails to serialize degrades to a 500.
pub fn render_descriptor(descriptor: &ResponseDescriptor) -> Response<Full<Bytes>> {
    let payload = match descriptor.body.to_payload() {
        Ok(p) => p,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response body: {e}"));
            return build_500_response();
        }
    };

    let content_length = payload.len();
    Response::builder()
        .status(descriptor.status)
        .header("Content-Type", descriptor.content_type.as_str())
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(payload)))
        .unwrap_or_else(|e| {
            log_build_error(descriptor.status, &e);
            build_500_response()
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error(500, &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Log response build error
fn log_build_error(status: u16, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
