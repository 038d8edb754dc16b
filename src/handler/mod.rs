//! Request handler module
//!
//! Responsible for resolving request paths against the route table and
//! producing the matched fixed response.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
