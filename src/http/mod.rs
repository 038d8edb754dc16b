//! HTTP protocol layer module
//!
//! Response construction decoupled from routing: turns a response
//! descriptor into a wire-ready hyper response.

pub mod response;

// Re-export commonly used builders
pub use response::{build_500_response, render_descriptor};
