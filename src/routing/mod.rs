//! Path routing module
//!
//! Owns the route table: an immutable mapping from exact request path to a
//! fixed response descriptor, plus a fallback descriptor used for every
//! path that has no entry.

mod table;

pub use table::{ResponseBody, ResponseDescriptor, RouteTable};
