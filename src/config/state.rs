// Application state module
// Immutable state shared with every connection task

use super::types::Config;
use crate::routing::RouteTable;

/// Application state
///
/// Built once at startup and handed to connection tasks behind an `Arc`.
/// The route table never changes after construction, so no lock guards it.
pub struct AppState {
    pub config: Config,
    pub route_table: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let route_table = RouteTable::from_config(&config.routes);
        Self {
            config,
            route_table,
        }
    }
}
