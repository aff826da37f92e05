//! Builders wiring domain services onto the configured row store.

use std::sync::Arc;

use find_my_bike::domain::{IngestionService, ListingService};
use find_my_bike::inbound::http::state::HttpState;

use super::ServerConfig;

/// Build the HTTP state shared by every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let store = Arc::clone(&config.row_store);
    HttpState::new(
        Arc::new(IngestionService::new(Arc::clone(&store), config.row_limit)),
        Arc::new(ListingService::new(store)),
        config.credentials.clone(),
    )
}
