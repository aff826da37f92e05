//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IngestionCommand, ListingQuery};
use crate::settings::Secret;

/// Keys and cookie settings checked by the auth extractors.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Key granting ordinary access.
    pub api_key: Secret,
    /// Key granting admin access.
    pub admin_key: Secret,
    /// `Domain` attribute for the `access_token` cookie.
    pub cookie_domain: String,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ingestion: Arc<dyn IngestionCommand>,
    pub listing: Arc<dyn ListingQuery>,
    pub credentials: Credentials,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use find_my_bike::domain::ports::{FixtureIngestionCommand, FixtureListingQuery};
    /// use find_my_bike::inbound::http::state::{Credentials, HttpState};
    /// use find_my_bike::settings::Secret;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureIngestionCommand),
    ///     Arc::new(FixtureListingQuery),
    ///     Credentials {
    ///         api_key: Secret::new("public"),
    ///         admin_key: Secret::new("private"),
    ///         cookie_domain: "localhost".to_owned(),
    ///     },
    /// );
    /// assert_eq!(state.credentials.cookie_domain, "localhost");
    /// ```
    pub fn new(
        ingestion: Arc<dyn IngestionCommand>,
        listing: Arc<dyn ListingQuery>,
        credentials: Credentials,
    ) -> Self {
        Self {
            ingestion,
            listing,
            credentials,
        }
    }
}
