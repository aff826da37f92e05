//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use find_my_bike::domain::RowLimit;
use find_my_bike::domain::ports::RowStore;
use find_my_bike::inbound::http::state::Credentials;

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) credentials: Credentials,
    pub(crate) row_limit: RowLimit,
    pub(crate) row_store: Arc<dyn RowStore>,
    pub(crate) allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a server configuration writing to `row_store`.
    ///
    /// No cross-origin access is granted until
    /// [`ServerConfig::with_allowed_origins`] is called.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        credentials: Credentials,
        row_limit: RowLimit,
        row_store: Arc<dyn RowStore>,
    ) -> Self {
        Self {
            bind_addr,
            credentials,
            row_limit,
            row_store,
            allowed_origins: Vec::new(),
        }
    }

    /// Allow credentialed cross-origin requests from `origins`.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by bootstrap tests")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
