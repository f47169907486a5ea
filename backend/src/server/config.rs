//! HTTP server configuration object.

use std::net::SocketAddr;

use search_admin::inbound::http::state::HttpState;

/// Everything the HTTP server needs once storage is connected.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration over connected storage ports.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}
