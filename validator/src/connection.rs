use crate::rpc::Channel;
use std::time::Duration;

/// Everything a backend may be built from.
///
/// Implementors only hand out what is asked for: selecting the REST backend
/// reads the URL and timeout, selecting the RPC backend reads the channel.
pub trait Connection {
    type Channel: Channel;

    /// Base URL of the beacon node's REST API (may be empty if REST is unused).
    fn beacon_api_url(&self) -> &str;

    /// Per-request timeout for the REST API.
    fn beacon_api_timeout(&self) -> Duration;

    /// Handle to the established RPC channel.
    fn grpc_client_conn(&self) -> Self::Channel;
}

/// Connection details owned by the validator client's startup routine.
#[derive(Debug, Clone)]
pub struct NodeConnection<C: Channel> {
    beacon_api_url: String,
    beacon_api_timeout: Duration,
    grpc_client_conn: C,
}

impl<C: Channel> NodeConnection<C> {
    /// Default REST API timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a connection around an established RPC channel, with no REST API.
    pub fn new(grpc_client_conn: C) -> Self {
        Self {
            beacon_api_url: String::new(),
            beacon_api_timeout: Self::DEFAULT_TIMEOUT,
            grpc_client_conn,
        }
    }

    /// Set the REST API endpoint and its timeout.
    pub fn with_beacon_api(mut self, url: impl Into<String>, timeout: Duration) -> Self {
        self.beacon_api_url = url.into();
        self.beacon_api_timeout = timeout;
        self
    }
}

impl<C: Channel> Connection for NodeConnection<C> {
    type Channel = C;

    fn beacon_api_url(&self) -> &str {
        &self.beacon_api_url
    }

    fn beacon_api_timeout(&self) -> Duration {
        self.beacon_api_timeout
    }

    fn grpc_client_conn(&self) -> C {
        self.grpc_client_conn.clone()
    }
}
