use crate::{
    features::{self, Flags},
    rest::RestClient,
    rpc::{Channel, RpcClient},
    Connection, Error, Genesis, ProposerDuty, SyncStatus, ValidatorClient,
};
use beacon_types::Epoch;
use std::{fmt, future::Future};
use tracing::info;

/// Which backend a [Client] talks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Rest,
    Rpc,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Rest => f.write_str("rest"),
            Backend::Rpc => f.write_str("rpc"),
        }
    }
}

/// The [ValidatorClient] selected at startup.
#[derive(Clone)]
pub enum Client<C: Channel> {
    Rest(RestClient),
    Rpc(RpcClient<C>),
}

impl<C: Channel> Client<C> {
    pub fn backend(&self) -> Backend {
        match self {
            Client::Rest(_) => Backend::Rest,
            Client::Rpc(_) => Backend::Rpc,
        }
    }
}

/// Select the backend for `connection` from the process-wide [features::Flags].
pub fn new<N: Connection>(connection: &N) -> Client<N::Channel> {
    with_flags(connection, features::get())
}

/// Select the backend for `connection` from `flags`.
///
/// The REST backend is built only from the REST URL and timeout; the RPC backend
/// only from the channel.
pub fn with_flags<N: Connection>(connection: &N, flags: &Flags) -> Client<N::Channel> {
    if flags.enable_beacon_rest_api {
        let url = connection.beacon_api_url();
        let timeout = connection.beacon_api_timeout();
        info!(backend = %Backend::Rest, url, ?timeout, "selected validator client");
        Client::Rest(RestClient::new(url, timeout))
    } else {
        info!(backend = %Backend::Rpc, "selected validator client");
        Client::Rpc(RpcClient::new(connection.grpc_client_conn()))
    }
}

impl<C: Channel> ValidatorClient for Client<C> {
    fn genesis(&self) -> impl Future<Output = Result<Genesis, Error>> + Send {
        async move {
            match self {
                Client::Rest(client) => client.genesis().await,
                Client::Rpc(client) => client.genesis().await,
            }
        }
    }

    fn node_version(&self) -> impl Future<Output = Result<String, Error>> + Send {
        async move {
            match self {
                Client::Rest(client) => client.node_version().await,
                Client::Rpc(client) => client.node_version().await,
            }
        }
    }

    fn syncing(&self) -> impl Future<Output = Result<SyncStatus, Error>> + Send {
        async move {
            match self {
                Client::Rest(client) => client.syncing().await,
                Client::Rpc(client) => client.syncing().await,
            }
        }
    }

    fn proposer_duties(
        &self,
        epoch: Epoch,
    ) -> impl Future<Output = Result<Vec<ProposerDuty>, Error>> + Send {
        async move {
            match self {
                Client::Rest(client) => client.proposer_duties(epoch).await,
                Client::Rpc(client) => client.proposer_duties(epoch).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rpc::mocks::MockChannel, NodeConnection};
    use futures::executor::block_on;
    use std::{
        cell::Cell,
        sync::atomic::Ordering,
        time::Duration,
    };

    /// Records which accessors the factory reads.
    struct Recording {
        inner: NodeConnection<MockChannel>,
        url_reads: Cell<usize>,
        timeout_reads: Cell<usize>,
        channel_reads: Cell<usize>,
    }

    impl Recording {
        fn new(inner: NodeConnection<MockChannel>) -> Self {
            Self {
                inner,
                url_reads: Cell::new(0),
                timeout_reads: Cell::new(0),
                channel_reads: Cell::new(0),
            }
        }
    }

    impl Connection for Recording {
        type Channel = MockChannel;

        fn beacon_api_url(&self) -> &str {
            self.url_reads.set(self.url_reads.get() + 1);
            self.inner.beacon_api_url()
        }

        fn beacon_api_timeout(&self) -> Duration {
            self.timeout_reads.set(self.timeout_reads.get() + 1);
            self.inner.beacon_api_timeout()
        }

        fn grpc_client_conn(&self) -> MockChannel {
            self.channel_reads.set(self.channel_reads.get() + 1);
            self.inner.grpc_client_conn()
        }
    }

    const REST: Flags = Flags {
        enable_beacon_rest_api: true,
    };
    const RPC: Flags = Flags {
        enable_beacon_rest_api: false,
    };

    #[test]
    fn test_rest_selected_from_url_and_timeout_only() {
        let connection = Recording::new(
            NodeConnection::new(MockChannel::unavailable())
                .with_beacon_api("http://localhost:5052", Duration::from_secs(3)),
        );
        let client = with_flags(&connection, &REST);
        match &client {
            Client::Rest(rest) => {
                assert_eq!(rest.base_url(), "http://localhost:5052");
                assert_eq!(rest.timeout(), Duration::from_secs(3));
            }
            Client::Rpc(_) => panic!("expected rest backend"),
        }
        assert_eq!(connection.url_reads.get(), 1);
        assert_eq!(connection.timeout_reads.get(), 1);
        assert_eq!(connection.channel_reads.get(), 0);
    }

    #[test]
    fn test_rpc_selected_without_reading_url() {
        // An empty REST URL and a live channel.
        let channel = MockChannel::unavailable();
        let connection = Recording::new(NodeConnection::new(channel.clone()));
        let client = with_flags(&connection, &RPC);
        assert_eq!(client.backend(), Backend::Rpc);
        assert_eq!(connection.url_reads.get(), 0);
        assert_eq!(connection.timeout_reads.get(), 0);
        assert_eq!(connection.channel_reads.get(), 1);

        // Calls go over the channel handed to the factory.
        assert!(block_on(client.node_version()).is_err());
        assert_eq!(channel.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let connection = NodeConnection::new(MockChannel::unavailable())
            .with_beacon_api("http://localhost:5052", Duration::from_secs(1));
        for flags in [REST, RPC] {
            let first = with_flags(&connection, &flags).backend();
            for _ in 0..3 {
                assert_eq!(with_flags(&connection, &flags).backend(), first);
            }
        }
        assert_eq!(with_flags(&connection, &REST).backend(), Backend::Rest);
        assert_eq!(with_flags(&connection, &RPC).backend(), Backend::Rpc);
    }

    #[test]
    fn test_new_follows_process_flags() {
        let connection = NodeConnection::new(MockChannel::unavailable());
        let expected = if features::get().enable_beacon_rest_api {
            Backend::Rest
        } else {
            Backend::Rpc
        };
        assert_eq!(new(&connection).backend(), expected);
    }

    #[test]
    fn test_rest_with_bad_url_fails_on_first_use() {
        let connection = NodeConnection::new(MockChannel::unavailable())
            .with_beacon_api("not a url", Duration::from_secs(1));
        let client = with_flags(&connection, &REST);
        assert_eq!(client.backend(), Backend::Rest);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        assert!(matches!(
            runtime.block_on(client.genesis()),
            Err(Error::InvalidUrl(..))
        ));
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(Backend::Rest.to_string(), "rest");
        assert_eq!(Backend::Rpc.to_string(), "rpc");
    }
}
