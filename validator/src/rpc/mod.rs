//! Protobuf RPC backend.
//!
//! Requests are encoded with [prost] and sent as unary calls over a [Channel]
//! the process established before the client was selected.

use crate::{Error, Genesis, ProposerDuty, SyncStatus, ValidatorClient};
use beacon_types::Epoch;
use bytes::Bytes;
use prost::Message;
use std::future::Future;
use tracing::debug;

pub mod wire;

pub const GET_GENESIS: &str = "/ethereum.eth.v1alpha1.Node/GetGenesis";
pub const GET_VERSION: &str = "/ethereum.eth.v1alpha1.Node/GetVersion";
pub const GET_SYNC_STATUS: &str = "/ethereum.eth.v1alpha1.Node/GetSyncStatus";
pub const GET_PROPOSER_DUTIES: &str = "/ethereum.eth.v1alpha1.BeaconNodeValidator/GetProposerDuties";

/// An established RPC channel to a beacon node.
pub trait Channel: Clone + Send + Sync + 'static {
    /// Send an encoded `request` to `method` and return the encoded response.
    fn unary(
        &self,
        method: &'static str,
        request: Bytes,
    ) -> impl Future<Output = Result<Bytes, Error>> + Send;
}

/// [ValidatorClient] backed by protobuf RPC.
#[derive(Debug, Clone)]
pub struct RpcClient<C: Channel> {
    channel: C,
}

impl<C: Channel> RpcClient<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    async fn call<Req: Message, Resp: Message + Default>(
        &self,
        method: &'static str,
        request: Req,
    ) -> Result<Resp, Error> {
        debug!(method, "calling");
        let response = self
            .channel
            .unary(method, Bytes::from(request.encode_to_vec()))
            .await?;
        Ok(Resp::decode(response)?)
    }
}

impl<C: Channel> ValidatorClient for RpcClient<C> {
    fn genesis(&self) -> impl Future<Output = Result<Genesis, Error>> + Send {
        async move {
            let response: wire::GenesisResponse = self.call(GET_GENESIS, wire::Empty {}).await?;
            response.try_into()
        }
    }

    fn node_version(&self) -> impl Future<Output = Result<String, Error>> + Send {
        async move {
            let response: wire::VersionResponse = self.call(GET_VERSION, wire::Empty {}).await?;
            Ok(response.version)
        }
    }

    fn syncing(&self) -> impl Future<Output = Result<SyncStatus, Error>> + Send {
        async move {
            let response: wire::SyncStatusResponse =
                self.call(GET_SYNC_STATUS, wire::Empty {}).await?;
            Ok(response.into())
        }
    }

    fn proposer_duties(
        &self,
        epoch: Epoch,
    ) -> impl Future<Output = Result<Vec<ProposerDuty>, Error>> + Send {
        async move {
            let response: wire::ProposerDutiesResponse = self
                .call(GET_PROPOSER_DUTIES, wire::ProposerDutiesRequest { epoch })
                .await?;
            Ok(response.duties.into_iter().map(Into::into).collect())
        }
    }
}
