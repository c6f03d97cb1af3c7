//! Talk to a beacon node over whichever backend the process was configured with.
//!
//! # Overview
//!
//! A validator client needs a small set of duties from its beacon node. Two
//! interchangeable backends provide them:
//! - [rest::RestClient]: the standard Beacon API over HTTP/JSON.
//! - [rpc::RpcClient]: protobuf messages over an already-established [rpc::Channel].
//!
//! Both implement [ValidatorClient]. [new] picks exactly one of them at startup
//! from the process-wide [features::Flags] and the [NodeConnection] handed over
//! by the startup routine. The choice is made once and never revisited.
//!
//! Constructing either backend cannot fail. Bad URLs, unreachable nodes, and
//! malformed responses surface as an [Error] on first use.

use beacon_types::Epoch;
use std::future::Future;
use thiserror::Error;

mod client;
pub use client::{new, with_flags, Backend, Client};
mod connection;
pub use connection::{Connection, NodeConnection};
pub mod features;
pub mod rest;
pub mod rpc;
mod types;
pub use types::{Genesis, ProposerDuty, SyncStatus};

/// Errors that can occur when calling a beacon node.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid url {0}: {1}")]
    InvalidUrl(String, String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}: {1}")]
    Status(u16, String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Duties a validator client requires from its beacon node.
pub trait ValidatorClient: Send + Sync {
    /// Genesis parameters of the chain.
    fn genesis(&self) -> impl Future<Output = Result<Genesis, Error>> + Send;

    /// Software version reported by the node.
    fn node_version(&self) -> impl Future<Output = Result<String, Error>> + Send;

    /// Current sync status of the node.
    fn syncing(&self) -> impl Future<Output = Result<SyncStatus, Error>> + Send;

    /// Block proposers for every slot of `epoch`.
    fn proposer_duties(
        &self,
        epoch: Epoch,
    ) -> impl Future<Output = Result<Vec<ProposerDuty>, Error>> + Send;
}
