//! Protobuf messages exchanged with the beacon node.

use crate::{types::hex, Error, Genesis, ProposerDuty, SyncStatus};
use beacon_types::Root;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GenesisResponse {
    #[prost(uint64, tag = "1")]
    pub genesis_time: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub genesis_validators_root: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub genesis_fork_version: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VersionResponse {
    #[prost(string, tag = "1")]
    pub version: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SyncStatusResponse {
    #[prost(uint64, tag = "1")]
    pub head_slot: u64,
    #[prost(uint64, tag = "2")]
    pub sync_distance: u64,
    #[prost(bool, tag = "3")]
    pub is_syncing: bool,
    #[prost(bool, tag = "4")]
    pub is_optimistic: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProposerDutiesRequest {
    #[prost(uint64, tag = "1")]
    pub epoch: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProposerDutyMessage {
    #[prost(bytes = "vec", tag = "1")]
    pub pubkey: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub validator_index: u64,
    #[prost(uint64, tag = "3")]
    pub slot: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ProposerDutiesResponse {
    #[prost(message, repeated, tag = "1")]
    pub duties: Vec<ProposerDutyMessage>,
}

impl TryFrom<GenesisResponse> for Genesis {
    type Error = Error;

    fn try_from(msg: GenesisResponse) -> Result<Self, Self::Error> {
        let root: [u8; 32] = msg.genesis_validators_root.as_slice().try_into().map_err(|_| {
            Error::InvalidResponse(format!(
                "genesis_validators_root has {} bytes",
                msg.genesis_validators_root.len()
            ))
        })?;
        let version: [u8; 4] = msg.genesis_fork_version.as_slice().try_into().map_err(|_| {
            Error::InvalidResponse(format!(
                "genesis_fork_version has {} bytes",
                msg.genesis_fork_version.len()
            ))
        })?;
        Ok(Genesis {
            genesis_time: msg.genesis_time,
            genesis_validators_root: Root(root),
            genesis_fork_version: version,
        })
    }
}

impl From<SyncStatusResponse> for SyncStatus {
    fn from(msg: SyncStatusResponse) -> Self {
        SyncStatus {
            head_slot: msg.head_slot,
            sync_distance: msg.sync_distance,
            is_syncing: msg.is_syncing,
            is_optimistic: msg.is_optimistic,
        }
    }
}

impl From<ProposerDutyMessage> for ProposerDuty {
    fn from(msg: ProposerDutyMessage) -> Self {
        ProposerDuty {
            pubkey: hex(&msg.pubkey),
            validator_index: msg.validator_index,
            slot: msg.slot,
        }
    }
}
