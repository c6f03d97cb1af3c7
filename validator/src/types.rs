//! Beacon node responses, in the JSON shape of the Beacon API.
//!
//! Integers are encoded as quoted decimals and byte strings as `0x` hex.

use beacon_types::{Root, Slot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    #[serde(with = "quoted")]
    pub genesis_time: u64,
    pub genesis_validators_root: Root,
    #[serde(with = "fork_version")]
    pub genesis_fork_version: [u8; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    #[serde(with = "quoted")]
    pub head_slot: Slot,
    #[serde(with = "quoted")]
    pub sync_distance: Slot,
    pub is_syncing: bool,
    #[serde(default)]
    pub is_optimistic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposerDuty {
    /// Hex-encoded BLS public key.
    pub pubkey: String,
    #[serde(with = "quoted")]
    pub validator_index: u64,
    #[serde(with = "quoted")]
    pub slot: Slot,
}

/// Encode bytes as a `0x` prefixed lowercase hex string.
pub(crate) fn hex(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut result = String::with_capacity(2 + bytes.len() * 2);
    result.push_str("0x");
    for &byte in bytes {
        result.push(HEX_CHARS[(byte >> 4) as usize] as char);
        result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
    }
    result
}

mod quoted {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Accepts both `"12"` and `12`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Quoted {
            Str(String),
            Num(u64),
        }
        match Quoted::deserialize(deserializer)? {
            Quoted::Str(s) => s.parse().map_err(de::Error::custom),
            Quoted::Num(n) => Ok(n),
        }
    }
}

mod fork_version {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 4], D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        let value = Some(digits)
            .filter(|d| d.len() == 8 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|d| u32::from_str_radix(d, 16).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid fork version: {s}")))?;
        Ok(value.to_be_bytes())
    }
}
