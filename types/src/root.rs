//! 32-byte roots and the merkleization used to summarize root vectors.

use crate::Error;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

/// A 32-byte root, hex-encoded (`0x` prefixed) in fixtures.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Root(pub [u8; 32]);

impl Root {
    pub const ZERO: Root = Root([0u8; 32]);

    /// Hash the concatenation of two roots.
    pub fn hash_pair(left: &Root, right: &Root) -> Root {
        let mut hasher = Sha256::new();
        hasher.update(left.0);
        hasher.update(right.0);
        Root(hasher.finalize().into())
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
        f.write_str("0x")?;
        for &byte in &self.0 {
            write!(
                f,
                "{}{}",
                HEX_CHARS[(byte >> 4) as usize] as char,
                HEX_CHARS[(byte & 0x0f) as usize] as char
            )?;
        }
        Ok(())
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Root {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(Error::InvalidHex(s.to_string()));
        }
        let mut out = [0u8; 32];
        for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
            let hi = nibble(chunk[0]).ok_or_else(|| Error::InvalidHex(s.to_string()))?;
            let lo = nibble(chunk[1]).ok_or_else(|| Error::InvalidHex(s.to_string()))?;
            out[i] = (hi << 4) | lo;
        }
        Ok(Root(out))
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Serialize for Root {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Root {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Compute the merkle root of a fixed-length vector of roots.
///
/// Leaves are padded with zero roots up to the next power of two. An empty
/// vector has the zero root.
pub fn merkle_root(leaves: &[Root]) -> Root {
    if leaves.is_empty() {
        return Root::ZERO;
    }
    let width = leaves.len().next_power_of_two();
    let mut layer: Vec<Root> = leaves.to_vec();
    layer.resize(width, Root::ZERO);
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| Root::hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    layer[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(b: u8) -> Root {
        Root([b; 32])
    }

    #[test]
    fn test_hex_roundtrip() {
        let root = leaf(0xab);
        let encoded = root.to_string();
        assert_eq!(encoded.len(), 66);
        assert!(encoded.starts_with("0xabab"));
        assert_eq!(encoded.parse::<Root>().unwrap(), root);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert!("0x1234".parse::<Root>().is_err());
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(bad.parse::<Root>().is_err());
    }

    #[test]
    fn test_merkle_root_single_leaf() {
        assert_eq!(merkle_root(&[leaf(1)]), leaf(1));
    }

    #[test]
    fn test_merkle_root_pads_to_power_of_two() {
        let three = merkle_root(&[leaf(1), leaf(2), leaf(3)]);
        let four = merkle_root(&[leaf(1), leaf(2), leaf(3), Root::ZERO]);
        assert_eq!(three, four);
        let expected = Root::hash_pair(
            &Root::hash_pair(&leaf(1), &leaf(2)),
            &Root::hash_pair(&leaf(3), &Root::ZERO),
        );
        assert_eq!(four, expected);
    }

    #[test]
    fn test_merkle_root_empty() {
        assert_eq!(merkle_root(&[]), Root::ZERO);
    }
}
