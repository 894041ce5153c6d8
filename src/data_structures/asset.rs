//! Native asset identifiers and per-asset balance snapshots

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::data_structures::{fixed8::Fixed8, hash::UInt256, unspent_output::UnspentOutput};
use crate::errors::{WalletError, WalletResult};

pub const NEO_ASSET_ID: &str = "c56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";
pub const GAS_ASSET_ID: &str = "602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7";

const NEO_ASSET_HASH: UInt256 = UInt256::from_wire_bytes([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe, 0x60, 0x85, 0xaf, 0x90,
    0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22, 0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33, 0x6f, 0xc5,
]);
const GAS_ASSET_HASH: UInt256 = UInt256::from_wire_bytes([
    0xe7, 0x2d, 0x28, 0x69, 0x79, 0xee, 0x6c, 0xb1, 0xb7, 0xe6, 0x5d, 0xfd, 0xdf, 0xb2, 0xe3, 0x84,
    0x10, 0x0b, 0x8d, 0x14, 0x8e, 0x77, 0x58, 0xde, 0x42, 0xe4, 0x16, 0x8b, 0x71, 0x79, 0x2c, 0x60,
]);

/// Identifier of a UTXO asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetId {
    /// The governing system asset
    Neo,
    /// The utility system asset, claimable from NEO holdings
    Gas,
    /// Any other registered UTXO asset
    Other(UInt256),
}

impl AssetId {
    /// The 32-byte id in wire order
    pub fn hash(&self) -> UInt256 {
        match self {
            AssetId::Neo => NEO_ASSET_HASH,
            AssetId::Gas => GAS_ASSET_HASH,
            AssetId::Other(hash) => *hash,
        }
    }

    /// Normalize a hash to the native variant when it names one
    pub fn from_hash(hash: UInt256) -> Self {
        if hash == AssetId::Neo.hash() {
            AssetId::Neo
        } else if hash == AssetId::Gas.hash() {
            AssetId::Gas
        } else {
            AssetId::Other(hash)
        }
    }

    /// Whole-unit assets cannot be split below one unit
    pub fn is_indivisible(&self) -> bool {
        matches!(self, AssetId::Neo)
    }

    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            AssetId::Neo => Some("NEO"),
            AssetId::Gas => Some("GAS"),
            AssetId::Other(_) => None,
        }
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash())
    }
}

impl FromStr for AssetId {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neo" => Ok(AssetId::Neo),
            "gas" => Ok(AssetId::Gas),
            other => Ok(AssetId::from_hash(other.parse()?)),
        }
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Snapshot of spendable outputs per asset, fetched for a single send
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    assets: BTreeMap<AssetId, Vec<UnspentOutput>>,
}

impl AssetBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unspent(mut self, asset: AssetId, unspent: Vec<UnspentOutput>) -> Self {
        self.insert(asset, unspent);
        self
    }

    /// Replace the outputs held for `asset`, keeping their order
    pub fn insert(&mut self, asset: AssetId, unspent: Vec<UnspentOutput>) {
        self.assets.insert(asset, unspent);
    }

    /// Outputs for `asset` in the order the source returned them
    pub fn unspent(&self, asset: &AssetId) -> &[UnspentOutput] {
        self.assets.get(asset).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self, asset: &AssetId) -> WalletResult<Fixed8> {
        Fixed8::checked_sum(self.unspent(asset).iter().map(|o| &o.value))
    }

    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.assets.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.values().all(Vec::is_empty)
    }
}
