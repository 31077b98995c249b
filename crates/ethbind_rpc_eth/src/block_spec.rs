use core::{fmt, str::FromStr};

use alloy_primitives::B256;
use ethbind_format::ConversionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A symbolic block identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockTag {
    /// The genesis block
    Earliest,
    /// The most recent block
    Latest,
    /// The block that is being built
    Pending,
    /// The most recent block that is safe from re-orgs
    Safe,
    /// The most recent finalized block
    Finalized,
}

impl BlockTag {
    /// Every tag, in the order of its declaration.
    pub const ALL: [BlockTag; 5] = [
        BlockTag::Earliest,
        BlockTag::Latest,
        BlockTag::Pending,
        BlockTag::Safe,
        BlockTag::Finalized,
    ];

    /// Returns the tag that is spelled as `keyword` on the wire, if any.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == keyword)
    }

    /// The wire spelling of the tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Earliest => "earliest",
            BlockTag::Latest => "latest",
            BlockTag::Pending => "pending",
            BlockTag::Safe => "safe",
            BlockTag::Finalized => "finalized",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block number or tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSpec {
    /// Block number
    Number(u64),
    /// Block tag
    Tag(BlockTag),
}

impl BlockSpec {
    /// Constructs a `BlockSpec` for the latest block.
    pub const fn latest() -> Self {
        Self::Tag(BlockTag::Latest)
    }

    /// Constructs a `BlockSpec` for the earliest block.
    pub const fn earliest() -> Self {
        Self::Tag(BlockTag::Earliest)
    }

    /// Constructs a `BlockSpec` for the pending block.
    pub const fn pending() -> Self {
        Self::Tag(BlockTag::Pending)
    }
}

impl Default for BlockSpec {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSpec::Number(number) => write!(f, "{number:#x}"),
            BlockSpec::Tag(tag) => tag.fmt(f),
        }
    }
}

impl From<u64> for BlockSpec {
    fn from(number: u64) -> Self {
        Self::Number(number)
    }
}

impl From<BlockTag> for BlockSpec {
    fn from(tag: BlockTag) -> Self {
        Self::Tag(tag)
    }
}

impl FromStr for BlockSpec {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(tag) = BlockTag::from_keyword(s) {
            return Ok(Self::Tag(tag));
        }

        ethbind_format::to_number(s).map(Self::Number)
    }
}

impl Serialize for BlockSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// A block hash, number or tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockId {
    /// Block hash
    Hash(B256),
    /// Block number or tag
    Spec(BlockSpec),
}

impl From<B256> for BlockId {
    fn from(hash: B256) -> Self {
        Self::Hash(hash)
    }
}

impl From<BlockSpec> for BlockId {
    fn from(spec: BlockSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        Self::Spec(tag.into())
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        Self::Spec(number.into())
    }
}
