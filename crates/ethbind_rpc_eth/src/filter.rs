use alloy_primitives::{Address, B256};
use serde::Serialize;

use crate::BlockSpec;

/// A value that can be provided once or as a list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OneOrMore<T> {
    /// A single value
    One(T),
    /// A list of values
    Many(Vec<T>),
}

impl<T> From<T> for OneOrMore<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMore<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

/// Criteria of `eth_getLogs` and `eth_newFilter`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilterOptions {
    /// First block of the range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_block: Option<BlockSpec>,
    /// Last block of the range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<BlockSpec>,
    /// A single block. Excludes `from_block` and `to_block`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    /// Contract address(es) that emitted the logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OneOrMore<Address>>,
    /// Positional topic filters. `None` matches any topic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Option<OneOrMore<B256>>>>,
}
