use alloy_primitives::{Address, B256, Bytes};
use ethbind_format::Numeral;
use serde::Serialize;

/// A transaction object, as accepted by `eth_call`, `eth_estimateGas`,
/// `eth_sendTransaction` and `eth_signTransaction`.
///
/// Quantities may be provided in any form accepted by
/// [`ethbind_format::convert`]; they are encoded as hexadecimal when the call
/// is dispatched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// The sender. Defaults to the client's default account, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// The recipient. `None` for contract creations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Gas limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<Numeral>,
    /// Legacy gas price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<Numeral>,
    /// EIP-1559 fee cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<Numeral>,
    /// EIP-1559 priority fee cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<Numeral>,
    /// EIP-4844 blob fee cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_blob_gas: Option<Numeral>,
    /// Transferred value, in wei
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Numeral>,
    /// Call data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    /// Sender nonce
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<Numeral>,
    /// EIP-155 chain id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Numeral>,
    /// Transaction type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Numeral>,
    /// EIP-2930 access list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_list: Option<Vec<AccessListItem>>,
    /// EIP-4844 versioned blob hashes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_versioned_hashes: Option<Vec<B256>>,
}

/// An entry of an EIP-2930 access list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    /// Accessed address
    pub address: Address,
    /// Accessed storage keys
    pub storage_keys: Vec<B256>,
}
