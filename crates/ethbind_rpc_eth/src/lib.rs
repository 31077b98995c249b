#![warn(missing_docs)]

//! A client for the Ethereum JSON-RPC API.
//!
//! Calls go through three stages: the [`dispatch`] stage encodes the
//! parameters of a method, a [`ethbind_rpc_client::RequestManager`] sends it,
//! and the [`normalize`] stage converts the quantities of the result into the
//! requested [`ethbind_format::Representation`].

mod block_spec;
mod client;
mod config;
mod error;
mod filter;
mod transaction_request;

/// Encoding of method parameters
pub mod dispatch;
pub mod methods;
/// Conversion of result quantities
pub mod normalize;

pub use ethbind_format::Representation;

pub use self::{
    block_spec::{BlockId, BlockSpec, BlockTag},
    client::{Call, Dispatched, EthClient, PendingCall},
    config::ClientConfig,
    error::EthClientError,
    filter::{LogFilterOptions, OneOrMore},
    transaction_request::{AccessListItem, TransactionRequest},
};
