#![warn(missing_docs)]

//! Request managers for Ethereum JSON-RPC.
//!
//! A [`RequestManager`] owns the transport: it receives a method call and
//! returns the raw JSON-RPC response envelope, either by awaiting it directly
//! or through a [`SubscriptionHandle`].

mod client;
mod config;
mod manager;
#[cfg(feature = "test-utils")]
mod test_utils;

/// Types specific to JSON-RPC
pub mod jsonrpc;

pub use reqwest::header::{self, HeaderMap};

#[cfg(feature = "test-utils")]
pub use self::test_utils::MockRequestManager;
pub use self::{
    client::{HttpRequestManager, RpcClientError},
    config::{HttpConfig, RetryConfig},
    manager::{RequestManager, SubscriptionHandle, TransportOptions},
};
