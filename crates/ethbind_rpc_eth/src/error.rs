use ethbind_rpc_client::{RpcClientError, jsonrpc};

use crate::{dispatch::DispatchError, normalize::NormalizeError};

/// An error that occurs when calling a method.
#[derive(Debug, thiserror::Error)]
pub enum EthClientError {
    /// The call could not be dispatched. Nothing was sent.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// The request manager failed to deliver the call or its response.
    #[error("Failed to send {method}: {source}")]
    Transport {
        /// The method name
        method: String,
        /// The transport error
        #[source]
        source: RpcClientError,
    },
    /// The node returned an error.
    #[error("{method} failed: {error}")]
    Protocol {
        /// The method name
        method: String,
        /// The JSON-RPC error
        #[source]
        error: jsonrpc::Error,
    },
    /// The result couldn't be converted into the requested representation.
    #[error("Failed to normalize the result of {method}: {source}")]
    Normalize {
        /// The method name
        method: String,
        /// The normalization error
        #[source]
        source: NormalizeError,
    },
}

impl EthClientError {
    /// Returns the JSON-RPC error, if the node returned one.
    pub fn rpc_error(&self) -> Option<&jsonrpc::Error> {
        match self {
            EthClientError::Protocol { error, .. } => Some(error),
            _ => None,
        }
    }
}
