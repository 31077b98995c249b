use core::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use tokio::task::JoinHandle;

use crate::{RpcClientError, jsonrpc};

/// Transport-level options of a single call. Callers pass them through
/// untouched; only the [`RequestManager`] interprets them.
#[derive(Clone, Debug, Default)]
pub struct TransportOptions {
    /// Headers added to this request only
    pub headers: Option<HeaderMap>,
    /// Maximum time to wait for the response
    pub timeout: Option<Duration>,
}

/// Sends JSON-RPC method calls to a node.
pub trait RequestManager: Send + Sync {
    /// Sends the call and waits for the response envelope.
    fn send(
        &self,
        call: jsonrpc::MethodCall,
        options: &TransportOptions,
    ) -> impl Future<Output = Result<jsonrpc::Response, RpcClientError>> + Send;

    /// Hands the call to the transport without waiting for the response. The
    /// returned handle can be awaited for the response or dropped.
    fn subscribe(
        &self,
        call: jsonrpc::MethodCall,
        options: &TransportOptions,
    ) -> impl Future<Output = Result<SubscriptionHandle, RpcClientError>> + Send;
}

/// A call that was handed to the transport without awaiting its response.
///
/// Dropping the handle does not cancel the call.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: jsonrpc::Id,
    task: JoinHandle<Result<jsonrpc::Response, RpcClientError>>,
}

impl SubscriptionHandle {
    /// Constructs a handle for the task that delivers the response of the
    /// request with the provided id.
    pub fn new(
        id: jsonrpc::Id,
        task: JoinHandle<Result<jsonrpc::Response, RpcClientError>>,
    ) -> Self {
        Self { id, task }
    }

    /// The id of the request
    pub fn id(&self) -> &jsonrpc::Id {
        &self.id
    }

    /// Whether the response has already been received.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the response envelope.
    pub async fn response(self) -> Result<jsonrpc::Response, RpcClientError> {
        self.task.await?
    }
}
