use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::Mutex;
use serde_json::Value;

use crate::{
    RequestManager, RpcClientError, SubscriptionHandle, TransportOptions,
    jsonrpc::{self, MethodCall},
};

/// JSON-RPC error code for methods the node doesn't know.
const METHOD_NOT_FOUND: i64 = -32601;

/// An in-memory [`RequestManager`] that replies with canned responses per
/// method and records every call it receives.
#[derive(Debug, Default)]
pub struct MockRequestManager {
    responses: HashMap<String, jsonrpc::ResponseData>,
    calls: Mutex<Vec<MethodCall>>,
    next_id: AtomicU64,
}

impl MockRequestManager {
    /// Constructs a manager without canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies to calls of `method` with the provided result.
    pub fn with_result(mut self, method: impl Into<String>, result: Value) -> Self {
        self.responses
            .insert(method.into(), jsonrpc::ResponseData::Success { result });
        self
    }

    /// Replies to calls of `method` with the provided error.
    pub fn with_error(mut self, method: impl Into<String>, error: jsonrpc::Error) -> Self {
        self.responses
            .insert(method.into(), jsonrpc::ResponseData::Error { error });
        self
    }

    /// The calls received so far, in order.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.calls.lock().clone()
    }

    /// The last call received, if any.
    pub fn last_call(&self) -> Option<MethodCall> {
        self.calls.lock().last().cloned()
    }

    fn respond(&self, call: MethodCall) -> jsonrpc::Response {
        let id = jsonrpc::Id::Num(self.next_id.fetch_add(1, Ordering::Relaxed));
        let response = match self.responses.get(&call.method) {
            Some(jsonrpc::ResponseData::Success { result }) => {
                jsonrpc::Response::success(id, result.clone())
            }
            Some(jsonrpc::ResponseData::Error { error }) => {
                jsonrpc::Response::error(id, error.clone())
            }
            None => jsonrpc::Response::error(
                id,
                jsonrpc::Error::new(
                    METHOD_NOT_FOUND,
                    format!("the method {} does not exist/is not available", call.method),
                ),
            ),
        };

        log::trace!("Mocked response to '{}': {:?}", call.method, response.data);
        self.calls.lock().push(call);

        response
    }
}

impl RequestManager for MockRequestManager {
    async fn send(
        &self,
        call: MethodCall,
        _options: &TransportOptions,
    ) -> Result<jsonrpc::Response, RpcClientError> {
        Ok(self.respond(call))
    }

    async fn subscribe(
        &self,
        call: MethodCall,
        _options: &TransportOptions,
    ) -> Result<SubscriptionHandle, RpcClientError> {
        let response = self.respond(call);
        let id = response.id.clone();
        let task = tokio::spawn(async move { Ok(response) });

        Ok(SubscriptionHandle::new(id, task))
    }
}
