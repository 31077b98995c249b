use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{
    Client as HttpClient,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use reqwest_middleware::{ClientBuilder as HttpClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
#[cfg(feature = "tracing")]
use reqwest_tracing::TracingMiddleware;

use crate::{
    HttpConfig, RequestManager, SubscriptionHandle, TransportOptions,
    jsonrpc::{self, MethodCall},
};

// Retry parameters for rate limited requests.
const EXPONENT_BASE: u32 = 2;

/// Specialized error types
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    /// The message could not be sent to the remote node
    #[error(transparent)]
    FailedToSend(reqwest_middleware::Error),

    /// The remote node failed to reply with the body of the response
    #[error("The response text was corrupted: {0}.")]
    CorruptedResponse(reqwest::Error),

    /// The server returned an error code.
    #[error("The Http server returned error status code: {0}")]
    HttpStatus(reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to construct the HTTP client: {0}")]
    HttpClient(reqwest::Error),

    /// A configured header is not a valid HTTP header.
    #[error("Invalid HTTP header '{name}'")]
    InvalidHeader {
        /// The header name
        name: String,
    },

    /// The request cannot be serialized as JSON.
    #[error(transparent)]
    InvalidJsonRequest(serde_json::Error),

    /// The server returned an invalid JSON-RPC response.
    #[error("Response '{response}' failed to parse as a JSON-RPC response, due to error: '{error}'")]
    InvalidResponse {
        /// The response text
        response: String,
        /// The parse error
        error: serde_json::Error,
    },

    /// The server returned an invalid JSON-RPC id.
    #[error("The server returned an invalid id: '{id:?}' in response: '{response}'")]
    InvalidId {
        /// The response text
        response: String,
        /// The invalid id
        id: jsonrpc::Id,
    },

    /// Invalid URL format
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to join a tokio task.
    #[error(transparent)]
    JoinError(#[from] tokio::task::JoinError),
}

/// A [`RequestManager`] that posts JSON-RPC requests to a node over HTTP.
///
/// Transient failures, e.g. rate limiting, are retried with exponential
/// backoff.
#[derive(Debug)]
pub struct HttpRequestManager {
    url: url::Url,
    client: ClientWithMiddleware,
    next_id: AtomicU64,
}

impl HttpRequestManager {
    /// Creates a new instance, given a remote node URL.
    pub fn new(config: HttpConfig) -> Result<Self, RpcClientError> {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry.min_interval(), config.retry.max_interval())
            .base(EXPONENT_BASE)
            .build_with_max_retries(config.retry.max_retries);

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let invalid_header = || RpcClientError::InvalidHeader { name: name.clone() };

            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|_error| invalid_header())?;
            let header_value = HeaderValue::from_str(value).map_err(|_error| invalid_header())?;
            headers.append(header_name, header_value);
        }

        headers.append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("ethbind {}", env!("CARGO_PKG_VERSION")));
        headers.append(
            header::USER_AGENT,
            HeaderValue::from_str(&user_agent).map_err(|_error| RpcClientError::InvalidHeader {
                name: header::USER_AGENT.to_string(),
            })?,
        );

        let client = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(RpcClientError::HttpClient)?;

        #[cfg(feature = "tracing")]
        let client = HttpClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        #[cfg(not(feature = "tracing"))]
        let client = HttpClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            url: config.url.parse()?,
            client,
            next_id: AtomicU64::new(0),
        })
    }

    /// The node's endpoint
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    fn serialize_request(
        &self,
        call: MethodCall,
    ) -> Result<(jsonrpc::Id, SerializedRequest), RpcClientError> {
        let id = jsonrpc::Id::Num(self.next_id.fetch_add(1, Ordering::Relaxed));
        let request = serde_json::to_string(&jsonrpc::Request::new(call, id.clone()))
            .map_err(RpcClientError::InvalidJsonRequest)?;

        Ok((id, SerializedRequest(request)))
    }
}

impl RequestManager for HttpRequestManager {
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn send(
        &self,
        call: MethodCall,
        options: &TransportOptions,
    ) -> Result<jsonrpc::Response, RpcClientError> {
        let (id, request) = self.serialize_request(call)?;

        send_request(&self.client, &self.url, &id, &request, options).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all))]
    async fn subscribe(
        &self,
        call: MethodCall,
        options: &TransportOptions,
    ) -> Result<SubscriptionHandle, RpcClientError> {
        let (id, request) = self.serialize_request(call)?;

        let client = self.client.clone();
        let url = self.url.clone();
        let options = options.clone();
        let task_id = id.clone();
        let task = tokio::spawn(async move {
            send_request(&client, &url, &task_id, &request, &options).await
        });

        Ok(SubscriptionHandle::new(id, task))
    }
}

async fn send_request(
    client: &ClientWithMiddleware,
    url: &url::Url,
    id: &jsonrpc::Id,
    request: &SerializedRequest,
    options: &TransportOptions,
) -> Result<jsonrpc::Response, RpcClientError> {
    log::trace!("Sending JSON-RPC request: {}", request.0);

    let response = send_request_body(client, url, request, options).await?;
    log::trace!("Received JSON-RPC response: {response}");

    let parsed: jsonrpc::Response = match serde_json::from_str(&response) {
        Ok(parsed) => parsed,
        Err(error) => return Err(RpcClientError::InvalidResponse { response, error }),
    };

    if parsed.id != *id {
        return Err(RpcClientError::InvalidId {
            response,
            id: parsed.id,
        });
    }

    Ok(parsed)
}

async fn send_request_body(
    client: &ClientWithMiddleware,
    url: &url::Url,
    request: &SerializedRequest,
    options: &TransportOptions,
) -> Result<String, RpcClientError> {
    let mut builder = client.post(url.clone()).body(request.0.clone());
    if let Some(headers) = &options.headers {
        builder = builder.headers(headers.clone());
    }
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .send()
        .await
        .map_err(RpcClientError::FailedToSend)?
        .error_for_status()
        .map_err(RpcClientError::HttpStatus)?
        .text()
        .await
        .map_err(RpcClientError::CorruptedResponse)
}

#[derive(Clone, Debug)]
struct SerializedRequest(String);
