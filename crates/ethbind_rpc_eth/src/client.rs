use core::{future::IntoFuture, pin::Pin};
use std::future::Future;

use alloy_primitives::{Address, B64, B256, Bytes, U256};
use ethbind_format::Representation;
use ethbind_rpc_client::{
    HttpConfig, HttpRequestManager, RequestManager, RpcClientError, SubscriptionHandle,
    TransportOptions, jsonrpc,
};
use serde_json::Value;

use crate::{
    BlockId, BlockSpec, ClientConfig, EthClientError, LogFilterOptions, TransactionRequest,
    dispatch::{self, CallDescriptor, CallOptions, DeliveryMode, DispatchError},
    methods::{self, MethodSpec, ResultFormat},
    normalize::normalize,
};

macro_rules! params {
    ($($param:expr),+ $(,)?) => {
        [$(serde_json::to_value($param)),+]
            .into_iter()
            .collect::<Result<Vec<Value>, serde_json::Error>>()
    };
}

/// A client for the Ethereum JSON-RPC API.
///
/// Every method returns a [`Call`], which can be awaited directly or
/// customized first:
///
/// ```no_run
/// # use ethbind_rpc_client::HttpRequestManager;
/// # use ethbind_rpc_eth::{EthClient, EthClientError};
/// # async fn example(client: EthClient<HttpRequestManager>) -> Result<(), EthClientError> {
/// use ethbind_format::Representation;
///
/// let block_number = client.block_number().await?;
/// let gas_price = client
///     .gas_price()
///     .representation(Representation::Decimal)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EthClient<R> {
    manager: R,
    config: ClientConfig,
}

impl EthClient<HttpRequestManager> {
    /// Creates a client that sends its calls over HTTP.
    pub fn with_http(http: HttpConfig, config: ClientConfig) -> Result<Self, RpcClientError> {
        Ok(Self::new(HttpRequestManager::new(http)?, config))
    }
}

impl<R: RequestManager> EthClient<R> {
    /// Creates a client that sends its calls through the provided manager.
    pub fn new(manager: R, config: ClientConfig) -> Self {
        Self { manager, config }
    }

    /// The client's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The request manager
    pub fn manager(&self) -> &R {
        &self.manager
    }

    /// Sends a dispatched call, delivering its result according to the call's
    /// [`DeliveryMode`].
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub async fn execute(&self, descriptor: CallDescriptor) -> Result<Dispatched, EthClientError> {
        match descriptor.options.mode {
            DeliveryMode::Send => self.send_descriptor(descriptor).await.map(Dispatched::Result),
            DeliveryMode::Subscribe => self
                .subscribe_descriptor(descriptor)
                .await
                .map(Dispatched::Pending),
        }
    }

    /// Calls any method by name. The parameters of known methods are encoded
    /// and their results normalized. Other methods are sent and returned as
    /// provided.
    pub fn request(&self, method: &str, params: Vec<Value>) -> Call<'_, R> {
        let target = MethodSpec::by_name(method)
            .map_or_else(|| CallTarget::Unknown(method.to_owned()), CallTarget::Known);

        Call::new(self, target, Ok(params))
    }

    /// eth_protocolVersion
    pub fn protocol_version(&self) -> Call<'_, R> {
        self.call(&methods::PROTOCOL_VERSION, Ok(Vec::new()))
    }

    /// eth_syncing. Returns `false` or the sync status.
    pub fn syncing(&self) -> Call<'_, R> {
        self.call(&methods::SYNCING, Ok(Vec::new()))
    }

    /// eth_coinbase
    pub fn coinbase(&self) -> Call<'_, R> {
        self.call(&methods::COINBASE, Ok(Vec::new()))
    }

    /// eth_mining
    pub fn mining(&self) -> Call<'_, R> {
        self.call(&methods::MINING, Ok(Vec::new()))
    }

    /// eth_hashrate
    pub fn hashrate(&self) -> Call<'_, R> {
        self.call(&methods::HASHRATE, Ok(Vec::new()))
    }

    /// eth_gasPrice
    pub fn gas_price(&self) -> Call<'_, R> {
        self.call(&methods::GAS_PRICE, Ok(Vec::new()))
    }

    /// eth_maxPriorityFeePerGas
    pub fn max_priority_fee_per_gas(&self) -> Call<'_, R> {
        self.call(&methods::MAX_PRIORITY_FEE_PER_GAS, Ok(Vec::new()))
    }

    /// eth_accounts
    pub fn accounts(&self) -> Call<'_, R> {
        self.call(&methods::ACCOUNTS, Ok(Vec::new()))
    }

    /// eth_requestAccounts
    pub fn request_accounts(&self) -> Call<'_, R> {
        self.call(&methods::REQUEST_ACCOUNTS, Ok(Vec::new()))
    }

    /// eth_blockNumber
    pub fn block_number(&self) -> Call<'_, R> {
        self.call(&methods::BLOCK_NUMBER, Ok(Vec::new()))
    }

    /// eth_chainId
    pub fn chain_id(&self) -> Call<'_, R> {
        self.call(&methods::CHAIN_ID, Ok(Vec::new()))
    }

    /// eth_getBalance. Uses the default block if `block` is `None`.
    pub fn get_balance(&self, address: Address, block: Option<BlockSpec>) -> Call<'_, R> {
        self.call(
            &methods::GET_BALANCE,
            params![address, self.block_or_default(block)],
        )
    }

    /// eth_getStorageAt
    pub fn get_storage_at(
        &self,
        address: Address,
        position: U256,
        block: Option<BlockSpec>,
    ) -> Call<'_, R> {
        self.call(
            &methods::GET_STORAGE_AT,
            params![address, position, self.block_or_default(block)],
        )
    }

    /// eth_getCode
    pub fn get_code(&self, address: Address, block: Option<BlockSpec>) -> Call<'_, R> {
        self.call(
            &methods::GET_CODE,
            params![address, self.block_or_default(block)],
        )
    }

    /// eth_getBlockByHash or eth_getBlockByNumber. Returns `null` for unknown
    /// blocks.
    pub fn get_block(&self, block: impl Into<BlockId>, full_transactions: bool) -> Call<'_, R> {
        match block.into() {
            BlockId::Hash(hash) => self.call(
                &methods::GET_BLOCK_BY_HASH,
                params![hash, full_transactions],
            ),
            BlockId::Spec(spec) => self.call(
                &methods::GET_BLOCK_BY_NUMBER,
                params![spec, full_transactions],
            ),
        }
    }

    /// eth_getBlockTransactionCountByHash or
    /// eth_getBlockTransactionCountByNumber
    pub fn get_block_transaction_count(&self, block: impl Into<BlockId>) -> Call<'_, R> {
        match block.into() {
            BlockId::Hash(hash) => {
                self.call(&methods::GET_BLOCK_TRANSACTION_COUNT_BY_HASH, params![hash])
            }
            BlockId::Spec(spec) => {
                self.call(&methods::GET_BLOCK_TRANSACTION_COUNT_BY_NUMBER, params![spec])
            }
        }
    }

    /// eth_getUncleCountByBlockHash or eth_getUncleCountByBlockNumber
    pub fn get_uncle_count(&self, block: impl Into<BlockId>) -> Call<'_, R> {
        match block.into() {
            BlockId::Hash(hash) => {
                self.call(&methods::GET_UNCLE_COUNT_BY_BLOCK_HASH, params![hash])
            }
            BlockId::Spec(spec) => {
                self.call(&methods::GET_UNCLE_COUNT_BY_BLOCK_NUMBER, params![spec])
            }
        }
    }

    /// eth_getUncleByBlockHashAndIndex or eth_getUncleByBlockNumberAndIndex
    pub fn get_uncle(&self, block: impl Into<BlockId>, index: u64) -> Call<'_, R> {
        match block.into() {
            BlockId::Hash(hash) => self.call(
                &methods::GET_UNCLE_BY_BLOCK_HASH_AND_INDEX,
                params![hash, index],
            ),
            BlockId::Spec(spec) => self.call(
                &methods::GET_UNCLE_BY_BLOCK_NUMBER_AND_INDEX,
                params![spec, index],
            ),
        }
    }

    /// eth_getTransactionByHash
    pub fn get_transaction(&self, hash: B256) -> Call<'_, R> {
        self.call(&methods::GET_TRANSACTION_BY_HASH, params![hash])
    }

    /// eth_getTransactionByBlockHashAndIndex or
    /// eth_getTransactionByBlockNumberAndIndex
    pub fn get_transaction_from_block(&self, block: impl Into<BlockId>, index: u64) -> Call<'_, R> {
        match block.into() {
            BlockId::Hash(hash) => self.call(
                &methods::GET_TRANSACTION_BY_BLOCK_HASH_AND_INDEX,
                params![hash, index],
            ),
            BlockId::Spec(spec) => self.call(
                &methods::GET_TRANSACTION_BY_BLOCK_NUMBER_AND_INDEX,
                params![spec, index],
            ),
        }
    }

    /// eth_pendingTransactions
    pub fn pending_transactions(&self) -> Call<'_, R> {
        self.call(&methods::PENDING_TRANSACTIONS, Ok(Vec::new()))
    }

    /// eth_getTransactionReceipt. Returns `null` for unknown or pending
    /// transactions.
    pub fn get_transaction_receipt(&self, hash: B256) -> Call<'_, R> {
        self.call(&methods::GET_TRANSACTION_RECEIPT, params![hash])
    }

    /// eth_getTransactionCount
    pub fn get_transaction_count(&self, address: Address, block: Option<BlockSpec>) -> Call<'_, R> {
        self.call(
            &methods::GET_TRANSACTION_COUNT,
            params![address, self.block_or_default(block)],
        )
    }

    /// eth_sendTransaction
    pub fn send_transaction(&self, transaction: TransactionRequest) -> Call<'_, R> {
        self.call(
            &methods::SEND_TRANSACTION,
            params![self.with_default_account(transaction)],
        )
    }

    /// eth_sendRawTransaction
    pub fn send_raw_transaction(&self, transaction: Bytes) -> Call<'_, R> {
        self.call(&methods::SEND_RAW_TRANSACTION, params![transaction])
    }

    /// eth_sign
    pub fn sign(&self, address: Address, message: Bytes) -> Call<'_, R> {
        self.call(&methods::SIGN, params![address, message])
    }

    /// eth_signTransaction
    pub fn sign_transaction(&self, transaction: TransactionRequest) -> Call<'_, R> {
        self.call(
            &methods::SIGN_TRANSACTION,
            params![self.with_default_account(transaction)],
        )
    }

    /// eth_call
    pub fn call_contract(
        &self,
        transaction: TransactionRequest,
        block: Option<BlockSpec>,
    ) -> Call<'_, R> {
        self.call(
            &methods::CALL,
            params![
                self.with_default_account(transaction),
                self.block_or_default(block)
            ],
        )
    }

    /// eth_estimateGas
    pub fn estimate_gas(&self, transaction: TransactionRequest) -> Call<'_, R> {
        self.call(
            &methods::ESTIMATE_GAS,
            params![self.with_default_account(transaction)],
        )
    }

    /// eth_feeHistory
    pub fn fee_history(
        &self,
        block_count: u64,
        newest_block: BlockSpec,
        reward_percentiles: Vec<f64>,
    ) -> Call<'_, R> {
        self.call(
            &methods::FEE_HISTORY,
            params![block_count, newest_block, reward_percentiles],
        )
    }

    /// eth_getLogs
    pub fn get_logs(&self, filter: LogFilterOptions) -> Call<'_, R> {
        self.call(&methods::GET_LOGS, params![filter])
    }

    /// eth_getProof
    pub fn get_proof(
        &self,
        address: Address,
        storage_keys: Vec<B256>,
        block: Option<BlockSpec>,
    ) -> Call<'_, R> {
        self.call(
            &methods::GET_PROOF,
            params![address, storage_keys, self.block_or_default(block)],
        )
    }

    /// eth_getWork
    pub fn get_work(&self) -> Call<'_, R> {
        self.call(&methods::GET_WORK, Ok(Vec::new()))
    }

    /// eth_submitWork
    pub fn submit_work(&self, nonce: B64, pow_hash: B256, mix_digest: B256) -> Call<'_, R> {
        self.call(&methods::SUBMIT_WORK, params![nonce, pow_hash, mix_digest])
    }

    /// eth_submitHashrate. The hashrate is sent as a 32-byte value.
    pub fn submit_hashrate(&self, hashrate: U256, id: B256) -> Call<'_, R> {
        self.call(&methods::SUBMIT_HASHRATE, params![hashrate, id])
    }

    /// eth_newFilter
    pub fn new_filter(&self, filter: LogFilterOptions) -> Call<'_, R> {
        self.call(&methods::NEW_FILTER, params![filter])
    }

    /// eth_newBlockFilter
    pub fn new_block_filter(&self) -> Call<'_, R> {
        self.call(&methods::NEW_BLOCK_FILTER, Ok(Vec::new()))
    }

    /// eth_newPendingTransactionFilter
    pub fn new_pending_transaction_filter(&self) -> Call<'_, R> {
        self.call(&methods::NEW_PENDING_TRANSACTION_FILTER, Ok(Vec::new()))
    }

    /// eth_getFilterChanges
    pub fn get_filter_changes(&self, filter_id: U256) -> Call<'_, R> {
        self.call(&methods::GET_FILTER_CHANGES, params![filter_id])
    }

    /// eth_getFilterLogs
    pub fn get_filter_logs(&self, filter_id: U256) -> Call<'_, R> {
        self.call(&methods::GET_FILTER_LOGS, params![filter_id])
    }

    /// eth_uninstallFilter
    pub fn uninstall_filter(&self, filter_id: U256) -> Call<'_, R> {
        self.call(&methods::UNINSTALL_FILTER, params![filter_id])
    }

    /// net_version
    pub fn network_id(&self) -> Call<'_, R> {
        self.call(&methods::NET_VERSION, Ok(Vec::new()))
    }

    /// net_listening
    pub fn net_listening(&self) -> Call<'_, R> {
        self.call(&methods::NET_LISTENING, Ok(Vec::new()))
    }

    /// net_peerCount
    pub fn peer_count(&self) -> Call<'_, R> {
        self.call(&methods::NET_PEER_COUNT, Ok(Vec::new()))
    }

    /// web3_clientVersion
    pub fn client_version(&self) -> Call<'_, R> {
        self.call(&methods::WEB3_CLIENT_VERSION, Ok(Vec::new()))
    }

    fn call(
        &self,
        method: &'static MethodSpec,
        params: Result<Vec<Value>, serde_json::Error>,
    ) -> Call<'_, R> {
        Call::new(self, CallTarget::Known(method), params)
    }

    fn block_or_default(&self, block: Option<BlockSpec>) -> BlockSpec {
        block.unwrap_or(self.config.default_block)
    }

    fn with_default_account(&self, mut transaction: TransactionRequest) -> TransactionRequest {
        if transaction.from.is_none() {
            transaction.from = self.config.default_account;
        }
        transaction
    }

    fn representation(&self, options: &CallOptions) -> Representation {
        options
            .representation
            .unwrap_or(self.config.default_representation)
    }

    async fn send_descriptor(&self, descriptor: CallDescriptor) -> Result<Value, EthClientError> {
        let representation = self.representation(&descriptor.options);
        let call = descriptor.to_method_call();

        let response = self
            .manager
            .send(call, &descriptor.options.transport)
            .await
            .map_err(|source| EthClientError::Transport {
                method: descriptor.method.clone(),
                source,
            })?;

        finish(&descriptor.method, &descriptor.result, representation, response)
    }

    async fn subscribe_descriptor(
        &self,
        descriptor: CallDescriptor,
    ) -> Result<PendingCall, EthClientError> {
        let representation = self.representation(&descriptor.options);
        let call = descriptor.to_method_call();

        let handle = self
            .manager
            .subscribe(call, &descriptor.options.transport)
            .await
            .map_err(|source| EthClientError::Transport {
                method: descriptor.method.clone(),
                source,
            })?;

        Ok(PendingCall {
            method: descriptor.method,
            result: descriptor.result,
            representation,
            handle,
        })
    }
}

fn finish(
    method: &str,
    format: &ResultFormat,
    representation: Representation,
    response: jsonrpc::Response,
) -> Result<Value, EthClientError> {
    match response.data.into_result() {
        Ok(result) => normalize(result, format, representation).map_err(|source| {
            EthClientError::Normalize {
                method: method.to_owned(),
                source,
            }
        }),
        Err(error) => {
            log::warn!("{method} returned an error: {error}");

            Err(EthClientError::Protocol {
                method: method.to_owned(),
                error,
            })
        }
    }
}

/// The outcome of [`EthClient::execute`]
#[derive(Debug)]
pub enum Dispatched {
    /// The normalized result of a call that was sent
    Result(Value),
    /// A call that was handed to the transport
    Pending(PendingCall),
}

/// A call that was handed to the transport without awaiting its response.
///
/// Dropping it doesn't cancel the call.
#[derive(Debug)]
pub struct PendingCall {
    method: String,
    result: ResultFormat,
    representation: Representation,
    handle: SubscriptionHandle,
}

impl PendingCall {
    /// The method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The id of the request
    pub fn id(&self) -> &jsonrpc::Id {
        self.handle.id()
    }

    /// Whether the response has already been received.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the response and normalizes its result.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(self), fields(method = %self.method))
    )]
    pub async fn result(self) -> Result<Value, EthClientError> {
        let response = self
            .handle
            .response()
            .await
            .map_err(|source| EthClientError::Transport {
                method: self.method.clone(),
                source,
            })?;

        finish(&self.method, &self.result, self.representation, response)
    }
}

#[derive(Clone, Debug)]
enum CallTarget {
    Known(&'static MethodSpec),
    Unknown(String),
}

impl CallTarget {
    fn name(&self) -> &str {
        match self {
            CallTarget::Known(method) => method.name,
            CallTarget::Unknown(method) => method,
        }
    }
}

/// A method call that hasn't been sent yet.
///
/// Awaiting it sends the call and returns the normalized result.
#[must_use = "calls are only sent when awaited"]
#[derive(Debug)]
pub struct Call<'client, R> {
    client: &'client EthClient<R>,
    target: CallTarget,
    params: Result<Vec<Value>, serde_json::Error>,
    options: CallOptions,
}

impl<'client, R> Call<'client, R> {
    fn new(
        client: &'client EthClient<R>,
        target: CallTarget,
        params: Result<Vec<Value>, serde_json::Error>,
    ) -> Self {
        Self {
            client,
            target,
            params,
            options: CallOptions::default(),
        }
    }

    /// Overrides the representation of the result's quantities.
    pub fn representation(mut self, representation: Representation) -> Self {
        self.options = self.options.with_representation(representation);
        self
    }

    /// Sets the options passed to the request manager.
    pub fn transport(mut self, transport: TransportOptions) -> Self {
        self.options = self.options.with_transport(transport);
        self
    }

    /// Replaces all per-call options.
    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Encodes the call without sending it.
    pub fn descriptor(self) -> Result<CallDescriptor, DispatchError> {
        let params = self
            .params
            .map_err(|source| DispatchError::Serialization {
                method: self.target.name().to_owned(),
                source,
            })?;

        match self.target {
            CallTarget::Known(method) => dispatch::build_call(method, params, self.options),
            CallTarget::Unknown(method) => {
                Ok(dispatch::build_raw_call(method, params, self.options))
            }
        }
    }
}

impl<'client, R: RequestManager> Call<'client, R> {
    /// Sends the call and waits for its normalized result.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(method = %self.target.name()))
    )]
    pub async fn send(mut self) -> Result<Value, EthClientError> {
        self.options.mode = DeliveryMode::Send;
        let client = self.client;
        client.send_descriptor(self.descriptor()?).await
    }

    /// Hands the call to the transport and returns without waiting for its
    /// response.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(method = %self.target.name()))
    )]
    pub async fn subscribe(mut self) -> Result<PendingCall, EthClientError> {
        self.options.mode = DeliveryMode::Subscribe;
        let client = self.client;
        client.subscribe_descriptor(self.descriptor()?).await
    }
}

impl<'client, R: RequestManager + 'client> IntoFuture for Call<'client, R> {
    type Output = Result<Value, EthClientError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'client>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

#[cfg(test)]
mod tests {
    use ethbind_rpc_client::MockRequestManager;
    use serde_json::json;

    use super::*;
    use crate::BlockTag;

    fn address() -> Address {
        Address::repeat_byte(0x11)
    }

    #[tokio::test]
    async fn balance_with_default_block() -> anyhow::Result<()> {
        let manager = MockRequestManager::new().with_result("eth_getBalance", json!("0x64"));
        let client = EthClient::new(manager, ClientConfig::default());

        let balance = client.get_balance(address(), None).await?;
        assert_eq!(balance, json!(100));

        let call = client.manager().last_call().expect("call was recorded");
        assert_eq!(call.method, "eth_getBalance");
        assert_eq!(call.params[1], json!("latest"));

        Ok(())
    }

    #[tokio::test]
    async fn balance_at_block_number() -> anyhow::Result<()> {
        let manager = MockRequestManager::new().with_result("eth_getBalance", json!("0x64"));
        let client = EthClient::new(manager, ClientConfig::default());

        let balance = client
            .get_balance(address(), Some(BlockSpec::Number(100)))
            .representation(Representation::Hex)
            .await?;
        assert_eq!(balance, json!("0x64"));

        let call = client.manager().last_call().expect("call was recorded");
        assert_eq!(call.params[1], json!("0x64"));

        Ok(())
    }

    #[tokio::test]
    async fn configured_defaults() -> anyhow::Result<()> {
        let manager = MockRequestManager::new().with_result("eth_call", json!("0x"));
        let config = ClientConfig {
            default_block: BlockSpec::Tag(BlockTag::Safe),
            default_account: Some(Address::repeat_byte(0xaa)),
            ..ClientConfig::default()
        };
        let client = EthClient::new(manager, config);
        assert_eq!(client.config().default_block, BlockSpec::Tag(BlockTag::Safe));

        let transaction = TransactionRequest {
            to: Some(address()),
            ..TransactionRequest::default()
        };
        client.call_contract(transaction, None).await?;

        let call = client.manager().last_call().expect("call was recorded");
        assert_eq!(
            call.params,
            vec![
                json!({
                    "from": serde_json::to_value(Address::repeat_byte(0xaa))?,
                    "to": "0x1111111111111111111111111111111111111111",
                }),
                json!("safe"),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn protocol_error() {
        let manager = MockRequestManager::new().with_error(
            "eth_getTransactionByHash",
            jsonrpc::Error::new(-32000, "unknown transaction"),
        );
        let client = EthClient::new(manager, ClientConfig::default());

        let error = client
            .get_transaction(B256::ZERO)
            .await
            .expect_err("node returned an error");

        assert_eq!(error.rpc_error().map(|error| error.code), Some(-32000));
        assert!(matches!(
            error,
            EthClientError::Protocol { method, .. } if method == "eth_getTransactionByHash"
        ));
    }

    #[tokio::test]
    async fn dispatch_error_sends_nothing() {
        let client = EthClient::new(MockRequestManager::new(), ClientConfig::default());

        let error = client
            .request("eth_getBalance", vec![json!("0x11"), json!("newest")])
            .await
            .expect_err("block is invalid");

        assert!(matches!(error, EthClientError::Dispatch(DispatchError::Conversion { .. })));
        assert!(client.manager().calls().is_empty());
    }

    #[tokio::test]
    async fn subscribe_returns_pending_call() -> anyhow::Result<()> {
        let manager = MockRequestManager::new().with_result("eth_blockNumber", json!("0x10"));
        let client = EthClient::new(manager, ClientConfig::default());

        let pending = client
            .block_number()
            .representation(Representation::Decimal)
            .subscribe()
            .await?;
        assert_eq!(pending.method(), "eth_blockNumber");

        assert_eq!(pending.result().await?, json!("16"));

        Ok(())
    }

    #[tokio::test]
    async fn execute_follows_delivery_mode() -> anyhow::Result<()> {
        let manager = MockRequestManager::new().with_result("eth_chainId", json!("0x1"));
        let client = EthClient::new(manager, ClientConfig::default());

        let descriptor = dispatch::build_call(
            &methods::CHAIN_ID,
            Vec::new(),
            CallOptions::default().with_mode(DeliveryMode::Subscribe),
        )?;

        match client.execute(descriptor).await? {
            Dispatched::Pending(pending) => assert_eq!(pending.result().await?, json!(1)),
            Dispatched::Result(result) => unreachable!("Unexpected result: {result}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn unknown_method_is_returned_as_received() -> anyhow::Result<()> {
        let manager =
            MockRequestManager::new().with_result("debug_custom", json!({"gas": "0x10"}));
        let client = EthClient::new(manager, ClientConfig::default());

        let result = client.request("debug_custom", vec![json!(1)]).await?;

        assert_eq!(result, json!({"gas": "0x10"}));
        assert_eq!(client.manager().calls()[0].params, vec![json!(1)]);

        Ok(())
    }

    #[tokio::test]
    async fn block_by_hash_or_number() -> anyhow::Result<()> {
        let manager = MockRequestManager::new()
            .with_result("eth_getBlockByHash", Value::Null)
            .with_result("eth_getBlockByNumber", json!({ "number": "0x2a" }));
        let client = EthClient::new(manager, ClientConfig::default());

        assert_eq!(client.get_block(B256::ZERO, false).await?, Value::Null);
        assert_eq!(
            client
                .get_block(42u64, true)
                .representation(Representation::Number)
                .await?,
            json!({ "number": 42 })
        );

        let calls = client.manager().calls();
        assert_eq!(calls[1].method, "eth_getBlockByNumber");
        assert_eq!(calls[1].params, vec![json!("0x2a"), json!(true)]);

        Ok(())
    }
}
