//! The Ethereum JSON-RPC methods known to the client, with the encoding of
//! their parameters and the quantity fields of their results.

use self::ParamFormat::{Block, Object, PaddedQuantity, Quantity, Raw};

/// How a positional parameter is encoded before it is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamFormat {
    /// Sent as provided, e.g. addresses, hashes, data and booleans
    Raw,
    /// A quantity, encoded as canonical hexadecimal
    Quantity,
    /// A quantity, encoded as hexadecimal that is left-padded to the provided
    /// number of bytes
    PaddedQuantity(usize),
    /// A block number or tag. Tags are sent verbatim.
    Block,
    /// A request object with quantity and block fields
    Object(&'static ObjectFormat),
}

/// The fields of a request object that are encoded before it is sent.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectFormat {
    /// Fields that hold quantities
    pub quantities: &'static [&'static str],
    /// Fields that hold block numbers or tags
    pub blocks: &'static [&'static str],
}

/// How the result of a method is normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultFormat {
    /// Returned as received
    Raw,
    /// A quantity, or a list of quantities
    Quantity,
    /// A record, or a list of records
    Record(&'static RecordFormat),
}

/// The fields of a result record that are converted into the requested
/// representation.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordFormat {
    /// Fields that hold quantities, or lists of quantities
    pub quantities: &'static [&'static str],
    /// Fields that hold nested records, or lists of nested records
    pub nested: &'static [(&'static str, &'static RecordFormat)],
}

/// An Ethereum JSON-RPC method
#[derive(Debug, PartialEq, Eq)]
pub struct MethodSpec {
    /// The method name, as sent on the wire
    pub name: &'static str,
    /// The format of each positional parameter
    pub params: &'static [ParamFormat],
    /// The number of leading parameters that must be provided. The remaining
    /// parameters are optional.
    pub required_params: usize,
    /// The format of the result
    pub result: ResultFormat,
}

impl MethodSpec {
    /// Looks up a known method by its wire name.
    pub fn by_name(name: &str) -> Option<&'static MethodSpec> {
        ALL_METHODS.iter().copied().find(|method| method.name == name)
    }
}

/// Transaction record
pub const TRANSACTION: RecordFormat = RecordFormat {
    quantities: &[
        "blockNumber",
        "transactionIndex",
        "nonce",
        "gas",
        "gasPrice",
        "value",
        "maxFeePerGas",
        "maxPriorityFeePerGas",
        "maxFeePerBlobGas",
        "chainId",
    ],
    nested: &[],
};

/// EIP-4895 withdrawal record
pub const WITHDRAWAL: RecordFormat = RecordFormat {
    quantities: &["index", "validatorIndex", "amount"],
    nested: &[],
};

/// Block record. Its `transactions` are either hashes or transaction records.
pub const BLOCK: RecordFormat = RecordFormat {
    quantities: &[
        "number",
        "difficulty",
        "totalDifficulty",
        "gasLimit",
        "gasUsed",
        "timestamp",
        "size",
        "baseFeePerGas",
        "blobGasUsed",
        "excessBlobGas",
    ],
    nested: &[("transactions", &TRANSACTION), ("withdrawals", &WITHDRAWAL)],
};

/// Log record
pub const LOG: RecordFormat = RecordFormat {
    quantities: &["blockNumber", "transactionIndex", "logIndex"],
    nested: &[],
};

/// Transaction receipt record
pub const RECEIPT: RecordFormat = RecordFormat {
    quantities: &[
        "blockNumber",
        "transactionIndex",
        "cumulativeGasUsed",
        "gasUsed",
        "effectiveGasPrice",
        "blobGasUsed",
        "blobGasPrice",
    ],
    nested: &[("logs", &LOG)],
};

/// Sync status record of `eth_syncing`
pub const SYNC_STATUS: RecordFormat = RecordFormat {
    quantities: &[
        "startingBlock",
        "currentBlock",
        "highestBlock",
        "knownStates",
        "pulledStates",
    ],
    nested: &[],
};

/// Result record of `eth_feeHistory`
pub const FEE_HISTORY_RECORD: RecordFormat = RecordFormat {
    quantities: &["oldestBlock", "baseFeePerGas", "baseFeePerBlobGas", "reward"],
    nested: &[],
};

/// Storage proof record of `eth_getProof`
pub const STORAGE_PROOF: RecordFormat = RecordFormat {
    quantities: &["value"],
    nested: &[],
};

/// Account proof record of `eth_getProof`
pub const ACCOUNT_PROOF: RecordFormat = RecordFormat {
    quantities: &["balance", "nonce"],
    nested: &[("storageProof", &STORAGE_PROOF)],
};

/// Result record of `eth_signTransaction`
pub const SIGNED_TRANSACTION: RecordFormat = RecordFormat {
    quantities: &[],
    nested: &[("tx", &TRANSACTION)],
};

/// Transaction request object
pub const TRANSACTION_REQUEST: ObjectFormat = ObjectFormat {
    quantities: &[
        "value",
        "gas",
        "gasPrice",
        "maxFeePerGas",
        "maxPriorityFeePerGas",
        "maxFeePerBlobGas",
        "nonce",
        "chainId",
        "type",
    ],
    blocks: &[],
};

/// Log filter object
pub const LOG_FILTER: ObjectFormat = ObjectFormat {
    quantities: &[],
    blocks: &["fromBlock", "toBlock"],
};

const fn method(
    name: &'static str,
    params: &'static [ParamFormat],
    result: ResultFormat,
) -> MethodSpec {
    MethodSpec {
        name,
        params,
        required_params: params.len(),
        result,
    }
}

const fn method_with_optional(
    name: &'static str,
    params: &'static [ParamFormat],
    required_params: usize,
    result: ResultFormat,
) -> MethodSpec {
    MethodSpec {
        name,
        params,
        required_params,
        result,
    }
}

/// eth_protocolVersion
pub const PROTOCOL_VERSION: MethodSpec = method("eth_protocolVersion", &[], ResultFormat::Raw);
/// eth_syncing
pub const SYNCING: MethodSpec = method("eth_syncing", &[], ResultFormat::Record(&SYNC_STATUS));
/// eth_coinbase
pub const COINBASE: MethodSpec = method("eth_coinbase", &[], ResultFormat::Raw);
/// eth_mining
pub const MINING: MethodSpec = method("eth_mining", &[], ResultFormat::Raw);
/// eth_hashrate
pub const HASHRATE: MethodSpec = method("eth_hashrate", &[], ResultFormat::Quantity);
/// eth_gasPrice
pub const GAS_PRICE: MethodSpec = method("eth_gasPrice", &[], ResultFormat::Quantity);
/// eth_maxPriorityFeePerGas
pub const MAX_PRIORITY_FEE_PER_GAS: MethodSpec =
    method("eth_maxPriorityFeePerGas", &[], ResultFormat::Quantity);
/// eth_accounts
pub const ACCOUNTS: MethodSpec = method("eth_accounts", &[], ResultFormat::Raw);
/// eth_requestAccounts
pub const REQUEST_ACCOUNTS: MethodSpec = method("eth_requestAccounts", &[], ResultFormat::Raw);
/// eth_blockNumber
pub const BLOCK_NUMBER: MethodSpec = method("eth_blockNumber", &[], ResultFormat::Quantity);
/// eth_chainId
pub const CHAIN_ID: MethodSpec = method("eth_chainId", &[], ResultFormat::Quantity);

/// eth_getBalance
pub const GET_BALANCE: MethodSpec = method("eth_getBalance", &[Raw, Block], ResultFormat::Quantity);
/// eth_getStorageAt
pub const GET_STORAGE_AT: MethodSpec =
    method("eth_getStorageAt", &[Raw, Quantity, Block], ResultFormat::Raw);
/// eth_getCode
pub const GET_CODE: MethodSpec = method("eth_getCode", &[Raw, Block], ResultFormat::Raw);
/// eth_getTransactionCount
pub const GET_TRANSACTION_COUNT: MethodSpec =
    method("eth_getTransactionCount", &[Raw, Block], ResultFormat::Quantity);

/// eth_getBlockByHash
pub const GET_BLOCK_BY_HASH: MethodSpec =
    method("eth_getBlockByHash", &[Raw, Raw], ResultFormat::Record(&BLOCK));
/// eth_getBlockByNumber
pub const GET_BLOCK_BY_NUMBER: MethodSpec =
    method("eth_getBlockByNumber", &[Block, Raw], ResultFormat::Record(&BLOCK));
/// eth_getBlockTransactionCountByHash
pub const GET_BLOCK_TRANSACTION_COUNT_BY_HASH: MethodSpec = method(
    "eth_getBlockTransactionCountByHash",
    &[Raw],
    ResultFormat::Quantity,
);
/// eth_getBlockTransactionCountByNumber
pub const GET_BLOCK_TRANSACTION_COUNT_BY_NUMBER: MethodSpec = method(
    "eth_getBlockTransactionCountByNumber",
    &[Block],
    ResultFormat::Quantity,
);
/// eth_getUncleCountByBlockHash
pub const GET_UNCLE_COUNT_BY_BLOCK_HASH: MethodSpec =
    method("eth_getUncleCountByBlockHash", &[Raw], ResultFormat::Quantity);
/// eth_getUncleCountByBlockNumber
pub const GET_UNCLE_COUNT_BY_BLOCK_NUMBER: MethodSpec =
    method("eth_getUncleCountByBlockNumber", &[Block], ResultFormat::Quantity);
/// eth_getUncleByBlockHashAndIndex
pub const GET_UNCLE_BY_BLOCK_HASH_AND_INDEX: MethodSpec = method(
    "eth_getUncleByBlockHashAndIndex",
    &[Raw, Quantity],
    ResultFormat::Record(&BLOCK),
);
/// eth_getUncleByBlockNumberAndIndex
pub const GET_UNCLE_BY_BLOCK_NUMBER_AND_INDEX: MethodSpec = method(
    "eth_getUncleByBlockNumberAndIndex",
    &[Block, Quantity],
    ResultFormat::Record(&BLOCK),
);

/// eth_getTransactionByHash
pub const GET_TRANSACTION_BY_HASH: MethodSpec = method(
    "eth_getTransactionByHash",
    &[Raw],
    ResultFormat::Record(&TRANSACTION),
);
/// eth_getTransactionByBlockHashAndIndex
pub const GET_TRANSACTION_BY_BLOCK_HASH_AND_INDEX: MethodSpec = method(
    "eth_getTransactionByBlockHashAndIndex",
    &[Raw, Quantity],
    ResultFormat::Record(&TRANSACTION),
);
/// eth_getTransactionByBlockNumberAndIndex
pub const GET_TRANSACTION_BY_BLOCK_NUMBER_AND_INDEX: MethodSpec = method(
    "eth_getTransactionByBlockNumberAndIndex",
    &[Block, Quantity],
    ResultFormat::Record(&TRANSACTION),
);
/// eth_pendingTransactions
pub const PENDING_TRANSACTIONS: MethodSpec = method(
    "eth_pendingTransactions",
    &[],
    ResultFormat::Record(&TRANSACTION),
);
/// eth_getTransactionReceipt
pub const GET_TRANSACTION_RECEIPT: MethodSpec = method(
    "eth_getTransactionReceipt",
    &[Raw],
    ResultFormat::Record(&RECEIPT),
);

/// eth_sendTransaction
pub const SEND_TRANSACTION: MethodSpec = method(
    "eth_sendTransaction",
    &[Object(&TRANSACTION_REQUEST)],
    ResultFormat::Raw,
);
/// eth_sendRawTransaction
pub const SEND_RAW_TRANSACTION: MethodSpec =
    method("eth_sendRawTransaction", &[Raw], ResultFormat::Raw);
/// eth_sign
pub const SIGN: MethodSpec = method("eth_sign", &[Raw, Raw], ResultFormat::Raw);
/// eth_signTransaction
pub const SIGN_TRANSACTION: MethodSpec = method(
    "eth_signTransaction",
    &[Object(&TRANSACTION_REQUEST)],
    ResultFormat::Record(&SIGNED_TRANSACTION),
);
/// eth_call
pub const CALL: MethodSpec = method_with_optional(
    "eth_call",
    &[Object(&TRANSACTION_REQUEST), Block],
    1,
    ResultFormat::Raw,
);
/// eth_estimateGas
pub const ESTIMATE_GAS: MethodSpec = method_with_optional(
    "eth_estimateGas",
    &[Object(&TRANSACTION_REQUEST), Block],
    1,
    ResultFormat::Quantity,
);
/// eth_feeHistory
pub const FEE_HISTORY: MethodSpec = method(
    "eth_feeHistory",
    &[Quantity, Block, Raw],
    ResultFormat::Record(&FEE_HISTORY_RECORD),
);

/// eth_getLogs
pub const GET_LOGS: MethodSpec =
    method("eth_getLogs", &[Object(&LOG_FILTER)], ResultFormat::Record(&LOG));
/// eth_getProof
pub const GET_PROOF: MethodSpec = method(
    "eth_getProof",
    &[Raw, Raw, Block],
    ResultFormat::Record(&ACCOUNT_PROOF),
);

/// eth_getWork
pub const GET_WORK: MethodSpec = method("eth_getWork", &[], ResultFormat::Raw);
/// eth_submitWork
pub const SUBMIT_WORK: MethodSpec = method("eth_submitWork", &[Raw, Raw, Raw], ResultFormat::Raw);
/// eth_submitHashrate
pub const SUBMIT_HASHRATE: MethodSpec = method(
    "eth_submitHashrate",
    &[PaddedQuantity(32), Raw],
    ResultFormat::Raw,
);

/// eth_newFilter
pub const NEW_FILTER: MethodSpec =
    method("eth_newFilter", &[Object(&LOG_FILTER)], ResultFormat::Raw);
/// eth_newBlockFilter
pub const NEW_BLOCK_FILTER: MethodSpec = method("eth_newBlockFilter", &[], ResultFormat::Raw);
/// eth_newPendingTransactionFilter
pub const NEW_PENDING_TRANSACTION_FILTER: MethodSpec =
    method("eth_newPendingTransactionFilter", &[], ResultFormat::Raw);
/// eth_getFilterChanges. Block and pending transaction filters return hashes,
/// which are left as received.
pub const GET_FILTER_CHANGES: MethodSpec =
    method("eth_getFilterChanges", &[Raw], ResultFormat::Record(&LOG));
/// eth_getFilterLogs
pub const GET_FILTER_LOGS: MethodSpec =
    method("eth_getFilterLogs", &[Raw], ResultFormat::Record(&LOG));
/// eth_uninstallFilter
pub const UNINSTALL_FILTER: MethodSpec = method("eth_uninstallFilter", &[Raw], ResultFormat::Raw);

/// net_version. Nodes return the network id as a decimal string.
pub const NET_VERSION: MethodSpec = method("net_version", &[], ResultFormat::Quantity);
/// net_listening
pub const NET_LISTENING: MethodSpec = method("net_listening", &[], ResultFormat::Raw);
/// net_peerCount
pub const NET_PEER_COUNT: MethodSpec = method("net_peerCount", &[], ResultFormat::Quantity);
/// web3_clientVersion
pub const WEB3_CLIENT_VERSION: MethodSpec = method("web3_clientVersion", &[], ResultFormat::Raw);

/// Every known method
pub const ALL_METHODS: &[&MethodSpec] = &[
    &PROTOCOL_VERSION,
    &SYNCING,
    &COINBASE,
    &MINING,
    &HASHRATE,
    &GAS_PRICE,
    &MAX_PRIORITY_FEE_PER_GAS,
    &ACCOUNTS,
    &REQUEST_ACCOUNTS,
    &BLOCK_NUMBER,
    &CHAIN_ID,
    &GET_BALANCE,
    &GET_STORAGE_AT,
    &GET_CODE,
    &GET_TRANSACTION_COUNT,
    &GET_BLOCK_BY_HASH,
    &GET_BLOCK_BY_NUMBER,
    &GET_BLOCK_TRANSACTION_COUNT_BY_HASH,
    &GET_BLOCK_TRANSACTION_COUNT_BY_NUMBER,
    &GET_UNCLE_COUNT_BY_BLOCK_HASH,
    &GET_UNCLE_COUNT_BY_BLOCK_NUMBER,
    &GET_UNCLE_BY_BLOCK_HASH_AND_INDEX,
    &GET_UNCLE_BY_BLOCK_NUMBER_AND_INDEX,
    &GET_TRANSACTION_BY_HASH,
    &GET_TRANSACTION_BY_BLOCK_HASH_AND_INDEX,
    &GET_TRANSACTION_BY_BLOCK_NUMBER_AND_INDEX,
    &PENDING_TRANSACTIONS,
    &GET_TRANSACTION_RECEIPT,
    &SEND_TRANSACTION,
    &SEND_RAW_TRANSACTION,
    &SIGN,
    &SIGN_TRANSACTION,
    &CALL,
    &ESTIMATE_GAS,
    &FEE_HISTORY,
    &GET_LOGS,
    &GET_PROOF,
    &GET_WORK,
    &SUBMIT_WORK,
    &SUBMIT_HASHRATE,
    &NEW_FILTER,
    &NEW_BLOCK_FILTER,
    &NEW_PENDING_TRANSACTION_FILTER,
    &GET_FILTER_CHANGES,
    &GET_FILTER_LOGS,
    &UNINSTALL_FILTER,
    &NET_VERSION,
    &NET_LISTENING,
    &NET_PEER_COUNT,
    &WEB3_CLIENT_VERSION,
];
