use std::str::FromStr as _;

use alloy_primitives::B256;
use ethbind_format::{ConversionError, Numeral, Representation};
use ethbind_rpc_client::{TransportOptions, jsonrpc};
use serde_json::{Map, Value};

use crate::{
    BlockTag,
    methods::{MethodSpec, ObjectFormat, ParamFormat, ResultFormat},
};

/// Whether the client awaits the response of a call, or hands out a handle
/// as soon as the request was handed to the transport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Await the response
    #[default]
    Send,
    /// Return a [`crate::PendingCall`]
    Subscribe,
}

/// Per-call overrides of the client's configuration.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    /// Overrides [`crate::ClientConfig::default_representation`]
    pub representation: Option<Representation>,
    /// How the response is delivered
    pub mode: DeliveryMode,
    /// Passed to the request manager untouched
    pub transport: TransportOptions,
}

impl CallOptions {
    /// Sets the representation of the result's quantities.
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = Some(representation);
        self
    }

    /// Sets the delivery mode.
    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the transport options.
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }
}

/// A method call whose parameters are encoded for the wire.
#[derive(Clone, Debug)]
pub struct CallDescriptor {
    /// The method name
    pub method: String,
    /// Encoded positional parameters
    pub params: Vec<Value>,
    /// How the result is normalized
    pub result: ResultFormat,
    /// Per-call options
    pub options: CallOptions,
}

impl CallDescriptor {
    /// Returns the JSON-RPC method call.
    pub fn to_method_call(&self) -> jsonrpc::MethodCall {
        jsonrpc::MethodCall {
            method: self.method.clone(),
            params: self.params.clone(),
        }
    }
}

/// An error that occurs before a call is sent.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A parameter could not be encoded.
    #[error("Failed to encode `{field}` of {method}: {source}")]
    Conversion {
        /// The method name
        method: String,
        /// Path of the field, e.g. `params[0].gasPrice`
        field: String,
        /// The conversion error
        #[source]
        source: ConversionError,
    },
    /// The number of parameters doesn't match the method.
    #[error("{method} expects between {required} and {max} parameters, but {actual} were provided")]
    ParamCount {
        /// The method name
        method: String,
        /// The number of required parameters
        required: usize,
        /// The number of parameters the method accepts
        max: usize,
        /// The number of provided parameters
        actual: usize,
    },
    /// A typed parameter could not be serialized.
    #[error("Failed to serialize the parameters of {method}: {source}")]
    Serialization {
        /// The method name
        method: String,
        /// The serialization error
        #[source]
        source: serde_json::Error,
    },
}

/// Encodes the parameters of a known method.
///
/// Fails without side effects if any parameter can't be encoded.
pub fn build_call(
    method: &MethodSpec,
    params: Vec<Value>,
    options: CallOptions,
) -> Result<CallDescriptor, DispatchError> {
    if params.len() < method.required_params || params.len() > method.params.len() {
        return Err(DispatchError::ParamCount {
            method: method.name.to_owned(),
            required: method.required_params,
            max: method.params.len(),
            actual: params.len(),
        });
    }

    let params = params
        .into_iter()
        .zip(method.params)
        .enumerate()
        .map(|(index, (value, format))| {
            encode_param(value, format).map_err(|error| DispatchError::Conversion {
                method: method.name.to_owned(),
                field: format!("params[{index}]{}", error.path),
                source: error.source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Dispatching {} with {} parameter(s)", method.name, params.len());

    Ok(CallDescriptor {
        method: method.name.to_owned(),
        params,
        result: method.result,
        options,
    })
}

/// Describes a call to a method that is unknown to the client. Parameters are
/// sent and the result is returned as provided.
pub fn build_raw_call(
    method: impl Into<String>,
    params: Vec<Value>,
    options: CallOptions,
) -> CallDescriptor {
    let method = method.into();
    log::debug!("Dispatching unknown method {method} without encoding");

    CallDescriptor {
        method,
        params,
        result: ResultFormat::Raw,
        options,
    }
}

struct FieldError {
    /// Relative to the parameter, e.g. `.gasPrice`
    path: String,
    source: ConversionError,
}

impl From<ConversionError> for FieldError {
    fn from(source: ConversionError) -> Self {
        Self {
            path: String::new(),
            source,
        }
    }
}

fn encode_param(value: Value, format: &ParamFormat) -> Result<Value, FieldError> {
    // Omitted optional parameters
    if value.is_null() {
        return Ok(value);
    }

    let encoded = match format {
        ParamFormat::Raw => value,
        ParamFormat::Quantity => encode_quantity(value)?,
        ParamFormat::PaddedQuantity(width) => {
            let numeral = Numeral::try_from(&value)?;
            Value::String(ethbind_format::convert_padded(numeral, *width)?)
        }
        ParamFormat::Block => encode_block(value)?,
        ParamFormat::Object(format) => encode_object(value, format)?,
    };

    Ok(encoded)
}

fn encode_quantity(value: Value) -> Result<Value, ConversionError> {
    let numeral = Numeral::try_from(&value)?;
    ethbind_format::to_hex(numeral).map(Value::String)
}

fn encode_block(value: Value) -> Result<Value, ConversionError> {
    match &value {
        Value::String(keyword) if BlockTag::from_keyword(keyword).is_some() => Ok(value),
        // Leading zero bytes of a hash are significant
        Value::String(hash) if is_block_hash(hash) => Ok(value),
        // EIP-1898 block hash or number objects
        Value::Object(_) => Ok(value),
        _ => encode_quantity(value),
    }
}

/// `0x` followed by 32 bytes of hex digits
const BLOCK_HASH_LEN: usize = 66;

fn is_block_hash(value: &str) -> bool {
    value.len() == BLOCK_HASH_LEN
        && value.starts_with("0x")
        && B256::from_str(value).is_ok()
}

fn encode_object(value: Value, format: &ObjectFormat) -> Result<Value, FieldError> {
    let Value::Object(mut fields) = value else {
        return Ok(value);
    };

    for key in format.quantities {
        encode_field(&mut fields, key, encode_quantity)?;
    }
    for key in format.blocks {
        encode_field(&mut fields, key, encode_block)?;
    }

    Ok(Value::Object(fields))
}

fn encode_field(
    fields: &mut Map<String, Value>,
    key: &str,
    encode: impl Fn(Value) -> Result<Value, ConversionError>,
) -> Result<(), FieldError> {
    let Some(field) = fields.get_mut(key) else {
        return Ok(());
    };

    if !field.is_null() {
        *field = encode(std::mem::take(field)).map_err(|source| FieldError {
            path: format!(".{key}"),
            source,
        })?;
    }

    Ok(())
}
