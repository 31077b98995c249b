use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Represents JSON-RPC 2.0
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Version {
    /// JSON-RPC 2.0
    #[default]
    V2_0,
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Version::V2_0 => serializer.serialize_str("2.0"),
        }
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let version = String::deserialize(deserializer)?;
        match version.as_str() {
            "2.0" => Ok(Version::V2_0),
            _ => Err(serde::de::Error::custom(format!(
                "unsupported JSON-RPC version '{version}'"
            ))),
        }
    }
}

/// Request and response id
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id {
    /// Numeric id
    Num(u64),
    /// String id
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(id) => write!(f, "{id}"),
            Id::Str(id) => f.write_str(id),
        }
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Id::Num(id) => serializer.serialize_u64(*id),
            Id::Str(id) => serializer.serialize_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Going through `Value` keeps numbers intact with `arbitrary_precision`.
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(Id::Str(id)),
            Value::Number(id) => id.as_u64().map(Id::Num).ok_or_else(|| {
                serde::de::Error::custom(format!("numeric id '{id}' is not an unsigned integer"))
            }),
            id => Err(serde::de::Error::custom(format!(
                "id must be a number or a string but was '{id}'"
            ))),
        }
    }
}

/// A method name with its positional parameters.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MethodCall {
    /// The method name, e.g. `eth_getBalance`
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

/// A JSON-RPC request
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Request {
    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub version: Version,
    /// The method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
    /// The request id
    pub id: Id,
}

impl Request {
    /// Constructs a JSON-RPC 2.0 request.
    pub fn new(call: MethodCall, id: Id) -> Self {
        let MethodCall { method, params } = call;
        Self {
            version: Version::V2_0,
            method,
            params,
            id,
        }
    }
}

/// A JSON-RPC error object
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, thiserror::Error)]
#[error("{message} (code: {code})")]
pub struct Error {
    /// The error code
    pub code: i64,
    /// The error message
    pub message: String,
    /// Additional data, e.g. revert data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Error {
    /// Constructs an error without additional data.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// The outcome carried by a response: either a result or an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseData {
    /// The call succeeded. `null` is a valid result.
    Success {
        /// The result
        result: Value,
    },
    /// The call failed.
    Error {
        /// The error
        error: Error,
    },
}

impl ResponseData {
    /// Returns the result if the call succeeded, otherwise the error.
    pub fn into_result(self) -> Result<Value, Error> {
        match self {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(error),
        }
    }
}

/// A JSON-RPC response
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawResponse", into = "RawResponse")]
pub struct Response {
    /// JSON-RPC version
    pub version: Version,
    /// The id of the request this is a response to
    pub id: Id,
    /// The result or error
    pub data: ResponseData,
}

impl Response {
    /// Constructs a successful response.
    pub fn success(id: Id, result: Value) -> Self {
        Self {
            version: Version::V2_0,
            id,
            data: ResponseData::Success { result },
        }
    }

    /// Constructs an error response.
    pub fn error(id: Id, error: Error) -> Self {
        Self {
            version: Version::V2_0,
            id,
            data: ResponseData::Error { error },
        }
    }
}

#[derive(Deserialize, Serialize)]
struct RawResponse {
    jsonrpc: Version,
    id: Id,
    // A present `null` must stay distinguishable from a missing field.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<Error>,
}

fn deserialize_present<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<RawResponse> for Response {
    type Error = String;

    fn try_from(raw: RawResponse) -> Result<Self, String> {
        let data = match (raw.result, raw.error) {
            (None, Some(error)) => ResponseData::Error { error },
            (Some(result), None) => ResponseData::Success { result },
            (Some(_), Some(_)) => {
                return Err("response contains both `result` and `error`".to_owned());
            }
            (None, None) => return Err("response contains neither `result` nor `error`".to_owned()),
        };

        Ok(Self {
            version: raw.jsonrpc,
            id: raw.id,
            data,
        })
    }
}

impl From<Response> for RawResponse {
    fn from(response: Response) -> Self {
        let (result, error) = match response.data {
            ResponseData::Success { result } => (Some(result), None),
            ResponseData::Error { error } => (None, Some(error)),
        };

        Self {
            jsonrpc: response.version,
            id: response.id,
            result,
            error,
        }
    }
}
