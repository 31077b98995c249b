use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The representation a quantity is converted into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Representation {
    /// Zero-trimmed, lowercase, `0x`-prefixed hexadecimal string. This is the
    /// canonical wire encoding.
    Hex,
    /// Native `u64`
    Number,
    /// 256-bit integer
    #[default]
    BigInt,
    /// Base-10 string
    Decimal,
}

/// A quantity in one of the supported representations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FormattedValue {
    /// See [`Representation::Hex`]
    Hex(String),
    /// See [`Representation::Number`]
    Number(u64),
    /// See [`Representation::BigInt`]
    BigInt(U256),
    /// See [`Representation::Decimal`]
    Decimal(String),
}

impl FormattedValue {
    /// Returns the representation of the value.
    pub fn representation(&self) -> Representation {
        match self {
            FormattedValue::Hex(_) => Representation::Hex,
            FormattedValue::Number(_) => Representation::Number,
            FormattedValue::BigInt(_) => Representation::BigInt,
            FormattedValue::Decimal(_) => Representation::Decimal,
        }
    }

    /// Converts the value into JSON.
    ///
    /// Strings stay strings and integers become JSON integers. Integers above
    /// `u64::MAX` are exact only when `serde_json` is built with
    /// `arbitrary_precision`.
    pub fn into_json(self) -> Value {
        match self {
            FormattedValue::Hex(text) | FormattedValue::Decimal(text) => Value::String(text),
            FormattedValue::Number(value) => Value::from(value),
            FormattedValue::BigInt(value) => big_int_to_json(value),
        }
    }
}

fn big_int_to_json(value: U256) -> Value {
    if let Some(value) = crate::convert::to_u64(value) {
        return Value::from(value);
    }

    let decimal = value.to_string();
    serde_json::from_str::<Number>(&decimal).map_or(Value::String(decimal), Value::Number)
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedValue::Hex(text) | FormattedValue::Decimal(text) => f.write_str(text),
            FormattedValue::Number(value) => write!(f, "{value}"),
            FormattedValue::BigInt(value) => write!(f, "{value}"),
        }
    }
}
