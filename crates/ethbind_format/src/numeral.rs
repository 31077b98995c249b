use alloy_primitives::U256;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::ConversionError;

/// An unsigned integer in any of the forms accepted by [`crate::convert`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Numeral {
    /// A `0x`-prefixed hexadecimal string or a base-10 string
    Text(String),
    /// A native integer
    U64(u64),
    /// A 256-bit integer
    U256(U256),
}

impl Numeral {
    /// Parses the numeral into a 256-bit integer.
    pub fn to_u256(&self) -> Result<U256, ConversionError> {
        match self {
            Numeral::Text(text) => parse_text(text),
            Numeral::U64(value) => Ok(U256::from(*value)),
            Numeral::U256(value) => Ok(*value),
        }
    }
}

fn parse_text(text: &str) -> Result<U256, ConversionError> {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => (digits, 16),
        None => (text, 10),
    };

    if digits.is_empty() || !digits.chars().all(|digit| digit.is_digit(radix)) {
        return Err(ConversionError::InvalidNumeral {
            input: text.to_owned(),
        });
    }

    // All digits are valid for the radix, so the only remaining failure is an
    // overflow of the 256-bit range.
    U256::from_str_radix(digits, u64::from(radix)).map_err(|_error| ConversionError::Overflow {
        input: text.to_owned(),
    })
}

impl From<&str> for Numeral {
    fn from(value: &str) -> Self {
        Numeral::Text(value.to_owned())
    }
}

impl From<String> for Numeral {
    fn from(value: String) -> Self {
        Numeral::Text(value)
    }
}

impl From<u64> for Numeral {
    fn from(value: u64) -> Self {
        Numeral::U64(value)
    }
}

impl From<u32> for Numeral {
    fn from(value: u32) -> Self {
        Numeral::U64(value.into())
    }
}

impl From<usize> for Numeral {
    fn from(value: usize) -> Self {
        // Lossless for any pointer width.
        Numeral::U256(U256::from(value))
    }
}

impl From<U256> for Numeral {
    fn from(value: U256) -> Self {
        Numeral::U256(value)
    }
}

impl TryFrom<&Value> for Numeral {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Numeral::Text(text.clone())),
            Value::Number(number) => Ok(number.as_u64().map_or_else(
                // Integers beyond `u64::MAX` keep their exact decimal spelling
                // with arbitrary precision; negative and fractional numbers
                // are rejected when parsed.
                || Numeral::Text(number.to_string()),
                Numeral::U64,
            )),
            _ => Err(ConversionError::InvalidNumeral {
                input: value.to_string(),
            }),
        }
    }
}

impl Serialize for Numeral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeral::Text(text) => serializer.serialize_str(text),
            Numeral::U64(value) => serializer.serialize_u64(*value),
            // Decimal strings are lossless for every JSON consumer.
            Numeral::U256(value) => serializer.collect_str(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_hex_and_decimal_text() -> Result<(), ConversionError> {
        assert_eq!(Numeral::from("0x5208").to_u256()?, U256::from(21_000u64));
        assert_eq!(Numeral::from("0X5208").to_u256()?, U256::from(21_000u64));
        assert_eq!(Numeral::from("0xABcd").to_u256()?, U256::from(0xabcdu64));
        assert_eq!(Numeral::from("21000").to_u256()?, U256::from(21_000u64));
        assert_eq!(Numeral::from("0x0000").to_u256()?, U256::ZERO);

        Ok(())
    }

    #[test]
    fn rejects_malformed_text() {
        for input in ["", "0x", "0xg1", "12a", "-1", " 1", "1.5", "+7"] {
            assert_eq!(
                Numeral::from(input).to_u256(),
                Err(ConversionError::InvalidNumeral {
                    input: input.to_owned()
                }),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn rejects_more_than_256_bits() {
        let input = format!("0x1{}", "0".repeat(64));
        assert_eq!(
            Numeral::from(input.as_str()).to_u256(),
            Err(ConversionError::Overflow { input })
        );
    }

    #[test]
    fn from_json_value() -> Result<(), ConversionError> {
        assert_eq!(Numeral::try_from(&json!("0x10"))?, Numeral::from("0x10"));
        assert_eq!(Numeral::try_from(&json!(16))?, Numeral::U64(16));
        assert!(Numeral::try_from(&json!(true)).is_err());
        assert!(Numeral::try_from(&json!(-1))?.to_u256().is_err());

        Ok(())
    }

    #[test]
    fn from_usize() -> Result<(), ConversionError> {
        assert_eq!(Numeral::from(usize::MAX).to_u256()?, U256::from(usize::MAX));

        Ok(())
    }

    #[test]
    fn serializes_u256_as_decimal_string() -> anyhow::Result<()> {
        let value = Numeral::from(U256::MAX);
        assert_eq!(serde_json::to_value(&value)?, json!(U256::MAX.to_string()));
        assert_eq!(serde_json::to_value(Numeral::U64(7))?, json!(7));

        Ok(())
    }
}
