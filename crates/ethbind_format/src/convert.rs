use alloy_primitives::U256;

use crate::{FormattedValue, Numeral, Representation};

/// The number of bytes of the widest protocol quantity.
pub const MAX_QUANTITY_BYTES: usize = 32;

/// An error that occurs when converting a quantity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The input is neither a `0x`-prefixed hexadecimal nor a decimal numeral.
    #[error("Invalid numeral '{input}'. Expected a 0x-prefixed hexadecimal or a decimal string.")]
    InvalidNumeral {
        /// The rejected input
        input: String,
    },
    /// The input does not fit in a 256-bit quantity.
    #[error("Numeral '{input}' does not fit in 256 bits.")]
    Overflow {
        /// The rejected input
        input: String,
    },
    /// Converting to a native number would lose precision.
    #[error("Value {value} exceeds the native number range (maximum {max}).")]
    OutOfRange {
        /// The value that was converted
        value: U256,
        /// The largest representable number
        max: u64,
    },
    /// The value needs more bytes than the requested width.
    #[error("Value {value} needs {required} bytes, which exceeds the requested width of {width} bytes.")]
    ExceedsWidth {
        /// The value that was converted
        value: U256,
        /// The number of bytes the value needs
        required: usize,
        /// The requested width
        width: usize,
    },
}

/// Converts `value` into the `target` representation.
pub fn convert(
    value: impl Into<Numeral>,
    target: Representation,
) -> Result<FormattedValue, ConversionError> {
    let value = value.into().to_u256()?;

    let formatted = match target {
        Representation::Hex => FormattedValue::Hex(format!("0x{}", trimmed_hex(value))),
        Representation::Number => FormattedValue::Number(checked_u64(value)?),
        Representation::BigInt => FormattedValue::BigInt(value),
        Representation::Decimal => FormattedValue::Decimal(value.to_string()),
    };

    Ok(formatted)
}

/// Converts `value` into its canonical hexadecimal wire encoding.
pub fn to_hex(value: impl Into<Numeral>) -> Result<String, ConversionError> {
    let value = value.into().to_u256()?;
    Ok(format!("0x{}", trimmed_hex(value)))
}

/// Converts `value` into a native number.
pub fn to_number(value: impl Into<Numeral>) -> Result<u64, ConversionError> {
    checked_u64(value.into().to_u256()?)
}

/// Converts `value` into a hexadecimal string that is left-padded with zero
/// bytes to exactly `width` bytes.
pub fn convert_padded(value: impl Into<Numeral>, width: usize) -> Result<String, ConversionError> {
    let value = value.into().to_u256()?;

    let required = value.bit_len().div_ceil(8);
    if required > width {
        return Err(ConversionError::ExceedsWidth {
            value,
            required,
            width,
        });
    }

    let encoded = hex::encode(value.to_be_bytes::<MAX_QUANTITY_BYTES>());
    let padded = if width > MAX_QUANTITY_BYTES {
        format!("{}{encoded}", "00".repeat(width - MAX_QUANTITY_BYTES))
    } else {
        // The skipped prefix only contains zero bytes, as `required <= width`.
        encoded
            .get((MAX_QUANTITY_BYTES - width) * 2..)
            .unwrap_or_default()
            .to_owned()
    };

    Ok(format!("0x{padded}"))
}

/// Returns the value as `u64`, if it fits.
pub(crate) fn to_u64(value: U256) -> Option<u64> {
    u64::try_from(value).ok()
}

fn checked_u64(value: U256) -> Result<u64, ConversionError> {
    to_u64(value).ok_or(ConversionError::OutOfRange {
        value,
        max: u64::MAX,
    })
}

fn trimmed_hex(value: U256) -> String {
    let encoded = hex::encode(value.to_be_bytes::<MAX_QUANTITY_BYTES>());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
