#![warn(missing_docs)]

//! Conversion between the hexadecimal wire encoding of Ethereum quantities
//! and the representations applications work with.

mod convert;
mod numeral;
mod representation;

pub use alloy_primitives::U256;

pub use self::{
    convert::{ConversionError, MAX_QUANTITY_BYTES, convert, convert_padded, to_hex, to_number},
    numeral::Numeral,
    representation::{FormattedValue, Representation},
};
