use ethbind_format::{ConversionError, FormattedValue, Numeral, Representation};
use serde_json::Value;

use crate::methods::{RecordFormat, ResultFormat};

/// A result field couldn't be converted into the requested representation.
#[derive(Debug, thiserror::Error)]
#[error("Failed to convert `{field}`: {source}")]
pub struct NormalizeError {
    /// Path of the field, e.g. `result.transactions[0].gasPrice`
    pub field: String,
    /// The conversion error
    #[source]
    pub source: ConversionError,
}

/// Converts the quantities of a raw result into the `target` representation.
///
/// `null` results and fields are left as is, as are elements of record lists
/// that aren't records, e.g. transaction hashes.
pub fn normalize(
    raw: Value,
    format: &ResultFormat,
    target: Representation,
) -> Result<Value, NormalizeError> {
    const ROOT: &str = "result";

    match format {
        ResultFormat::Raw => Ok(raw),
        ResultFormat::Quantity => normalize_quantity(raw, target, ROOT),
        ResultFormat::Record(record) => normalize_record(raw, record, target, ROOT),
    }
}

fn normalize_quantity(
    value: Value,
    target: Representation,
    path: &str,
) -> Result<Value, NormalizeError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                normalize_quantity(element, target, &format!("{path}[{index}]"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        value => Numeral::try_from(&value)
            .and_then(|numeral| ethbind_format::convert(numeral, target))
            .map(FormattedValue::into_json)
            .map_err(|source| NormalizeError {
                field: path.to_owned(),
                source,
            }),
    }
}

fn normalize_record(
    value: Value,
    record: &RecordFormat,
    target: Representation,
    path: &str,
) -> Result<Value, NormalizeError> {
    match value {
        Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                normalize_record(element, record, target, &format!("{path}[{index}]"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(mut fields) => {
            for &key in record.quantities {
                if let Some(field) = fields.get_mut(key) {
                    *field = normalize_quantity(
                        std::mem::take(field),
                        target,
                        &format!("{path}.{key}"),
                    )?;
                }
            }

            for &(key, nested) in record.nested {
                if let Some(field) = fields.get_mut(key) {
                    *field = normalize_record(
                        std::mem::take(field),
                        nested,
                        target,
                        &format!("{path}.{key}"),
                    )?;
                }
            }

            Ok(Value::Object(fields))
        }
        // `null`, `false` of `eth_syncing` and hashes in lists of records
        value => Ok(value),
    }
}
