use alloy_primitives::Address;
use ethbind_format::Representation;
use serde::{Deserialize, Serialize};

use crate::BlockSpec;

/// Configuration of an [`crate::EthClient`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Representation of result quantities, unless overridden per call
    pub default_representation: Representation,
    /// Block used by methods that take an optional block
    pub default_block: BlockSpec,
    /// Sender of transaction requests that don't specify one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_account: Option<Address>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let config: ClientConfig = serde_json::from_value(json!({}))?;

        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.default_representation, Representation::BigInt);
        assert_eq!(config.default_block, BlockSpec::latest());

        Ok(())
    }

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let config: ClientConfig = serde_json::from_value(json!({
            "defaultRepresentation": "number",
            "defaultBlock": "0x10",
            "defaultAccount": "0x1111111111111111111111111111111111111111",
        }))?;

        assert_eq!(config.default_representation, Representation::Number);
        assert_eq!(config.default_block, BlockSpec::Number(16));
        assert_eq!(config.default_account, Some(Address::repeat_byte(0x11)));

        Ok(())
    }
}
