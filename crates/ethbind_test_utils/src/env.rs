/// The environment variable holding the JSON-RPC endpoint of the node that
/// remote tests run against.
pub const JSON_RPC_URL_ENV_VAR: &str = "ETH_RPC_URL";

fn get_non_empty_env_var_or_panic(name: &'static str) -> String {
    let result = std::env::var_os(name)
        .unwrap_or_else(|| panic!("{name} environment variable not defined"))
        .into_string()
        .expect("Couldn't convert OsString into a String");
    if result.is_empty() {
        panic!("{name} environment variable is empty")
    } else {
        result
    }
}

/// Returns the JSON-RPC endpoint of an Ethereum mainnet node.
///
/// # Panics
///
/// Panics if the `ETH_RPC_URL` environment variable is not defined or is
/// empty.
pub fn json_rpc_url() -> String {
    get_non_empty_env_var_or_panic(JSON_RPC_URL_ENV_VAR)
}
