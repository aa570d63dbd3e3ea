use alloy::primitives::{address, Address};
use url::Url;

// Deployment the savings suite runs against
pub const DEFAULT_TOKEN_ADDRESS: Address = address!("0a4dBaF9656Fd88A32D087101Ee8bf399f4bd55f");
pub const DEFAULT_WRAPPER_ADDRESS: Address = address!("83F20F44975D03b1b09e64809B757c47f942BEeA");

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

pub fn default_rpc_url() -> Url {
    // DEFAULT_RPC_URL is a literal covered by the test below
    Url::parse(DEFAULT_RPC_URL).expect("DEFAULT_RPC_URL parses")
}

// Interface names
pub const ERC20_MOCK: &str = "ERC20Mock";
pub const ISAVINGS_DAI: &str = "ISavingsDai";

// Config keys
pub const TOKEN_ADDRESS: &str = "token_address";
pub const WRAPPER_ADDRESS: &str = "wrapper_address";
pub const RPC_URL: &str = "rpc_url";

// Environment overrides
pub const ENV_TOKEN_ADDRESS: &str = "SDAI_FIXTURE_TOKEN_ADDRESS";
pub const ENV_WRAPPER_ADDRESS: &str = "SDAI_FIXTURE_WRAPPER_ADDRESS";
pub const ENV_RPC_URL: &str = "SDAI_FIXTURE_RPC_URL";
