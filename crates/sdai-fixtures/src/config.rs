use std::fs;
use std::path::Path;
use std::str::FromStr;

use alloy::primitives::Address;
use error_stack::{Report, ResultExt};
use url::Url;

use crate::constants::{
    default_rpc_url, DEFAULT_TOKEN_ADDRESS, DEFAULT_WRAPPER_ADDRESS, ENV_RPC_URL,
    ENV_TOKEN_ADDRESS, ENV_WRAPPER_ADDRESS, RPC_URL, TOKEN_ADDRESS, WRAPPER_ADDRESS,
};
use crate::errors::{ConfigValue, FixtureError, FixtureResult};

/// Where the fixture contracts live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureConfig {
    pub token_address: Address,
    pub wrapper_address: Address,
    pub rpc_url: Url,
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureConfigFile {
    token_address: Option<String>,
    wrapper_address: Option<String>,
    rpc_url: Option<String>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            token_address: DEFAULT_TOKEN_ADDRESS,
            wrapper_address: DEFAULT_WRAPPER_ADDRESS,
            rpc_url: default_rpc_url(),
        }
    }
}

impl FixtureConfig {
    pub fn new(token_address: Address, wrapper_address: Address, rpc_url: Url) -> Self {
        Self { token_address, wrapper_address, rpc_url }
    }

    pub fn from_toml_str(manifest: &str) -> FixtureResult<Self> {
        let file: FixtureConfigFile = toml::from_str(manifest)
            .change_context(FixtureError::Config)
            .attach_printable("Parsing fixture configuration")?;

        Self::default().overlay(file.token_address, file.wrapper_address, file.rpc_url)
    }

    pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let manifest = fs::read_to_string(path)
            .change_context(FixtureError::Config)
            .attach_printable(format!("Reading fixture configuration {}", path.display()))?;
        Self::from_toml_str(&manifest)
    }

    /// Defaults overlaid with `SDAI_FIXTURE_*` environment variables.
    pub fn from_env() -> FixtureResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FixtureResult<Self> {
        Self::default().overlay(
            lookup(ENV_TOKEN_ADDRESS),
            lookup(ENV_WRAPPER_ADDRESS),
            lookup(ENV_RPC_URL),
        )
    }

    fn overlay(
        mut self,
        token_address: Option<String>,
        wrapper_address: Option<String>,
        rpc_url: Option<String>,
    ) -> FixtureResult<Self> {
        if let Some(value) = token_address {
            self.token_address = parse_address(TOKEN_ADDRESS, value.trim())?;
        }
        if let Some(value) = wrapper_address {
            self.wrapper_address = parse_address(WRAPPER_ADDRESS, value.trim())?;
        }
        if let Some(value) = rpc_url {
            let value = value.trim();
            self.rpc_url = Url::parse(value).map_err(|e| invalid_value(RPC_URL, value, e))?;
        }
        Ok(self)
    }
}

fn parse_address(field: &str, value: &str) -> FixtureResult<Address> {
    Address::from_str(value).map_err(|e| invalid_value(field, value, e))
}

fn invalid_value(field: &str, value: &str, e: impl std::fmt::Display) -> Report<FixtureError> {
    Report::new(FixtureError::Config)
        .attach(ConfigValue { field: field.to_string(), value: format!("{}: {}", value, e) })
}
