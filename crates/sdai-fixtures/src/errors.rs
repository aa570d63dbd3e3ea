use error_stack::{Context, Report};
use std::fmt;

use crate::provider::ContractInterface;

pub type FixtureResult<T> = Result<T, Report<FixtureError>>;

/// Fixture error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureError {
    /// A contract handle could not be resolved for the fixture
    Resolution,
    /// The node could not be reached or answered with an error
    Rpc,
    /// The account at the requested address holds no code
    NoContractCode,
    /// A call or transaction against a bound contract failed
    ContractCall,
    /// Invalid fixture configuration
    Config,
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Resolution => write!(f, "Failed to resolve fixture contracts"),
            FixtureError::Rpc => write!(f, "RPC communication error"),
            FixtureError::NoContractCode => write!(f, "No contract code at address"),
            FixtureError::ContractCall => write!(f, "Contract call failed"),
            FixtureError::Config => write!(f, "Invalid fixture configuration"),
        }
    }
}

impl Context for FixtureError {}

/// RPC request details, attached to node failures
#[derive(Debug, Clone)]
pub struct RpcContext {
    pub endpoint: String,
    pub method: String,
    pub params: Option<String>,
}

impl fmt::Display for RpcContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC {} at {}", self.method, self.endpoint)?;
        if let Some(params) = &self.params {
            write!(f, " params: {}", params)?;
        }
        Ok(())
    }
}

/// Contract information for attach/call errors
#[derive(Debug, Clone)]
pub struct ContractInfo {
    pub interface: ContractInterface,
    pub address: String,
    pub method: Option<String>,
}

impl fmt::Display for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract: {} at {}", self.interface, self.address)?;
        if let Some(method) = &self.method {
            write!(f, " method: {}", method)?;
        }
        Ok(())
    }
}

/// Configuration key that failed to parse
#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub field: String,
    pub value: String,
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for `{}`: {}", self.field, self.value)
    }
}

pub trait FixtureErrorExt {
    /// Attach contract information
    fn with_contract_info(
        self,
        interface: ContractInterface,
        address: impl fmt::Display,
        method: Option<&str>,
    ) -> Self;
}

impl<T> FixtureErrorExt for FixtureResult<T> {
    fn with_contract_info(
        self,
        interface: ContractInterface,
        address: impl fmt::Display,
        method: Option<&str>,
    ) -> Self {
        self.map_err(|e| {
            e.attach(ContractInfo {
                interface,
                address: address.to_string(),
                method: method.map(str::to_string),
            })
        })
    }
}
