use std::fmt;
use std::future::Future;

use alloy::primitives::Address;

use crate::constants::{ERC20_MOCK, ISAVINGS_DAI};
use crate::errors::FixtureResult;

/// Contract interfaces a provider knows how to attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractInterface {
    Erc20Mock,
    SavingsDai,
}

impl ContractInterface {
    pub fn name(&self) -> &'static str {
        match self {
            ContractInterface::Erc20Mock => ERC20_MOCK,
            ContractInterface::SavingsDai => ISAVINGS_DAI,
        }
    }
}

impl fmt::Display for ContractInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live reference to a deployed contract.
pub trait BoundContract {
    fn address(&self) -> Address;
    fn interface(&self) -> ContractInterface;
}

/// Resolves an interface and an address into a contract handle.
///
/// Implementations decide what "deployed" means for their backend. The
/// alloy-backed [`crate::rpc::EvmRpc`] requires code at the address; test
/// doubles can fail on whatever addresses they are told to.
pub trait ContractBindingProvider {
    type Handle: BoundContract;

    fn attach(
        &self,
        interface: ContractInterface,
        address: Address,
    ) -> impl Future<Output = FixtureResult<Self::Handle>> + Send;
}
