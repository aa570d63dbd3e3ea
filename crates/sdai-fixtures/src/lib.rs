#[macro_use]
extern crate serde_derive;

pub mod bindings;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handles;
pub mod provider;
pub mod resolver;
pub mod rpc;

pub use config::FixtureConfig;
pub use errors::{FixtureError, FixtureResult};
pub use handles::{TokenHandle, WrapperHandle};
pub use provider::{BoundContract, ContractBindingProvider, ContractInterface};
pub use resolver::{SavingsDaiContracts, SavingsDaiFixture};
pub use rpc::{EvmRpc, RpcContract};

/// Resolves the DAI mock and the sDAI vault against the node and addresses
/// described by `SDAI_FIXTURE_*` (defaults: local node, savings deployment).
pub async fn get_savings_dai_contracts(
) -> FixtureResult<SavingsDaiContracts<RpcContract<rpc::EvmProvider>>> {
    let config = FixtureConfig::from_env()?;
    SavingsDaiFixture::from_rpc(config)?.resolve().await
}
