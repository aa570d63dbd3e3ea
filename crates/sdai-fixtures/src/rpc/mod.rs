use alloy::primitives::{Address, Bytes};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
};
use alloy::providers::{Identity, Provider, ProviderBuilder, RootProvider};
use error_stack::{Report, ResultExt};
use url::Url;

use crate::errors::{ConfigValue, FixtureError, FixtureErrorExt, FixtureResult, RpcContext};
use crate::provider::{BoundContract, ContractBindingProvider, ContractInterface};

pub type EvmProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
>;

/// Contract binding provider backed by an Ethereum JSON-RPC node.
#[derive(Clone, Debug)]
pub struct EvmRpc<P = EvmProvider> {
    pub url: Url,
    pub provider: P,
}

impl EvmRpc {
    pub fn new(url: &str) -> FixtureResult<Self> {
        let url = Url::parse(url).map_err(|e| {
            Report::new(FixtureError::Config).attach(ConfigValue {
                field: "rpc_url".to_string(),
                value: format!("{}: {}", url, e),
            })
        })?;

        let provider = ProviderBuilder::new().on_http(url.clone());
        Ok(Self { url, provider })
    }
}

impl<P: Provider + Clone> EvmRpc<P> {
    pub fn with_provider(url: Url, provider: P) -> Self {
        Self { url, provider }
    }

    pub async fn get_code(&self, address: &Address) -> FixtureResult<Bytes> {
        self.provider
            .get_code_at(*address)
            .await
            .change_context(FixtureError::Rpc)
            .attach(RpcContext {
                endpoint: self.url.to_string(),
                method: "eth_getCode".to_string(),
                params: Some(format!("[\"{:?}\", \"latest\"]", address)),
            })
            .attach_printable(format!("Getting code at address {}", address))
    }
}

impl<P: Provider + Clone> ContractBindingProvider for EvmRpc<P> {
    type Handle = RpcContract<P>;

    async fn attach(
        &self,
        interface: ContractInterface,
        address: Address,
    ) -> FixtureResult<RpcContract<P>> {
        tracing::debug!(%interface, %address, endpoint = %self.url, "attaching contract");

        let code = self.get_code(&address).await.with_contract_info(interface, address, None)?;
        if code.is_empty() {
            return Err(Report::new(FixtureError::NoContractCode)
                .attach_printable(format!(
                    "Cannot create instance of {}; no code at address {}",
                    interface, address
                )))
            .with_contract_info(interface, address, None);
        }

        Ok(RpcContract { interface, address, provider: self.provider.clone() })
    }
}

/// Contract bound through [`EvmRpc`].
#[derive(Clone, Debug)]
pub struct RpcContract<P> {
    interface: ContractInterface,
    address: Address,
    provider: P,
}

impl<P> RpcContract<P> {
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> BoundContract for RpcContract<P> {
    fn address(&self) -> Address {
        self.address
    }

    fn interface(&self) -> ContractInterface {
        self.interface
    }
}
