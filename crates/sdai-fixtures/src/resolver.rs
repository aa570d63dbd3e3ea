use alloy::primitives::Address;
use error_stack::ResultExt;

use crate::config::FixtureConfig;
use crate::errors::{FixtureError, FixtureErrorExt, FixtureResult};
use crate::handles::{TokenHandle, WrapperHandle};
use crate::provider::{ContractBindingProvider, ContractInterface};
use crate::rpc::{EvmProvider, EvmRpc};

/// The resolved pair of fixture contracts.
#[derive(Clone, Debug)]
pub struct SavingsDaiContracts<H> {
    pub token: TokenHandle<H>,
    pub wrapper: WrapperHandle<H>,
}

/// Binds the DAI mock and the sDAI vault at their configured addresses.
#[derive(Clone, Debug)]
pub struct SavingsDaiFixture<P> {
    config: FixtureConfig,
    provider: P,
}

impl SavingsDaiFixture<EvmRpc<EvmProvider>> {
    /// Fixture talking to the node at `config.rpc_url`.
    pub fn from_rpc(config: FixtureConfig) -> FixtureResult<Self> {
        let provider = EvmRpc::new(config.rpc_url.as_str())?;
        Ok(Self::new(config, provider))
    }
}

impl<P: ContractBindingProvider> SavingsDaiFixture<P> {
    pub fn new(config: FixtureConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Attaches both contracts concurrently. Fails as a whole if either
    /// attachment fails; no partial result is ever returned.
    pub async fn resolve(&self) -> FixtureResult<SavingsDaiContracts<P::Handle>> {
        let (token, wrapper) = futures::try_join!(
            self.attach(ContractInterface::Erc20Mock, self.config.token_address),
            self.attach(ContractInterface::SavingsDai, self.config.wrapper_address),
        )
        .inspect_err(|e| tracing::warn!("fixture resolution failed: {:?}", e))?;

        Ok(SavingsDaiContracts {
            token: TokenHandle::new(token),
            wrapper: WrapperHandle::new(wrapper),
        })
    }

    async fn attach(
        &self,
        interface: ContractInterface,
        address: Address,
    ) -> FixtureResult<P::Handle> {
        tracing::debug!(%interface, %address, "resolving fixture contract");
        self.provider
            .attach(interface, address)
            .await
            .change_context(FixtureError::Resolution)
            .attach_printable(format!("Attaching {} at {}", interface, address))
            .with_contract_info(interface, address, None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use alloy::primitives::address;
    use error_stack::Report;
    use futures::future::join_all;

    use super::*;
    use crate::constants::{DEFAULT_TOKEN_ADDRESS, DEFAULT_WRAPPER_ADDRESS};
    use crate::errors::ContractInfo;
    use crate::provider::BoundContract;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MockContract {
        interface: ContractInterface,
        address: Address,
        id: usize,
    }

    impl BoundContract for MockContract {
        fn address(&self) -> Address {
            self.address
        }

        fn interface(&self) -> ContractInterface {
            self.interface
        }
    }

    /// Treats every address as deployed unless listed in `missing`.
    #[derive(Default)]
    struct MockProvider {
        missing: HashSet<Address>,
        attached: AtomicUsize,
        succeeded: Mutex<Vec<ContractInterface>>,
    }

    impl MockProvider {
        fn missing(addresses: &[Address]) -> Self {
            Self { missing: addresses.iter().copied().collect(), ..Default::default() }
        }
    }

    impl ContractBindingProvider for MockProvider {
        type Handle = MockContract;

        async fn attach(
            &self,
            interface: ContractInterface,
            address: Address,
        ) -> FixtureResult<MockContract> {
            if self.missing.contains(&address) {
                return Err(Report::new(FixtureError::NoContractCode).attach_printable(format!(
                    "Cannot create instance of {}; no code at address {}",
                    interface, address
                )));
            }
            self.succeeded.lock().unwrap().push(interface);
            let id = self.attached.fetch_add(1, Ordering::SeqCst);
            Ok(MockContract { interface, address, id })
        }
    }

    fn fixture(provider: MockProvider) -> SavingsDaiFixture<MockProvider> {
        SavingsDaiFixture::new(FixtureConfig::default(), provider)
    }

    #[tokio::test]
    async fn test_resolve_echoes_configured_addresses() {
        let contracts = fixture(MockProvider::default()).resolve().await.unwrap();

        assert_eq!(
            contracts.token.address(),
            address!("0a4dBaF9656Fd88A32D087101Ee8bf399f4bd55f")
        );
        assert_eq!(
            contracts.wrapper.address(),
            address!("83F20F44975D03b1b09e64809B757c47f942BEeA")
        );
        assert_eq!(contracts.token.interface(), ContractInterface::Erc20Mock);
        assert_eq!(contracts.wrapper.interface(), ContractInterface::SavingsDai);
    }

    #[tokio::test]
    async fn test_resolve_uses_injected_config() {
        let token = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let wrapper = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
        let config =
            FixtureConfig { token_address: token, wrapper_address: wrapper, ..Default::default() };

        let contracts =
            SavingsDaiFixture::new(config, MockProvider::default()).resolve().await.unwrap();
        assert_eq!(contracts.token.address(), token);
        assert_eq!(contracts.wrapper.address(), wrapper);
    }

    #[tokio::test]
    async fn test_resolve_twice_yields_independent_handles() {
        let fixture = fixture(MockProvider::default());

        let first = fixture.resolve().await.unwrap();
        let second = fixture.resolve().await.unwrap();

        assert_eq!(first.token.address(), second.token.address());
        assert_eq!(first.wrapper.address(), second.wrapper.address());
        assert_ne!(first.token.contract().id, second.token.contract().id);
        assert_ne!(first.wrapper.contract().id, second.wrapper.contract().id);
    }

    #[tokio::test]
    async fn test_missing_token_fails_whole_resolution() {
        let error = fixture(MockProvider::missing(&[DEFAULT_TOKEN_ADDRESS]))
            .resolve()
            .await
            .unwrap_err();

        assert_eq!(*error.current_context(), FixtureError::Resolution);
        let info = error.downcast_ref::<ContractInfo>().unwrap();
        assert_eq!(info.interface, ContractInterface::Erc20Mock);
        assert!(format!("{:?}", error).contains("no code at address"));
    }

    #[tokio::test]
    async fn test_missing_wrapper_fails_even_if_token_resolves() {
        let provider = MockProvider::missing(&[DEFAULT_WRAPPER_ADDRESS]);
        let fixture = fixture(provider);

        let error = fixture.resolve().await.unwrap_err();

        assert_eq!(*error.current_context(), FixtureError::Resolution);
        let info = error.downcast_ref::<ContractInfo>().unwrap();
        assert_eq!(info.interface, ContractInterface::SavingsDai);
        assert_eq!(info.address, DEFAULT_WRAPPER_ADDRESS.to_string());

        // the token attached fine; only the wrapper sank the resolution
        assert_eq!(
            *fixture.provider.succeeded.lock().unwrap(),
            vec![ContractInterface::Erc20Mock]
        );
        assert_eq!(fixture.provider.attached.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolution_failure_names_the_contract() {
        let error = fixture(MockProvider::missing(&[DEFAULT_TOKEN_ADDRESS]))
            .resolve()
            .await
            .unwrap_err();

        let infos: Vec<&ContractInfo> =
            error.frames().filter_map(|frame| frame.downcast_ref::<ContractInfo>()).collect();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].interface, ContractInterface::Erc20Mock);
        assert_eq!(infos[0].address, DEFAULT_TOKEN_ADDRESS.to_string());
        assert!(infos[0].method.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_do_not_interfere() {
        let fixture = Arc::new(fixture(MockProvider::default()));

        let results = join_all((0..8).map(|_| {
            let fixture = Arc::clone(&fixture);
            async move { fixture.resolve().await }
        }))
        .await;

        let mut ids = HashSet::new();
        for contracts in results {
            let contracts = contracts.unwrap();
            assert_eq!(contracts.token.address(), DEFAULT_TOKEN_ADDRESS);
            assert_eq!(contracts.wrapper.address(), DEFAULT_WRAPPER_ADDRESS);
            assert!(ids.insert(contracts.token.contract().id));
            assert!(ids.insert(contracts.wrapper.contract().id));
        }
        assert_eq!(ids.len(), 16);
    }

    #[tokio::test]
    async fn test_spawned_resolutions_succeed() {
        let fixture = Arc::new(fixture(MockProvider::default()));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let fixture = Arc::clone(&fixture);
                tokio::spawn(async move {
                    fixture.resolve().await.map(|c| (c.token.address(), c.wrapper.address()))
                })
            })
            .collect();

        for task in tasks {
            let (token, wrapper) = task.await.unwrap().unwrap();
            assert_eq!(token, DEFAULT_TOKEN_ADDRESS);
            assert_eq!(wrapper, DEFAULT_WRAPPER_ADDRESS);
        }
    }
}
