//! Role-typed contract handles.
//!
//! [`TokenHandle`] and [`WrapperHandle`] wrap whatever a
//! [`ContractBindingProvider`](crate::provider::ContractBindingProvider)
//! returns. Address and interface are always available; on-chain
//! capabilities are available when the handle was bound through
//! [`EvmRpc`](crate::rpc::EvmRpc). Writes are sent from an explicit sender
//! and signed by the node, which is how unlocked and impersonated accounts
//! on a development fork work.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use error_stack::ResultExt;

use crate::bindings::{ISavingsDai, ERC20Mock};
use crate::errors::{FixtureError, FixtureErrorExt, FixtureResult};
use crate::provider::{BoundContract, ContractInterface};
use crate::rpc::RpcContract;

/// Handle to the fungible token (DAI mock).
#[derive(Clone, Debug)]
pub struct TokenHandle<H> {
    contract: H,
}

/// Handle to the yield-bearing wrapper (sDAI).
#[derive(Clone, Debug)]
pub struct WrapperHandle<H> {
    contract: H,
}

impl<H: BoundContract> TokenHandle<H> {
    pub(crate) fn new(contract: H) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn interface(&self) -> ContractInterface {
        self.contract.interface()
    }

    pub fn contract(&self) -> &H {
        &self.contract
    }

    pub fn into_inner(self) -> H {
        self.contract
    }
}

impl<H: BoundContract> WrapperHandle<H> {
    pub(crate) fn new(contract: H) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn interface(&self) -> ContractInterface {
        self.contract.interface()
    }

    pub fn contract(&self) -> &H {
        &self.contract
    }

    pub fn into_inner(self) -> H {
        self.contract
    }
}

fn call_result<T, H: BoundContract>(
    result: Result<T, alloy::contract::Error>,
    contract: &H,
    method: &str,
) -> FixtureResult<T> {
    result.change_context(FixtureError::ContractCall).with_contract_info(
        contract.interface(),
        contract.address(),
        Some(method),
    )
}

impl<P: Provider + Clone> TokenHandle<RpcContract<P>> {
    pub async fn name(&self) -> FixtureResult<String> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let name = call_result(token.name().call().await, &self.contract, "name")?;
        Ok(name)
    }

    pub async fn symbol(&self) -> FixtureResult<String> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let symbol = call_result(token.symbol().call().await, &self.contract, "symbol")?;
        Ok(symbol)
    }

    pub async fn decimals(&self) -> FixtureResult<u8> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let decimals = call_result(token.decimals().call().await, &self.contract, "decimals")?;
        Ok(decimals)
    }

    pub async fn total_supply(&self) -> FixtureResult<U256> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let supply = call_result(token.totalSupply().call().await, &self.contract, "totalSupply")?;
        Ok(supply)
    }

    pub async fn balance_of(&self, account: Address) -> FixtureResult<U256> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let balance = call_result(
            token.balanceOf(account).call().await,
            &self.contract,
            "balanceOf",
        )?;
        Ok(balance)
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> FixtureResult<U256> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let remaining = call_result(
            token.allowance(owner, spender).call().await,
            &self.contract,
            "allowance",
        )?;
        Ok(remaining)
    }

    pub async fn transfer(&self, from: Address, to: Address, amount: U256) -> FixtureResult<TxHash> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let pending = call_result(
            token.transfer(to, amount).from(from).send().await,
            &self.contract,
            "transfer",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn approve(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> FixtureResult<TxHash> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let pending = call_result(
            token.approve(spender, amount).from(owner).send().await,
            &self.contract,
            "approve",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> FixtureResult<TxHash> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let pending = call_result(
            token.transferFrom(from, to, amount).from(spender).send().await,
            &self.contract,
            "transferFrom",
        )?;
        Ok(*pending.tx_hash())
    }

    /// Mints `amount` to `account`. Only the mock exposes this.
    pub async fn mint(&self, from: Address, account: Address, amount: U256) -> FixtureResult<TxHash> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let pending = call_result(
            token.mint(account, amount).from(from).send().await,
            &self.contract,
            "mint",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn burn(&self, from: Address, account: Address, amount: U256) -> FixtureResult<TxHash> {
        let token = ERC20Mock::new(self.address(), self.contract.provider());
        let pending = call_result(
            token.burn(account, amount).from(from).send().await,
            &self.contract,
            "burn",
        )?;
        Ok(*pending.tx_hash())
    }
}

impl<P: Provider + Clone> WrapperHandle<RpcContract<P>> {
    pub async fn asset(&self) -> FixtureResult<Address> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let asset = call_result(vault.asset().call().await, &self.contract, "asset")?;
        Ok(asset)
    }

    pub async fn dai(&self) -> FixtureResult<Address> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let dai = call_result(vault.dai().call().await, &self.contract, "dai")?;
        Ok(dai)
    }

    /// The DSR pot the vault accrues through.
    pub async fn pot(&self) -> FixtureResult<Address> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pot = call_result(vault.pot().call().await, &self.contract, "pot")?;
        Ok(pot)
    }

    pub async fn total_assets(&self) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let assets = call_result(vault.totalAssets().call().await, &self.contract, "totalAssets")?;
        Ok(assets)
    }

    pub async fn balance_of(&self, account: Address) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let balance = call_result(
            vault.balanceOf(account).call().await,
            &self.contract,
            "balanceOf",
        )?;
        Ok(balance)
    }

    pub async fn convert_to_shares(&self, assets: U256) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let shares = call_result(
            vault.convertToShares(assets).call().await,
            &self.contract,
            "convertToShares",
        )?;
        Ok(shares)
    }

    pub async fn convert_to_assets(&self, shares: U256) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let assets = call_result(
            vault.convertToAssets(shares).call().await,
            &self.contract,
            "convertToAssets",
        )?;
        Ok(assets)
    }

    pub async fn preview_deposit(&self, assets: U256) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let shares = call_result(
            vault.previewDeposit(assets).call().await,
            &self.contract,
            "previewDeposit",
        )?;
        Ok(shares)
    }

    pub async fn preview_redeem(&self, shares: U256) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let assets = call_result(
            vault.previewRedeem(shares).call().await,
            &self.contract,
            "previewRedeem",
        )?;
        Ok(assets)
    }

    pub async fn max_withdraw(&self, owner: Address) -> FixtureResult<U256> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let assets = call_result(
            vault.maxWithdraw(owner).call().await,
            &self.contract,
            "maxWithdraw",
        )?;
        Ok(assets)
    }

    pub async fn deposit(
        &self,
        from: Address,
        assets: U256,
        receiver: Address,
    ) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.deposit(assets, receiver).from(from).send().await,
            &self.contract,
            "deposit",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn mint(&self, from: Address, shares: U256, receiver: Address) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.mint(shares, receiver).from(from).send().await,
            &self.contract,
            "mint",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn withdraw(
        &self,
        from: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
    ) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.withdraw(assets, receiver, owner).from(from).send().await,
            &self.contract,
            "withdraw",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn redeem(
        &self,
        from: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
    ) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.redeem(shares, receiver, owner).from(from).send().await,
            &self.contract,
            "redeem",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn approve(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.approve(spender, amount).from(owner).send().await,
            &self.contract,
            "approve",
        )?;
        Ok(*pending.tx_hash())
    }

    pub async fn transfer(&self, from: Address, to: Address, amount: U256) -> FixtureResult<TxHash> {
        let vault = ISavingsDai::new(self.address(), self.contract.provider());
        let pending = call_result(
            vault.transfer(to, amount).from(from).send().await,
            &self.contract,
            "transfer",
        )?;
        Ok(*pending.tx_hash())
    }
}
