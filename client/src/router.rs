//! The router facade: from swap parameters to a broadcast-ready message
//! descriptor.
//!
//! Every build call is a one-shot pipeline: resolve the wallet addresses
//! that appear in wire payloads, build the inner swap body, wrap it as the
//! forward payload of a jetton transfer, and package destination, payload
//! and attached value into a [`MessageData`]. The two paths differ only in
//! where the transfer is sent and how much native value rides along:
//! token→token attaches the fixed swap gas, token→native attaches the
//! proxy-swap gas *plus* the offered amount, since the proxy wallet must
//! receive enough native value to cover both forwarding and conversion.

use std::sync::Arc;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tonswap_codec::{jetton_transfer_body, JettonTransferParams, RouterData, SwapBodyParams};
use tonswap_types::{Cell, TonAddress};
use tracing::debug;

use crate::error::ClientResult;
use crate::pool::Pool;
use crate::provider::JettonResolver;
use crate::revision::RouterRevision;

/// A ready-to-broadcast message: destination, body and attached native
/// value. Signing and submission belong to the caller's wallet stack.
#[derive(Debug, Clone)]
pub struct MessageData {
    pub to: TonAddress,
    pub payload: Cell,
    pub amount: BigUint,
}

/// Parameters of a jetton→jetton swap build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapJettonParams {
    pub user_wallet_address: TonAddress,
    pub offer_jetton_address: TonAddress,
    pub ask_jetton_address: TonAddress,
    pub offer_amount: BigUint,
    pub min_ask_amount: BigUint,
    pub referral_address: Option<TonAddress>,
    pub forward_gas_amount: Option<BigUint>,
    pub query_id: u64,
}

/// Parameters of a native→jetton swap build via the proxy-ton jetton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapProxyTonParams {
    pub user_wallet_address: TonAddress,
    pub proxy_ton_address: TonAddress,
    pub ask_jetton_address: TonAddress,
    pub offer_amount: BigUint,
    pub min_ask_amount: BigUint,
    pub referral_address: Option<TonAddress>,
    pub forward_gas_amount: Option<BigUint>,
    pub query_id: u64,
}

/// Caller-facing router client, bound to one deployed router contract and
/// one revision. Shareable across concurrent callers; owns no mutable
/// state.
pub struct Router {
    resolver: Arc<dyn JettonResolver>,
    address: TonAddress,
    revision: Arc<dyn RouterRevision>,
}

impl Router {
    pub fn new(
        resolver: Arc<dyn JettonResolver>,
        address: TonAddress,
        revision: Arc<dyn RouterRevision>,
    ) -> Self {
        Self {
            resolver,
            address,
            revision,
        }
    }

    /// The router contract address.
    pub fn address(&self) -> &TonAddress {
        &self.address
    }

    /// Resolve the pool trading `token0` against `token1` and return a
    /// bound [`Pool`]. The two wallet resolutions are independent and run
    /// concurrently; both must complete before the pool-address lookup.
    pub async fn get_pool(&self, token0: &TonAddress, token1: &TonAddress) -> ClientResult<Pool> {
        let (wallet0, wallet1) = tokio::try_join!(
            self.resolver.jetton_wallet_address(token0, &self.address),
            self.resolver.jetton_wallet_address(token1, &self.address),
        )?;
        debug!(%wallet0, %wallet1, "resolved router jetton wallets");
        let pool_address = self.revision.get_pool_address(&wallet0, &wallet1).await?;
        Ok(Pool::new(self.revision.construct_pool_revision(pool_address)))
    }

    /// Build a swap order body with the bound revision's layout.
    pub fn create_swap_body(&self, params: &SwapBodyParams) -> ClientResult<Cell> {
        self.revision.create_swap_body(params)
    }

    /// Resolve a pool address from two jetton wallet addresses.
    pub async fn get_pool_address(
        &self,
        token0_wallet: &TonAddress,
        token1_wallet: &TonAddress,
    ) -> ClientResult<TonAddress> {
        self.revision
            .get_pool_address(token0_wallet, token1_wallet)
            .await
    }

    /// Query and decode the router contract state.
    pub async fn get_data(&self) -> ClientResult<RouterData> {
        self.revision.get_data().await
    }

    /// Build a jetton→jetton swap: a transfer of the offered jetton from
    /// the user's wallet to the router, whose forward payload is the swap
    /// order. The attached value is the revision's fixed swap gas.
    pub async fn build_swap_jetton_tx_params(
        &self,
        params: &SwapJettonParams,
    ) -> ClientResult<MessageData> {
        let ask_wallet = self
            .resolver
            .jetton_wallet_address(&params.ask_jetton_address, &self.address)
            .await?;
        let offer_wallet = self
            .resolver
            .jetton_wallet_address(&params.offer_jetton_address, &params.user_wallet_address)
            .await?;

        let body = self.revision.create_swap_body(&SwapBodyParams {
            ask_jetton_wallet_address: ask_wallet,
            min_ask_amount: params.min_ask_amount.clone(),
            user_wallet_address: params.user_wallet_address,
            referral_address: params.referral_address,
        })?;

        let gas = self.revision.gas_constants();
        let forward_ton_amount = params
            .forward_gas_amount
            .clone()
            .unwrap_or(gas.swap_forward);

        let payload = jetton_transfer_body(&JettonTransferParams {
            query_id: params.query_id,
            amount: params.offer_amount.clone(),
            destination: self.address,
            response_destination: None,
            custom_payload: None,
            forward_ton_amount,
            forward_payload: Some(Arc::new(body)),
        })?;

        debug!(to = %offer_wallet, "built jetton swap message");
        Ok(MessageData {
            to: offer_wallet,
            payload,
            amount: gas.swap,
        })
    }

    /// Build a native→jetton swap through the proxy-ton jetton. The
    /// attached value is the proxy-swap gas plus the offered amount,
    /// exactly.
    pub async fn build_swap_proxy_ton_tx_params(
        &self,
        params: &SwapProxyTonParams,
    ) -> ClientResult<MessageData> {
        let ask_wallet = self
            .resolver
            .jetton_wallet_address(&params.ask_jetton_address, &self.address)
            .await?;
        let proxy_wallet = self
            .resolver
            .jetton_wallet_address(&params.proxy_ton_address, &self.address)
            .await?;

        let body = self.revision.create_swap_body(&SwapBodyParams {
            ask_jetton_wallet_address: ask_wallet,
            min_ask_amount: params.min_ask_amount.clone(),
            user_wallet_address: params.user_wallet_address,
            referral_address: params.referral_address,
        })?;

        let gas = self.revision.gas_constants();
        let amount = &gas.swap_ton + &params.offer_amount;
        let forward_ton_amount = params.forward_gas_amount.clone().unwrap_or(gas.swap_ton);

        let payload = jetton_transfer_body(&JettonTransferParams {
            query_id: params.query_id,
            amount: params.offer_amount.clone(),
            destination: self.address,
            response_destination: None,
            custom_payload: None,
            forward_ton_amount,
            forward_payload: Some(Arc::new(body)),
        })?;

        debug!(to = %proxy_wallet, "built proxy-ton swap message");
        Ok(MessageData {
            to: proxy_wallet,
            payload,
            amount,
        })
    }
}
