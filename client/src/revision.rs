//! Versioned protocol policy: wire layouts and gas pricing per contract
//! generation.
//!
//! A revision is a stateless policy object bound to one contract address
//! and the provider handle it was constructed with. Callers pick the
//! revision at construction time; nothing inspects contract bytecode at
//! runtime. Adding a V2 means adding one more implementation of each
//! trait; callers and facades stay untouched.

use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tonswap_codec::stack::address_at;
use tonswap_codec::{
    burn_body, collect_fees_body, decode_pool_data, decode_router_data, provide_liquidity_body,
    swap_body, PoolData, RouterData, StackValue, SwapBodyParams, METHOD_GET_POOL_ADDRESS,
    METHOD_GET_POOL_DATA, METHOD_GET_ROUTER_DATA,
};
use tonswap_types::{Cell, CellBuilder, TonAddress};
use tracing::debug;

use crate::error::ClientResult;
use crate::provider::TonProvider;

/// Fixed gas table of one router revision, in nano units. Constructed per
/// revision and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterGasConstants {
    pub swap: BigUint,
    pub provide_lp: BigUint,
    pub swap_forward: BigUint,
    pub swap_ton: BigUint,
    pub provide_lp_forward: BigUint,
}

/// Fixed gas table of one pool revision, in nano units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolGasConstants {
    pub collect_fees: BigUint,
    pub burn: BigUint,
}

/// One router contract generation: its gas table, its body layouts, and
/// its read-only queries.
#[async_trait]
pub trait RouterRevision: Send + Sync {
    /// The router contract this revision is bound to.
    fn address(&self) -> &TonAddress;

    /// The fixed gas table; pure, no I/O.
    fn gas_constants(&self) -> RouterGasConstants;

    /// Build a swap order body with this revision's layout.
    fn create_swap_body(&self, params: &SwapBodyParams) -> ClientResult<Cell>;

    /// Build a provide-liquidity order body with this revision's layout.
    fn create_provide_liquidity_body(
        &self,
        router_wallet_address: &TonAddress,
        min_lp_out: &BigUint,
    ) -> ClientResult<Cell>;

    /// Resolve the pool contract for a pair of jetton wallet addresses via
    /// the router's get-method.
    async fn get_pool_address(
        &self,
        token0_wallet: &TonAddress,
        token1_wallet: &TonAddress,
    ) -> ClientResult<TonAddress>;

    /// Bind a pool revision of the same generation to a discovered pool
    /// address.
    fn construct_pool_revision(&self, address: TonAddress) -> Box<dyn PoolRevision>;

    /// Query and decode the router contract state.
    async fn get_data(&self) -> ClientResult<RouterData>;
}

/// One pool contract generation.
#[async_trait]
pub trait PoolRevision: Send + Sync {
    /// The pool contract this revision is bound to.
    fn address(&self) -> &TonAddress;

    /// The fixed gas table; pure, no I/O.
    fn gas_constants(&self) -> PoolGasConstants;

    /// Build an LP-token burn body with this revision's layout.
    fn create_burn_body(
        &self,
        query_id: u64,
        amount: &BigUint,
        response_destination: &TonAddress,
    ) -> ClientResult<Cell>;

    /// Build a collect-fees body with this revision's layout.
    fn create_collect_fees_body(&self, query_id: u64) -> ClientResult<Cell>;

    /// Query and decode the pool contract state.
    async fn get_data(&self) -> ClientResult<PoolData>;
}

/// The V1 router generation.
pub struct RouterRevisionV1 {
    provider: Arc<dyn TonProvider>,
    address: TonAddress,
}

impl RouterRevisionV1 {
    pub fn new(provider: Arc<dyn TonProvider>, address: TonAddress) -> Self {
        Self { provider, address }
    }
}

fn single_address_cell(address: &TonAddress) -> ClientResult<Cell> {
    let mut b = CellBuilder::new();
    b.store_address(Some(address))?;
    Ok(b.build())
}

#[async_trait]
impl RouterRevision for RouterRevisionV1 {
    fn address(&self) -> &TonAddress {
        &self.address
    }

    fn gas_constants(&self) -> RouterGasConstants {
        RouterGasConstants {
            swap: BigUint::from(300_000_000u64), // 0.3 TON
            provide_lp: BigUint::from(300_000_000u64),
            swap_forward: BigUint::from(265_000_000u64),
            swap_ton: BigUint::from(240_000_000u64),
            provide_lp_forward: BigUint::from(265_000_000u64),
        }
    }

    fn create_swap_body(&self, params: &SwapBodyParams) -> ClientResult<Cell> {
        Ok(swap_body(params)?)
    }

    fn create_provide_liquidity_body(
        &self,
        router_wallet_address: &TonAddress,
        min_lp_out: &BigUint,
    ) -> ClientResult<Cell> {
        Ok(provide_liquidity_body(router_wallet_address, min_lp_out)?)
    }

    async fn get_pool_address(
        &self,
        token0_wallet: &TonAddress,
        token1_wallet: &TonAddress,
    ) -> ClientResult<TonAddress> {
        let args = vec![
            StackValue::Slice(Arc::new(single_address_cell(token0_wallet)?)),
            StackValue::Slice(Arc::new(single_address_cell(token1_wallet)?)),
        ];
        let result = self
            .provider
            .run_get_method(&self.address, METHOD_GET_POOL_ADDRESS, args)
            .await?;
        let pool = address_at(METHOD_GET_POOL_ADDRESS, &result, 0, "pool_address")?;
        debug!(pool = %pool, "resolved pool address");
        Ok(pool)
    }

    fn construct_pool_revision(&self, address: TonAddress) -> Box<dyn PoolRevision> {
        Box::new(PoolRevisionV1::new(self.provider.clone(), address))
    }

    async fn get_data(&self) -> ClientResult<RouterData> {
        let result = self
            .provider
            .run_get_method(&self.address, METHOD_GET_ROUTER_DATA, Vec::new())
            .await?;
        Ok(decode_router_data(&result)?)
    }
}

/// The V1 pool generation.
pub struct PoolRevisionV1 {
    provider: Arc<dyn TonProvider>,
    address: TonAddress,
}

impl PoolRevisionV1 {
    pub fn new(provider: Arc<dyn TonProvider>, address: TonAddress) -> Self {
        Self { provider, address }
    }
}

#[async_trait]
impl PoolRevision for PoolRevisionV1 {
    fn address(&self) -> &TonAddress {
        &self.address
    }

    fn gas_constants(&self) -> PoolGasConstants {
        PoolGasConstants {
            collect_fees: BigUint::from(1_100_000_000u64), // 1.1 TON
            burn: BigUint::from(500_000_000u64),
        }
    }

    fn create_burn_body(
        &self,
        query_id: u64,
        amount: &BigUint,
        response_destination: &TonAddress,
    ) -> ClientResult<Cell> {
        Ok(burn_body(query_id, amount, response_destination)?)
    }

    fn create_collect_fees_body(&self, query_id: u64) -> ClientResult<Cell> {
        Ok(collect_fees_body(query_id)?)
    }

    async fn get_data(&self) -> ClientResult<PoolData> {
        let result = self
            .provider
            .run_get_method(&self.address, METHOD_GET_POOL_DATA, Vec::new())
            .await?;
        Ok(decode_pool_data(&result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_router_gas_table() {
        struct NoProvider;
        #[async_trait]
        impl TonProvider for NoProvider {
            async fn run_get_method(
                &self,
                _address: &TonAddress,
                _method: &str,
                _stack: Vec<StackValue>,
            ) -> ClientResult<Vec<StackValue>> {
                unreachable!("gas table lookup performs no I/O")
            }
        }

        let rev = RouterRevisionV1::new(Arc::new(NoProvider), TonAddress::new(0, [0; 32]));
        let gas = rev.gas_constants();
        assert_eq!(gas.swap, BigUint::from(300_000_000u64));
        assert_eq!(gas.provide_lp, BigUint::from(300_000_000u64));
        assert_eq!(gas.swap_forward, BigUint::from(265_000_000u64));
        assert_eq!(gas.swap_ton, BigUint::from(240_000_000u64));
        assert_eq!(gas.provide_lp_forward, BigUint::from(265_000_000u64));

        let pool = rev.construct_pool_revision(TonAddress::new(0, [1; 32]));
        let pool_gas = pool.gas_constants();
        assert_eq!(pool_gas.collect_fees, BigUint::from(1_100_000_000u64));
        assert_eq!(pool_gas.burn, BigUint::from(500_000_000u64));
    }
}
