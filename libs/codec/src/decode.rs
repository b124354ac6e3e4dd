//! Positional decoders for the contract get-method results.
//!
//! Each decoder reads a fixed slot layout: the slot index, not any
//! self-describing tag, determines the expected runtime type. The first
//! slot whose shape does not match fails the whole decode with a
//! slot-identifying error; a partially-filled record is never returned.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tonswap_types::{Cell, TonAddress};

use crate::constants::{METHOD_GET_POOL_DATA, METHOD_GET_ROUTER_DATA};
use crate::error::DecodeResult;
use crate::stack::{address_at, cell_at, int_at, uint_at, StackValue};

/// Snapshot of a pool's on-chain state, fresh per query.
///
/// Fee rates are numerators over the contract's fixed denominator; the
/// collected fields accumulate protocol fees awaiting collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolData {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub token0_wallet_address: TonAddress,
    pub token1_wallet_address: TonAddress,
    pub lp_fee: BigUint,
    pub protocol_fee: BigUint,
    pub ref_fee: BigUint,
    pub protocol_fee_address: TonAddress,
    pub collected_token0_protocol_fee: BigUint,
    pub collected_token1_protocol_fee: BigUint,
}

/// Router contract state as of the block it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterData {
    pub is_locked: bool,
    pub admin_address: TonAddress,
    pub temp_upgrade: Arc<Cell>,
    pub pool_code: Arc<Cell>,
    pub jetton_lp_wallet_code: Arc<Cell>,
    pub lp_account_code: Arc<Cell>,
}

/// Decode the ten-slot `get_pool_data` result.
pub fn decode_pool_data(stack: &[StackValue]) -> DecodeResult<PoolData> {
    const M: &str = METHOD_GET_POOL_DATA;
    Ok(PoolData {
        reserve0: uint_at(M, stack, 0, "reserve0")?,
        reserve1: uint_at(M, stack, 1, "reserve1")?,
        token0_wallet_address: address_at(M, stack, 2, "token0_wallet_address")?,
        token1_wallet_address: address_at(M, stack, 3, "token1_wallet_address")?,
        lp_fee: uint_at(M, stack, 4, "lp_fee")?,
        protocol_fee: uint_at(M, stack, 5, "protocol_fee")?,
        ref_fee: uint_at(M, stack, 6, "ref_fee")?,
        protocol_fee_address: address_at(M, stack, 7, "protocol_fee_address")?,
        collected_token0_protocol_fee: uint_at(M, stack, 8, "collected_token0_protocol_fee")?,
        collected_token1_protocol_fee: uint_at(M, stack, 9, "collected_token1_protocol_fee")?,
    })
}

/// Decode the six-slot `get_router_data` result.
pub fn decode_router_data(stack: &[StackValue]) -> DecodeResult<RouterData> {
    const M: &str = METHOD_GET_ROUTER_DATA;
    // The contract reports zero in the first slot while locked.
    let is_locked = int_at(M, stack, 0, "is_locked")?.is_zero();
    Ok(RouterData {
        is_locked,
        admin_address: address_at(M, stack, 1, "admin_address")?,
        temp_upgrade: cell_at(M, stack, 2, "temp_upgrade")?,
        pool_code: cell_at(M, stack, 3, "pool_code")?,
        jetton_lp_wallet_code: cell_at(M, stack, 4, "jetton_lp_wallet_code")?,
        lp_account_code: cell_at(M, stack, 5, "lp_account_code")?,
    })
}
