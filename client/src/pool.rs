//! The pool facade: per-pool gas constants, state queries and body
//! construction, behind the revision the router bound it to.

use num_bigint::BigUint;
use tonswap_codec::PoolData;
use tonswap_types::{Cell, TonAddress};

use crate::error::ClientResult;
use crate::revision::{PoolGasConstants, PoolRevision};

/// A pool client bound to one discovered pool contract. Obtained from
/// [`Router::get_pool`](crate::Router::get_pool) or constructed directly
/// from a known pool revision.
pub struct Pool {
    revision: Box<dyn PoolRevision>,
}

impl Pool {
    pub fn new(revision: Box<dyn PoolRevision>) -> Self {
        Self { revision }
    }

    /// The pool contract address.
    pub fn address(&self) -> &TonAddress {
        self.revision.address()
    }

    /// The fixed gas table; pure, no I/O.
    pub fn gas_constants(&self) -> PoolGasConstants {
        self.revision.gas_constants()
    }

    /// Query and decode the pool's on-chain state.
    pub async fn get_data(&self) -> ClientResult<PoolData> {
        self.revision.get_data().await
    }

    /// Build an LP-token burn body.
    pub fn create_burn_body(
        &self,
        query_id: u64,
        amount: &BigUint,
        response_destination: &TonAddress,
    ) -> ClientResult<Cell> {
        self.revision
            .create_burn_body(query_id, amount, response_destination)
    }

    /// Build a collect-fees body.
    pub fn create_collect_fees_body(&self, query_id: u64) -> ClientResult<Cell> {
        self.revision.create_collect_fees_body(query_id)
    }
}
