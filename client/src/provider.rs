//! External collaborator traits.
//!
//! The client consumes two capabilities it deliberately does not
//! implement: executing read-only get-methods against the ledger, and
//! resolving a jetton master + owner pair to the owner's wallet
//! sub-contract. Connection management, pooling, retries and deadlines all
//! belong to the implementations behind these traits; a single failed call
//! here surfaces as a single failed result.

use async_trait::async_trait;
use tonswap_codec::StackValue;
use tonswap_types::TonAddress;

use crate::error::ClientResult;

/// Read-only contract invocation at the current chain head.
#[async_trait]
pub trait TonProvider: Send + Sync {
    /// Run `method` on the contract at `address`, passing `stack` as the
    /// positional arguments, and return the raw positional result stack.
    async fn run_get_method(
        &self,
        address: &TonAddress,
        method: &str,
        stack: Vec<StackValue>,
    ) -> ClientResult<Vec<StackValue>>;
}

/// Per-owner jetton wallet resolution.
#[async_trait]
pub trait JettonResolver: Send + Sync {
    /// Return `owner`'s wallet sub-contract address for the jetton rooted
    /// at `master`.
    async fn jetton_wallet_address(
        &self,
        master: &TonAddress,
        owner: &TonAddress,
    ) -> ClientResult<TonAddress>;
}
