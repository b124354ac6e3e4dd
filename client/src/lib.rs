//! Client orchestration for the tonswap exchange contracts.
//!
//! Turns "swap token A for token B" into a ready-to-broadcast message
//! descriptor without exposing codec or revision details:
//!
//! - [`TonProvider`] / [`JettonResolver`]: the external collaborators this
//!   crate consumes; it never manages connections, retries or deadlines
//! - [`RouterRevision`] / [`PoolRevision`]: one versioned wire-format and
//!   gas-pricing policy per deployed contract generation (V1 today; a V2
//!   plugs in without touching callers)
//! - [`Router`] / [`Pool`]: the caller-facing facades: resolve wallet
//!   addresses, select gas constants, delegate to the codec, and package
//!   `{destination, payload, attached amount}` descriptors
//!
//! Nothing here owns mutable state after construction; every instance is
//! safely shared across concurrent callers. A failed collaborator call
//! produces exactly one failed result: no retry, no partial data.

pub mod error;
pub mod pool;
pub mod provider;
pub mod revision;
pub mod router;

pub use error::{ClientError, ClientResult};
pub use pool::Pool;
pub use provider::{JettonResolver, TonProvider};
pub use revision::{
    PoolGasConstants, PoolRevision, PoolRevisionV1, RouterGasConstants, RouterRevision,
    RouterRevisionV1,
};
pub use router::{MessageData, Router, SwapJettonParams, SwapProxyTonParams};
