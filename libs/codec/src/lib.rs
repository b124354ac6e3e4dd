//! # Protocol rules for the tonswap exchange contracts
//!
//! ## Purpose
//!
//! This crate is the "rules" layer between pure data structures and the
//! client orchestration above it:
//!
//! - Exact binary construction of contract request bodies (swap,
//!   provide-liquidity, jetton transfer/burn, fee collection)
//! - Positional decoding of heterogeneously-typed get-method result stacks
//!   into strongly-typed records
//! - The wire constants every reimplementation must match byte-for-byte:
//!   operation tags, get-method names, deployed contract addresses
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types  →  [tonswap-codec]  →  client/
//!     ↑               ↓                 ↓
//! Pure Data      Protocol Rules     Orchestration
//! Cell/Address   Body Layouts       Revisions, Router/Pool
//!                Stack Decoding     Providers
//! ```
//!
//! ## What This Crate Does NOT Contain
//!
//! - Network transport or get-method execution (client collaborator traits)
//! - The cell/address primitives themselves (libs/types)
//! - Key management, signing or broadcast (out of scope entirely)
//!
//! Every builder here is a deterministic pure function: identical inputs
//! produce bit-identical cells, and the only failure modes are typed encode
//! violations (capacity, amount width), never external state.

pub mod constants;
pub mod decode;
pub mod error;
pub mod message;
pub mod stack;

pub use constants::*;
pub use decode::{decode_pool_data, decode_router_data, PoolData, RouterData};
pub use error::{CodecError, CodecResult, DecodeError, DecodeResult};
pub use message::{
    burn_body, collect_fees_body, jetton_transfer_body, provide_liquidity_body, swap_body,
    JettonTransferParams, SwapBodyParams,
};
pub use stack::StackValue;
