//! Wire constants for the exchange contracts.
//!
//! The operation tags are 32-bit values the deployed contracts match on;
//! they must stay byte-for-byte stable across every implementation. The
//! get-method names and the deployed router address are the other fixed
//! points of the protocol surface.

/// Jetton notification carrying an add-liquidity instruction.
pub const OP_ADD_LIQUIDITY: u32 = 0x7362d09c;

/// Provide-liquidity order sent to the router.
pub const OP_PROVIDE_LIQUIDITY: u32 = 0xfcf9e58f;

/// Direct add-liquidity call on an LP account.
pub const OP_DIRECT_ADD_LIQUIDITY: u32 = 0x4cf82803;

/// Swap order; the forward payload of a jetton transfer to the router.
pub const OP_SWAP: u32 = 0x25938561;

/// Refund of a half-filled liquidity provision.
pub const OP_REFUND: u32 = 0x0bf3f447;

/// Reset accumulated gas on the router.
pub const OP_RESET_GAS: u32 = 0x42a0fb43;

/// Collect accumulated protocol fees from a pool.
pub const OP_COLLECT_FEES: u32 = 0x1fcb7d3d;

/// Standard jetton transfer request.
pub const OP_REQUEST_TRANSFER: u32 = 0x0f8a7ea5;

/// Standard jetton burn request.
pub const OP_REQUEST_BURN: u32 = 0x595f07bc;

/// Deployed V1 router contract, canonical text form.
pub const ROUTER_V1_ADDRESS: &str = "EQB3ncyBUTjZUA5EnFKR5_EnOMI9V1tTEAAPaiU71gc4TiUt";

/// Get-method resolving a pool address from two jetton wallet addresses.
pub const METHOD_GET_POOL_ADDRESS: &str = "get_pool_address";

/// Get-method returning a pool's reserves, wallets and fee configuration.
pub const METHOD_GET_POOL_DATA: &str = "get_pool_data";

/// Get-method returning the router's lock flag, admin and code cells.
pub const METHOD_GET_ROUTER_DATA: &str = "get_router_data";
