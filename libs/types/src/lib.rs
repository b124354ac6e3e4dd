//! Pure data primitives for the tonswap stack.
//!
//! This crate holds the serialization-unit and value types shared by the
//! codec and client layers:
//!
//! - [`Cell`] / [`CellBuilder`] / [`CellSlice`]: the bounded bit container
//!   the ledger serializes everything into, with a write-once sequential
//!   builder and a cursor-based reader
//! - [`TonAddress`]: workchain + 256-bit account hash, with the canonical
//!   base64-url text form
//!
//! No protocol rules live here; opcodes, message layouts and tuple decoding
//! belong to `tonswap-codec`.

pub mod address;
pub mod cell;

pub use address::{AddressError, TonAddress};
pub use cell::{Cell, CellBuilder, CellError, CellResult, CellSlice, MAX_CELL_BITS, MAX_CELL_REFS};
