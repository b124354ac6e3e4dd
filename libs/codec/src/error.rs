//! Codec-level errors: encode violations and decode mismatches.
//!
//! Every variant names the operation or result slot it failed on, so a
//! caller can report precisely which field of which message broke without
//! string-matching. Nothing here is retried or degraded; the first failure
//! aborts the whole encode or decode.

use thiserror::Error;
use tonswap_types::CellError;

/// Message construction failed. Only encode violations surface here;
/// builders take no external input beyond their typed parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("encoding {op} field `{field}`: {source}")]
    Encode {
        op: &'static str,
        field: &'static str,
        #[source]
        source: CellError,
    },
}

/// Result type for message construction.
pub type CodecResult<T> = Result<T, CodecError>;

/// A get-method result stack did not match the expected positional layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{method} result too short: need {need} slots, got {got}")]
    TooShort {
        method: &'static str,
        need: usize,
        got: usize,
    },

    #[error("{method} result slot {slot} (`{field}`): expected {expected}, got {actual}")]
    SlotType {
        method: &'static str,
        slot: usize,
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{method} result slot {slot} (`{field}`): embedded address: {source}")]
    SlotAddress {
        method: &'static str,
        slot: usize,
        field: &'static str,
        #[source]
        source: CellError,
    },
}

/// Result type for get-method result decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

pub(crate) fn encode_ctx(
    op: &'static str,
    field: &'static str,
) -> impl FnOnce(CellError) -> CodecError {
    move |source| CodecError::Encode { op, field, source }
}
