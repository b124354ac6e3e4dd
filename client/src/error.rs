//! Client-level error composition.
//!
//! Three kinds propagate to the caller, each with identifying context and
//! none swallowed: encode violations from the codec, decode mismatches
//! from result parsing, and collaborator failures surfaced verbatim. The
//! caller decides whether to retry, abort or report; this layer never does.

use thiserror::Error;
use tonswap_codec::{CodecError, DecodeError};
use tonswap_types::{AddressError, CellError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("message encoding failed: {0}")]
    Codec(#[from] CodecError),

    #[error("result decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("cell operation failed: {0}")]
    Cell(#[from] CellError),

    #[error("address parsing failed: {0}")]
    Address(#[from] AddressError),

    #[error("provider call failed: {0}")]
    Provider(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
