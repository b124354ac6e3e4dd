//! Get-method result stacks: an ordered, heterogeneously-typed value
//! sequence.
//!
//! A read-only contract call returns values whose runtime type differs per
//! position. [`StackValue`] is the closed sum of the shapes this protocol
//! consumes (integer, cell slice, cell reference) and the typed accessors
//! here turn "slot N must be an X" into a single call that either yields
//! the value or a slot-identifying [`DecodeError`]. No defaults, no
//! coercion: a mismatched slot fails the whole decode.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use tonswap_types::{Cell, TonAddress};

use crate::error::{DecodeError, DecodeResult};

/// One positional value of a get-method result stack.
#[derive(Debug, Clone, PartialEq)]
pub enum StackValue {
    /// A signed arbitrary-precision integer.
    Int(BigInt),
    /// A cell to be read as a bit slice (embedded addresses).
    Slice(Arc<Cell>),
    /// An opaque cell reference (code blobs, payloads).
    Cell(Arc<Cell>),
}

impl StackValue {
    /// Runtime shape name used in decode mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackValue::Int(_) => "int",
            StackValue::Slice(_) => "slice",
            StackValue::Cell(_) => "cell",
        }
    }
}

fn at<'a>(
    method: &'static str,
    stack: &'a [StackValue],
    slot: usize,
) -> DecodeResult<&'a StackValue> {
    stack.get(slot).ok_or(DecodeError::TooShort {
        method,
        need: slot + 1,
        got: stack.len(),
    })
}

/// Slot `slot` as a signed integer.
pub fn int_at<'a>(
    method: &'static str,
    stack: &'a [StackValue],
    slot: usize,
    field: &'static str,
) -> DecodeResult<&'a BigInt> {
    match at(method, stack, slot)? {
        StackValue::Int(v) => Ok(v),
        other => Err(DecodeError::SlotType {
            method,
            slot,
            field,
            expected: "int",
            actual: other.type_name(),
        }),
    }
}

/// Slot `slot` as a non-negative integer (amounts, rates, reserves).
pub fn uint_at(
    method: &'static str,
    stack: &[StackValue],
    slot: usize,
    field: &'static str,
) -> DecodeResult<BigUint> {
    let v = int_at(method, stack, slot, field)?;
    v.to_biguint().ok_or(DecodeError::SlotType {
        method,
        slot,
        field,
        expected: "non-negative int",
        actual: "negative int",
    })
}

/// Slot `slot` as a slice holding exactly one standard address.
pub fn address_at(
    method: &'static str,
    stack: &[StackValue],
    slot: usize,
    field: &'static str,
) -> DecodeResult<TonAddress> {
    let cell = match at(method, stack, slot)? {
        StackValue::Slice(cell) => cell,
        other => {
            return Err(DecodeError::SlotType {
                method,
                slot,
                field,
                expected: "slice",
                actual: other.type_name(),
            })
        }
    };
    let addr = cell
        .parse()
        .load_address()
        .map_err(|source| DecodeError::SlotAddress {
            method,
            slot,
            field,
            source,
        })?;
    addr.ok_or(DecodeError::SlotType {
        method,
        slot,
        field,
        expected: "addr_std slice",
        actual: "addr_none slice",
    })
}

/// Slot `slot` as an opaque cell reference.
pub fn cell_at(
    method: &'static str,
    stack: &[StackValue],
    slot: usize,
    field: &'static str,
) -> DecodeResult<Arc<Cell>> {
    match at(method, stack, slot)? {
        StackValue::Cell(cell) => Ok(cell.clone()),
        other => Err(DecodeError::SlotType {
            method,
            slot,
            field,
            expected: "cell",
            actual: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonswap_types::CellBuilder;

    fn address_slice(addr: &TonAddress) -> StackValue {
        let mut b = CellBuilder::new();
        b.store_address(Some(addr)).unwrap();
        StackValue::Slice(Arc::new(b.build()))
    }

    #[test]
    fn test_int_at_type_mismatch() {
        let stack = vec![StackValue::Cell(Arc::new(CellBuilder::new().build()))];
        let err = int_at("m", &stack, 0, "f").unwrap_err();
        assert_eq!(
            err,
            DecodeError::SlotType {
                method: "m",
                slot: 0,
                field: "f",
                expected: "int",
                actual: "cell",
            }
        );
    }

    #[test]
    fn test_uint_at_rejects_negative() {
        let stack = vec![StackValue::Int(BigInt::from(-1))];
        let err = uint_at("m", &stack, 0, "f").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SlotType {
                expected: "non-negative int",
                ..
            }
        ));
    }

    #[test]
    fn test_address_at_round_trip() {
        let addr = TonAddress::new(0, [7; 32]);
        let stack = vec![address_slice(&addr)];
        assert_eq!(address_at("m", &stack, 0, "f").unwrap(), addr);
    }

    #[test]
    fn test_address_at_rejects_addr_none() {
        let mut b = CellBuilder::new();
        b.store_address(None).unwrap();
        let stack = vec![StackValue::Slice(Arc::new(b.build()))];
        let err = address_at("m", &stack, 0, "f").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SlotType {
                actual: "addr_none slice",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_slot_reports_length() {
        let err = cell_at("m", &[], 2, "f").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                method: "m",
                need: 3,
                got: 0,
            }
        );
    }
}
