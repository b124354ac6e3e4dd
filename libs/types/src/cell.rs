//! The bounded bit container every ledger message serializes into.
//!
//! A [`Cell`] carries up to [`MAX_CELL_BITS`] data bits plus up to
//! [`MAX_CELL_REFS`] child-cell references. Construction goes through
//! [`CellBuilder`], a write-once sequential appender: every store call
//! advances the cursor, capacity violations are typed errors, and
//! [`CellBuilder::build`] consumes the builder so a finished cell can never
//! be mutated. Reading goes through [`CellSlice`], a cursor over the bits
//! and references of a finished cell.
//!
//! Two encodings used throughout the protocol live here next to the
//! container itself, so that builder and reader stay bit-for-bit inverse:
//!
//! - **coins**: variable-length non-negative integer, a 4-bit byte-length
//!   nibble followed by that many big-endian bytes (0..=15, so values up to
//!   2^120 - 1)
//! - **address**: `addr_std$10` tag, one anycast bit (always 0 here), 8-bit
//!   signed workchain, 256-bit hash (267 bits total); an absent address is
//!   `addr_none$00`, exactly two zero bits

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

use crate::address::TonAddress;

/// Maximum number of data bits a single cell can hold.
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum number of child references a single cell can hold.
pub const MAX_CELL_REFS: usize = 4;

/// Serialized width of a standard (`addr_std$10`) address, in bits.
pub const ADDRESS_BITS: usize = 2 + 1 + 8 + 256;

/// Serialized width of an absent (`addr_none$00`) address, in bits.
pub const ADDRESS_NONE_BITS: usize = 2;

/// Cell construction and parsing errors with exact-position context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("cell bit capacity exceeded: {used} bits used, {requested} more requested, max {MAX_CELL_BITS}")]
    BitOverflow { used: usize, requested: usize },

    #[error("cell reference capacity exceeded: cell already holds {MAX_CELL_REFS} references")]
    RefOverflow,

    #[error("unsigned integer width out of range: {bits} bits (max 64)")]
    UnsupportedWidth { bits: usize },

    #[error("value {value:#x} does not fit in {bits} bits")]
    ValueTooWide { value: u64, bits: usize },

    #[error("coins value needs {bytes} bytes, wire format allows at most 15")]
    CoinsOverflow { bytes: usize },

    #[error("slice exhausted: {need} bits requested, {left} left")]
    SliceUnderflow { need: usize, left: usize },

    #[error("slice exhausted: no further child references")]
    RefUnderflow,

    #[error("unsupported address tag {tag:#04b}")]
    InvalidAddressTag { tag: u8 },

    #[error("anycast addresses are not supported")]
    UnsupportedAnycast,
}

/// Result type for cell operations.
pub type CellResult<T> = Result<T, CellError>;

/// An immutable tree node: an ordered bit sequence plus ordered child
/// references. Equality is structural over bits and children.
#[derive(Clone, PartialEq, Eq)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl Cell {
    /// Number of data bits stored in this cell.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Child references, in append order.
    pub fn references(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// Packed data bytes, most significant bit first; the final byte is
    /// zero-padded when `bit_len` is not a multiple of 8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Begin a sequential read over this cell's bits and references.
    pub fn parse(&self) -> CellSlice<'_> {
        CellSlice {
            cell: self,
            bit_pos: 0,
            ref_pos: 0,
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell{{{} bits, x{}", self.bit_len, hex::encode(&self.data))?;
        for r in &self.refs {
            write!(f, ", ref {:?}", r)?;
        }
        write!(f, "}}")
    }
}

/// Write-once sequential builder for a [`Cell`].
///
/// Every store method appends at the current cursor and returns `&mut Self`
/// so layouts read as one chained expression. [`build`](Self::build)
/// consumes the builder; there is no random access and no mutation after
/// finalization.
#[derive(Debug, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl CellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits appended so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    fn ensure_bits(&self, requested: usize) -> CellResult<()> {
        if self.bit_len + requested > MAX_CELL_BITS {
            return Err(CellError::BitOverflow {
                used: self.bit_len,
                requested,
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let byte = self.bit_len / 8;
            self.data[byte] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append a single bit.
    pub fn store_bit(&mut self, bit: bool) -> CellResult<&mut Self> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Append `value` as a big-endian unsigned integer of exactly `bits`
    /// bits. A value wider than the field is an error, not a truncation.
    pub fn store_uint(&mut self, value: u64, bits: usize) -> CellResult<&mut Self> {
        if bits > 64 {
            return Err(CellError::UnsupportedWidth { bits });
        }
        if bits < 64 && value >> bits != 0 {
            return Err(CellError::ValueTooWide { value, bits });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Append a 32-bit unsigned integer (operation tags, rates).
    pub fn store_u32(&mut self, value: u32) -> CellResult<&mut Self> {
        self.store_uint(u64::from(value), 32)
    }

    /// Append a 64-bit unsigned integer (query ids).
    pub fn store_u64(&mut self, value: u64) -> CellResult<&mut Self> {
        self.store_uint(value, 64)
    }

    /// Append raw bytes, eight bits each, in order.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> CellResult<&mut Self> {
        self.ensure_bits(bytes.len() * 8)?;
        for &b in bytes {
            for i in (0..8).rev() {
                self.push_bit((b >> i) & 1 == 1);
            }
        }
        Ok(self)
    }

    /// Append a monetary amount in the variable-length coins format: a
    /// 4-bit byte-length nibble, then that many big-endian bytes.
    ///
    /// The wire format caps the payload at 15 bytes; larger values are a
    /// hard [`CellError::CoinsOverflow`], never a silent narrowing.
    pub fn store_coins(&mut self, value: &BigUint) -> CellResult<&mut Self> {
        if value.is_zero() {
            return self.store_uint(0, 4);
        }
        let bytes = value.to_bytes_be();
        if bytes.len() > 15 {
            return Err(CellError::CoinsOverflow { bytes: bytes.len() });
        }
        self.ensure_bits(4 + bytes.len() * 8)?;
        self.store_uint(bytes.len() as u64, 4)?;
        self.store_bytes(&bytes)?;
        Ok(self)
    }

    /// Append an address. `Some` encodes `addr_std$10` with a zero anycast
    /// bit, the signed 8-bit workchain and the 256-bit hash (267 bits);
    /// `None` encodes `addr_none$00`, exactly two zero bits. The two-bit
    /// sentinel is what deployed contracts accept for "no address", so
    /// absence still produces an address-shaped field.
    pub fn store_address(&mut self, address: Option<&TonAddress>) -> CellResult<&mut Self> {
        match address {
            Some(addr) => {
                self.ensure_bits(ADDRESS_BITS)?;
                self.store_uint(0b100, 3)?; // addr_std$10, anycast absent
                self.store_uint(u64::from(addr.workchain as u8), 8)?;
                self.store_bytes(&addr.hash)?;
            }
            None => {
                self.store_uint(0b00, 2)?;
            }
        }
        Ok(self)
    }

    /// Attach a child cell reference.
    pub fn store_reference(&mut self, child: Arc<Cell>) -> CellResult<&mut Self> {
        if self.refs.len() >= MAX_CELL_REFS {
            return Err(CellError::RefOverflow);
        }
        self.refs.push(child);
        Ok(self)
    }

    /// Finalize into an immutable [`Cell`], consuming the builder.
    pub fn build(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
        }
    }
}

/// Sequential reader over a [`Cell`]'s bits and references.
///
/// Each load advances the cursor; reading past the end of either the bit
/// stream or the reference list is a typed error. References occupy no bit
/// positions, so bit offsets are independent of how many children a cell
/// carries.
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    /// Bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    /// References left to take.
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    fn ensure_bits(&self, need: usize) -> CellResult<()> {
        if need > self.remaining_bits() {
            return Err(CellError::SliceUnderflow {
                need,
                left: self.remaining_bits(),
            });
        }
        Ok(())
    }

    fn next_bit(&mut self) -> bool {
        let byte = self.bit_pos / 8;
        let bit = (self.cell.data[byte] >> (7 - self.bit_pos % 8)) & 1 == 1;
        self.bit_pos += 1;
        bit
    }

    /// Read a single bit.
    pub fn load_bit(&mut self) -> CellResult<bool> {
        self.ensure_bits(1)?;
        Ok(self.next_bit())
    }

    /// Read a big-endian unsigned integer of exactly `bits` bits.
    pub fn load_uint(&mut self, bits: usize) -> CellResult<u64> {
        if bits > 64 {
            return Err(CellError::UnsupportedWidth { bits });
        }
        self.ensure_bits(bits)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.next_bit());
        }
        Ok(value)
    }

    /// Read a 32-bit unsigned integer.
    pub fn load_u32(&mut self) -> CellResult<u32> {
        Ok(self.load_uint(32)? as u32)
    }

    /// Read a 64-bit unsigned integer.
    pub fn load_u64(&mut self) -> CellResult<u64> {
        self.load_uint(64)
    }

    /// Read `len` raw bytes.
    pub fn load_bytes(&mut self, len: usize) -> CellResult<Vec<u8>> {
        self.ensure_bits(len * 8)?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.load_uint(8)? as u8);
        }
        Ok(out)
    }

    /// Read a variable-length coins amount; inverse of
    /// [`CellBuilder::store_coins`].
    pub fn load_coins(&mut self) -> CellResult<BigUint> {
        let len = self.load_uint(4)? as usize;
        let bytes = self.load_bytes(len)?;
        Ok(BigUint::from_bytes_be(&bytes))
    }

    /// Read an address; inverse of [`CellBuilder::store_address`].
    /// `addr_none$00` reads back as `None`.
    pub fn load_address(&mut self) -> CellResult<Option<TonAddress>> {
        let tag = self.load_uint(2)? as u8;
        match tag {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    return Err(CellError::UnsupportedAnycast);
                }
                let workchain = self.load_uint(8)? as u8 as i8;
                let bytes = self.load_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Some(TonAddress::new(workchain, hash)))
            }
            tag => Err(CellError::InvalidAddressTag { tag }),
        }
    }

    /// Take the next child reference, in append order.
    pub fn take_reference(&mut self) -> CellResult<Arc<Cell>> {
        let r = self
            .cell
            .refs
            .get(self.ref_pos)
            .cloned()
            .ok_or(CellError::RefUnderflow)?;
        self.ref_pos += 1;
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> TonAddress {
        TonAddress::new(0, [byte; 32])
    }

    #[test]
    fn test_bit_and_uint_round_trip() {
        let mut b = CellBuilder::new();
        b.store_bit(true)
            .unwrap()
            .store_uint(0xDEADBEEF, 32)
            .unwrap()
            .store_uint(7, 3)
            .unwrap()
            .store_u64(u64::MAX)
            .unwrap();
        let cell = b.build();
        assert_eq!(cell.bit_len(), 1 + 32 + 3 + 64);

        let mut s = cell.parse();
        assert!(s.load_bit().unwrap());
        assert_eq!(s.load_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(s.load_uint(3).unwrap(), 7);
        assert_eq!(s.load_u64().unwrap(), u64::MAX);
        assert_eq!(s.remaining_bits(), 0);
    }

    #[test]
    fn test_uint_too_wide_is_error() {
        let mut b = CellBuilder::new();
        let err = b.store_uint(16, 4).unwrap_err();
        assert_eq!(err, CellError::ValueTooWide { value: 16, bits: 4 });
    }

    #[test]
    fn test_bit_capacity_is_hard_limit() {
        let mut b = CellBuilder::new();
        for _ in 0..15 {
            b.store_u64(0).unwrap();
        }
        // 960 bits used; 63 more fit, 64 do not.
        b.store_uint(0, 63).unwrap();
        let err = b.store_bit(true).unwrap_err();
        assert_eq!(
            err,
            CellError::BitOverflow {
                used: MAX_CELL_BITS,
                requested: 1
            }
        );
    }

    #[test]
    fn test_ref_capacity_is_hard_limit() {
        let child = Arc::new(CellBuilder::new().build());
        let mut b = CellBuilder::new();
        for _ in 0..MAX_CELL_REFS {
            b.store_reference(child.clone()).unwrap();
        }
        assert_eq!(b.store_reference(child).unwrap_err(), CellError::RefOverflow);
    }

    #[test]
    fn test_coins_round_trip() {
        let values = [
            BigUint::from(0u8),
            BigUint::from(1u8),
            BigUint::from(300_000_000u64),
            BigUint::from(u64::MAX),
            // 15-byte boundary: 2^120 - 1 is the largest encodable amount
            (BigUint::from(1u8) << 120u32) - 1u8,
        ];
        for v in &values {
            let mut b = CellBuilder::new();
            b.store_coins(v).unwrap();
            let cell = b.build();
            let expected_bits = 4 + 8 * ((v.bits() as usize + 7) / 8);
            assert_eq!(cell.bit_len(), if v.is_zero() { 4 } else { expected_bits });
            assert_eq!(&cell.parse().load_coins().unwrap(), v);
        }
    }

    #[test]
    fn test_coins_overflow_is_error() {
        let too_big = BigUint::from(1u8) << 120u32;
        let mut b = CellBuilder::new();
        assert_eq!(
            b.store_coins(&too_big).unwrap_err(),
            CellError::CoinsOverflow { bytes: 16 }
        );
    }

    #[test]
    fn test_address_round_trip() {
        let a = TonAddress::new(-1, [0xAB; 32]);
        let mut b = CellBuilder::new();
        b.store_address(Some(&a)).unwrap();
        let cell = b.build();
        assert_eq!(cell.bit_len(), ADDRESS_BITS);
        assert_eq!(cell.parse().load_address().unwrap(), Some(a));
    }

    #[test]
    fn test_absent_address_is_two_zero_bits() {
        let mut b = CellBuilder::new();
        b.store_address(None).unwrap();
        let cell = b.build();
        assert_eq!(cell.bit_len(), ADDRESS_NONE_BITS);
        assert_eq!(cell.data()[0], 0);
        assert_eq!(cell.parse().load_address().unwrap(), None);
    }

    #[test]
    fn test_references_preserve_order() {
        let c1 = Arc::new({
            let mut b = CellBuilder::new();
            b.store_u32(1).unwrap();
            b.build()
        });
        let c2 = Arc::new({
            let mut b = CellBuilder::new();
            b.store_u32(2).unwrap();
            b.build()
        });
        let mut b = CellBuilder::new();
        b.store_reference(c1.clone())
            .unwrap()
            .store_reference(c2.clone())
            .unwrap();
        let cell = b.build();

        let mut s = cell.parse();
        assert_eq!(s.take_reference().unwrap(), c1);
        assert_eq!(s.take_reference().unwrap(), c2);
        assert_eq!(s.take_reference().unwrap_err(), CellError::RefUnderflow);
    }

    #[test]
    fn test_slice_underflow_is_error() {
        let mut b = CellBuilder::new();
        b.store_uint(0b101, 3).unwrap();
        let cell = b.build();
        let mut s = cell.parse();
        assert_eq!(
            s.load_uint(4).unwrap_err(),
            CellError::SliceUnderflow { need: 4, left: 3 }
        );
    }

    #[test]
    fn test_identical_appends_build_identical_cells() {
        let build = || {
            let mut b = CellBuilder::new();
            b.store_u32(0x25938561)
                .unwrap()
                .store_address(Some(&addr(0x42)))
                .unwrap()
                .store_coins(&BigUint::from(100_000_000u64))
                .unwrap();
            b.build()
        };
        assert_eq!(build(), build());
    }
}
