//! Account addresses: a signed workchain id plus a 256-bit account hash.
//!
//! The canonical text form is the 48-character base64-url encoding of
//! `tag · workchain · hash · crc16`, where the checksum is CRC16/XMODEM over
//! the first 34 bytes. The raw `workchain:hex` form is accepted on parse as
//! well. An address is always fully constructed; there is no partial or
//! hash-only variant.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Tag byte of the bounceable mainnet text form.
const TAG_BOUNCEABLE: u8 = 0x11;
/// Tag byte of the non-bounceable mainnet text form.
const TAG_NON_BOUNCEABLE: u8 = 0x51;
/// Flag bit marking a testnet-only address in the tag byte.
const FLAG_TESTNET: u8 = 0x80;

/// Address parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address text has length {0}, expected 48 base64 characters or workchain:hex")]
    InvalidLength(usize),

    #[error("address is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("address checksum mismatch: encoded {encoded:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { encoded: u16, computed: u16 },

    #[error("unknown address tag byte {0:#04x}")]
    UnknownTag(u8),

    #[error("invalid workchain field: {0}")]
    InvalidWorkchain(String),

    #[error("invalid account hash: {0}")]
    InvalidHash(String),
}

/// A ledger account address. Immutable value; equality is field-wise.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TonAddress {
    pub workchain: i8,
    pub hash: [u8; 32],
}

impl TonAddress {
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Canonical bounceable mainnet text form.
    pub fn to_base64(&self) -> String {
        let mut bytes = [0u8; 36];
        bytes[0] = TAG_BOUNCEABLE;
        bytes[1] = self.workchain as u8;
        bytes[2..34].copy_from_slice(&self.hash);
        let crc = crc16_xmodem(&bytes[..34]);
        bytes[34] = (crc >> 8) as u8;
        bytes[35] = (crc & 0xff) as u8;
        URL_SAFE_NO_PAD.encode(bytes)
    }

    fn parse_base64(s: &str) -> Result<Self, AddressError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| AddressError::InvalidBase64(e.to_string()))?;
        if bytes.len() != 36 {
            return Err(AddressError::InvalidLength(s.len()));
        }
        match bytes[0] & !FLAG_TESTNET {
            TAG_BOUNCEABLE | TAG_NON_BOUNCEABLE => {}
            tag => return Err(AddressError::UnknownTag(tag)),
        }
        let encoded = u16::from(bytes[34]) << 8 | u16::from(bytes[35]);
        let computed = crc16_xmodem(&bytes[..34]);
        if encoded != computed {
            return Err(AddressError::ChecksumMismatch { encoded, computed });
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok(Self::new(bytes[1] as i8, hash))
    }

    fn parse_raw(s: &str) -> Result<Self, AddressError> {
        let (wc, hex_hash) = s
            .split_once(':')
            .ok_or_else(|| AddressError::InvalidWorkchain(s.to_string()))?;
        let workchain: i8 = wc
            .parse()
            .map_err(|_| AddressError::InvalidWorkchain(wc.to_string()))?;
        let bytes = hex::decode(hex_hash).map_err(|e| AddressError::InvalidHash(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(AddressError::InvalidHash(format!(
                "{} bytes, expected 32",
                bytes.len()
            )));
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes);
        Ok(Self::new(workchain, hash))
    }
}

impl FromStr for TonAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            Self::parse_raw(s)
        } else if s.len() == 48 {
            Self::parse_base64(s)
        } else {
            Err(AddressError::InvalidLength(s.len()))
        }
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TonAddress({}:{})", self.workchain, hex::encode(self.hash))
    }
}

impl Serialize for TonAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for TonAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// CRC16/XMODEM: polynomial 0x1021, zero initial value. The checksum every
/// text-form address carries in its final two bytes.
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
