//! Contract message body construction.
//!
//! Each function is a deterministic pure translation from typed parameters
//! to the exact bit layout the deployed contracts verify. Optional
//! sub-messages follow the wire contract's "reference, then presence bit"
//! append order; since references occupy no bit positions, the presence bit
//! always directly follows the preceding field in the bit stream. An absent
//! response destination still encodes an address-shaped value, the two-bit
//! `addr_none$00` sentinel.

use std::sync::Arc;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tonswap_types::{Cell, CellBuilder, TonAddress};
use tracing::trace;

use crate::constants::{
    OP_COLLECT_FEES, OP_PROVIDE_LIQUIDITY, OP_REQUEST_BURN, OP_REQUEST_TRANSFER, OP_SWAP,
};
use crate::error::{encode_ctx, CodecResult};

/// Parameters of a swap order body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapBodyParams {
    pub ask_jetton_wallet_address: TonAddress,
    pub min_ask_amount: BigUint,
    pub user_wallet_address: TonAddress,
    pub referral_address: Option<TonAddress>,
}

/// Parameters of a standard jetton transfer body.
#[derive(Debug, Clone)]
pub struct JettonTransferParams {
    pub query_id: u64,
    pub amount: BigUint,
    pub destination: TonAddress,
    pub response_destination: Option<TonAddress>,
    pub custom_payload: Option<Arc<Cell>>,
    pub forward_ton_amount: BigUint,
    pub forward_payload: Option<Arc<Cell>>,
}

/// Build a swap order: op, ask jetton wallet, minimum ask amount, user
/// wallet, then one presence bit; a referral address, when present, is
/// inlined in the same cell right after the bit.
pub fn swap_body(params: &SwapBodyParams) -> CodecResult<Cell> {
    const OP: &str = "swap";
    let mut b = CellBuilder::new();
    b.store_u32(OP_SWAP).map_err(encode_ctx(OP, "op"))?;
    b.store_address(Some(&params.ask_jetton_wallet_address))
        .map_err(encode_ctx(OP, "ask_jetton_wallet_address"))?;
    b.store_coins(&params.min_ask_amount)
        .map_err(encode_ctx(OP, "min_ask_amount"))?;
    b.store_address(Some(&params.user_wallet_address))
        .map_err(encode_ctx(OP, "user_wallet_address"))?;
    match &params.referral_address {
        Some(referral) => {
            b.store_bit(true).map_err(encode_ctx(OP, "referral_flag"))?;
            b.store_address(Some(referral))
                .map_err(encode_ctx(OP, "referral_address"))?;
        }
        None => {
            b.store_bit(false).map_err(encode_ctx(OP, "referral_flag"))?;
        }
    }
    let cell = b.build();
    trace!(bits = cell.bit_len(), "built swap body");
    Ok(cell)
}

/// Build a provide-liquidity order: op, router jetton wallet, minimum LP
/// tokens out. No optional fields.
pub fn provide_liquidity_body(
    router_wallet_address: &TonAddress,
    min_lp_out: &BigUint,
) -> CodecResult<Cell> {
    const OP: &str = "provide_liquidity";
    let mut b = CellBuilder::new();
    b.store_u32(OP_PROVIDE_LIQUIDITY)
        .map_err(encode_ctx(OP, "op"))?;
    b.store_address(Some(router_wallet_address))
        .map_err(encode_ctx(OP, "router_wallet_address"))?;
    b.store_coins(min_lp_out)
        .map_err(encode_ctx(OP, "min_lp_out"))?;
    Ok(b.build())
}

/// Build a standard jetton transfer. Optional sub-messages are attached as
/// child references with the reference appended before its presence bit.
pub fn jetton_transfer_body(params: &JettonTransferParams) -> CodecResult<Cell> {
    const OP: &str = "jetton_transfer";
    let mut b = CellBuilder::new();
    b.store_u32(OP_REQUEST_TRANSFER)
        .map_err(encode_ctx(OP, "op"))?;
    b.store_u64(params.query_id)
        .map_err(encode_ctx(OP, "query_id"))?;
    b.store_coins(&params.amount)
        .map_err(encode_ctx(OP, "amount"))?;
    b.store_address(Some(&params.destination))
        .map_err(encode_ctx(OP, "destination"))?;
    b.store_address(params.response_destination.as_ref())
        .map_err(encode_ctx(OP, "response_destination"))?;
    match &params.custom_payload {
        Some(payload) => {
            b.store_reference(payload.clone())
                .map_err(encode_ctx(OP, "custom_payload"))?;
            b.store_bit(true)
                .map_err(encode_ctx(OP, "custom_payload_flag"))?;
        }
        None => {
            b.store_bit(false)
                .map_err(encode_ctx(OP, "custom_payload_flag"))?;
        }
    }
    b.store_coins(&params.forward_ton_amount)
        .map_err(encode_ctx(OP, "forward_ton_amount"))?;
    match &params.forward_payload {
        Some(payload) => {
            b.store_reference(payload.clone())
                .map_err(encode_ctx(OP, "forward_payload"))?;
            b.store_bit(true)
                .map_err(encode_ctx(OP, "forward_payload_flag"))?;
        }
        None => {
            b.store_bit(false)
                .map_err(encode_ctx(OP, "forward_payload_flag"))?;
        }
    }
    let cell = b.build();
    trace!(
        bits = cell.bit_len(),
        refs = cell.references().len(),
        "built jetton transfer body"
    );
    Ok(cell)
}

/// Build a standard jetton burn: op, query id, amount, response
/// destination.
pub fn burn_body(
    query_id: u64,
    amount: &BigUint,
    response_destination: &TonAddress,
) -> CodecResult<Cell> {
    const OP: &str = "burn";
    let mut b = CellBuilder::new();
    b.store_u32(OP_REQUEST_BURN).map_err(encode_ctx(OP, "op"))?;
    b.store_u64(query_id).map_err(encode_ctx(OP, "query_id"))?;
    b.store_coins(amount).map_err(encode_ctx(OP, "amount"))?;
    b.store_address(Some(response_destination))
        .map_err(encode_ctx(OP, "response_destination"))?;
    Ok(b.build())
}

/// Build a collect-fees order: op and query id only.
pub fn collect_fees_body(query_id: u64) -> CodecResult<Cell> {
    const OP: &str = "collect_fees";
    let mut b = CellBuilder::new();
    b.store_u32(OP_COLLECT_FEES).map_err(encode_ctx(OP, "op"))?;
    b.store_u64(query_id).map_err(encode_ctx(OP, "query_id"))?;
    Ok(b.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use tonswap_types::cell::{ADDRESS_BITS, ADDRESS_NONE_BITS};

    fn addr(byte: u8) -> TonAddress {
        TonAddress::new(0, [byte; 32])
    }

    fn coins_bits(v: u64) -> usize {
        4 + 8 * ((64 - v.leading_zeros() as usize + 7) / 8)
    }

    fn swap_params(referral: Option<TonAddress>) -> SwapBodyParams {
        SwapBodyParams {
            ask_jetton_wallet_address: addr(0xA1),
            min_ask_amount: BigUint::from(100_000_000u64),
            user_wallet_address: addr(0xB2),
            referral_address: referral,
        }
    }

    #[test]
    fn test_swap_body_without_referral_layout() {
        let cell = swap_body(&swap_params(None)).unwrap();
        let expected = 32 + ADDRESS_BITS + coins_bits(100_000_000) + ADDRESS_BITS + 1;
        assert_eq!(cell.bit_len(), expected);
        assert!(cell.references().is_empty());

        let mut s = cell.parse();
        assert_eq!(s.load_u32().unwrap(), OP_SWAP);
        assert_eq!(s.load_address().unwrap(), Some(addr(0xA1)));
        assert_eq!(s.load_coins().unwrap(), BigUint::from(100_000_000u64));
        assert_eq!(s.load_address().unwrap(), Some(addr(0xB2)));
        // The final bit is the referral presence flag, and it is zero.
        assert_eq!(s.remaining_bits(), 1);
        assert!(!s.load_bit().unwrap());
    }

    #[test]
    fn test_swap_body_with_referral_inlines_address() {
        let referral = addr(0xC3);
        let cell = swap_body(&swap_params(Some(referral))).unwrap();
        let bare = swap_body(&swap_params(None)).unwrap();
        assert_eq!(cell.bit_len(), bare.bit_len() + ADDRESS_BITS);
        assert!(cell.references().is_empty());

        let mut s = cell.parse();
        s.load_u32().unwrap();
        s.load_address().unwrap();
        s.load_coins().unwrap();
        s.load_address().unwrap();
        assert!(s.load_bit().unwrap());
        assert_eq!(s.load_address().unwrap(), Some(referral));
        assert_eq!(s.remaining_bits(), 0);
    }

    #[test]
    fn test_swap_body_is_deterministic() {
        let params = swap_params(Some(addr(0xC3)));
        assert_eq!(swap_body(&params).unwrap(), swap_body(&params).unwrap());
    }

    #[test]
    fn test_provide_liquidity_body_layout() {
        let cell = provide_liquidity_body(&addr(0xD4), &BigUint::from(1u8)).unwrap();
        let mut s = cell.parse();
        assert_eq!(s.load_u32().unwrap(), OP_PROVIDE_LIQUIDITY);
        assert_eq!(s.load_address().unwrap(), Some(addr(0xD4)));
        assert_eq!(s.load_coins().unwrap(), BigUint::from(1u8));
        assert_eq!(s.remaining_bits(), 0);
    }

    #[test]
    fn test_jetton_transfer_golden_layout() {
        let forward = Arc::new(swap_body(&swap_params(None)).unwrap());
        let params = JettonTransferParams {
            query_id: 294_082_696_817_435,
            amount: BigUint::from(300_000_000_000u64),
            destination: addr(0xE5),
            response_destination: None,
            custom_payload: None,
            forward_ton_amount: BigUint::from(265_000_000u64),
            forward_payload: Some(forward.clone()),
        };
        let cell = jetton_transfer_body(&params).unwrap();

        let expected = 32
            + 64
            + coins_bits(300_000_000_000)
            + ADDRESS_BITS
            + ADDRESS_NONE_BITS
            + 1
            + coins_bits(265_000_000)
            + 1;
        assert_eq!(cell.bit_len(), expected);
        assert_eq!(cell.references().len(), 1);

        let mut s = cell.parse();
        assert_eq!(s.load_u32().unwrap(), OP_REQUEST_TRANSFER);
        assert_eq!(s.load_u64().unwrap(), 294_082_696_817_435);
        assert_eq!(s.load_coins().unwrap(), BigUint::from(300_000_000_000u64));
        assert_eq!(s.load_address().unwrap(), Some(addr(0xE5)));
        assert_eq!(s.load_address().unwrap(), None);
        assert!(!s.load_bit().unwrap());
        assert_eq!(s.load_coins().unwrap(), BigUint::from(265_000_000u64));
        assert!(s.load_bit().unwrap());
        assert_eq!(s.take_reference().unwrap(), forward);
        assert_eq!(s.remaining_bits(), 0);
    }

    #[test]
    fn test_jetton_transfer_with_custom_payload_ref_order() {
        let custom = Arc::new(collect_fees_body(1).unwrap());
        let forward = Arc::new(collect_fees_body(2).unwrap());
        let params = JettonTransferParams {
            query_id: 7,
            amount: BigUint::from(5u8),
            destination: addr(0x01),
            response_destination: Some(addr(0x02)),
            custom_payload: Some(custom.clone()),
            forward_ton_amount: BigUint::from(0u8),
            forward_payload: Some(forward.clone()),
        };
        let cell = jetton_transfer_body(&params).unwrap();
        // Custom payload is reference 0, forward payload reference 1.
        assert_eq!(cell.references(), &[custom, forward]);
    }

    #[test]
    fn test_amount_overflow_carries_field_context() {
        let params = JettonTransferParams {
            query_id: 0,
            amount: BigUint::from(1u8) << 120u32,
            destination: addr(0x01),
            response_destination: None,
            custom_payload: None,
            forward_ton_amount: BigUint::from(0u8),
            forward_payload: None,
        };
        let err = jetton_transfer_body(&params).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Encode {
                op: "jetton_transfer",
                field: "amount",
                ..
            }
        ));
    }

    #[test]
    fn test_burn_body_layout() {
        let cell = burn_body(9, &BigUint::from(42u8), &addr(0xF6)).unwrap();
        let mut s = cell.parse();
        assert_eq!(s.load_u32().unwrap(), OP_REQUEST_BURN);
        assert_eq!(s.load_u64().unwrap(), 9);
        assert_eq!(s.load_coins().unwrap(), BigUint::from(42u8));
        assert_eq!(s.load_address().unwrap(), Some(addr(0xF6)));
        assert_eq!(s.remaining_bits(), 0);
    }

    #[test]
    fn test_collect_fees_body_layout() {
        let cell = collect_fees_body(77).unwrap();
        let mut s = cell.parse();
        assert_eq!(s.load_u32().unwrap(), OP_COLLECT_FEES);
        assert_eq!(s.load_u64().unwrap(), 77);
        assert_eq!(s.remaining_bits(), 0);
    }
}
