//! Bit-packed storage word codec.
//!
//! Solidity packs small fields right to left inside a 32-byte slot. The
//! Uniswap V2 reserves word is the canonical example, three fields in one
//! slot:
//!
//! ```text
//! bit   255        224 223        112 111          0
//!       ┌────────────┬───────────────┬─────────────┐
//!       │ timestamp  │   reserve1    │  reserve0   │
//!       │  (u32)     │   (u112)      │  (u112)     │
//!       └────────────┴───────────────┴─────────────┘
//! ```
//!
//! Extraction and packing are pure functions so the decoder and its tests
//! share one source of truth for the layout.

use crate::decode::DecodeError;
use alloy_primitives::{Address, B256, U256};

/// Mask selecting the low 112 bits of a word.
pub const UINT112_MASK: U256 = U256::from_limbs([u64::MAX, 0x0000_FFFF_FFFF_FFFF, 0, 0]);

/// Splits a packed reserves word into `(reserve0, reserve1, timestamp)`.
///
/// `reserve0` occupies bits `[0, 112)`, `reserve1` bits `[112, 224)`, and the
/// last-update timestamp bits `[224, 256)`.
#[must_use]
pub fn extract_reserves(word: U256) -> (U256, U256, u32) {
    let reserve0 = word & UINT112_MASK;
    let reserve1 = (word >> 112usize) & UINT112_MASK;
    let timestamp = (word >> 224usize).to::<u32>();
    (reserve0, reserve1, timestamp)
}

/// Packs `(reserve0, reserve1, timestamp)` into a single reserves word.
///
/// Inverse of [`extract_reserves`]. The timestamp width is enforced by its
/// type; each reserve must fit in 112 bits.
///
/// # Errors
///
/// Returns [`DecodeError::FieldOverflow`] if a reserve exceeds 112 bits.
pub fn pack_reserves(reserve0: U256, reserve1: U256, timestamp: u32) -> Result<U256, DecodeError> {
    if reserve0 > UINT112_MASK {
        return Err(DecodeError::FieldOverflow { field: "reserve0", bits: 112 });
    }
    if reserve1 > UINT112_MASK {
        return Err(DecodeError::FieldOverflow { field: "reserve1", bits: 112 });
    }
    Ok(reserve0 | (reserve1 << 112usize) | (U256::from(timestamp) << 224usize))
}

/// Extracts an address from the low 20 bytes of a storage word.
///
/// Address-typed slots are stored right-aligned with zero padding in the high
/// 12 bytes.
#[must_use]
pub fn extract_address(word: B256) -> Address {
    Address::from_word(word)
}
