//! Uniswap V2 pair decoder.
//!
//! Storage layout of `UniswapV2Pair`:
//!
//! | slot | contents                                                   |
//! |------|------------------------------------------------------------|
//! | 6    | `token0` (address)                                         |
//! | 7    | `token1` (address)                                         |
//! | 8    | `reserve0` (u112), `reserve1` (u112), `blockTimestampLast` (u32), packed |
//! | 9    | `price0CumulativeLast` (u256)                              |
//! | 10   | `price1CumulativeLast` (u256)                              |
//! | 11   | `kLast` (u256)                                             |

use crate::{
    codec,
    decode::{ContractDecoder, DecodeError, DecodedState},
    types::{ContractKind, SlotMap},
};
use alloy_primitives::{Address, B256, U256};
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::Zero;

/// `token0` storage slot.
pub const SLOT_TOKEN0: B256 = B256::with_last_byte(6);
/// `token1` storage slot.
pub const SLOT_TOKEN1: B256 = B256::with_last_byte(7);
/// Packed reserves storage slot.
pub const SLOT_RESERVES: B256 = B256::with_last_byte(8);
/// `price0CumulativeLast` storage slot.
pub const SLOT_PRICE0_CUMULATIVE: B256 = B256::with_last_byte(9);
/// `price1CumulativeLast` storage slot.
pub const SLOT_PRICE1_CUMULATIVE: B256 = B256::with_last_byte(10);
/// `kLast` storage slot.
pub const SLOT_K_LAST: B256 = B256::with_last_byte(11);

/// Every slot a pair decode reads, in slot order.
pub const REQUIRED_SLOTS: [B256; 6] = [
    SLOT_TOKEN0,
    SLOT_TOKEN1,
    SLOT_RESERVES,
    SLOT_PRICE0_CUMULATIVE,
    SLOT_PRICE1_CUMULATIVE,
    SLOT_K_LAST,
];

/// Decoded state of a Uniswap V2 pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniswapV2State {
    /// First pair token.
    pub token0: Address,
    /// Second pair token.
    pub token1: Address,
    /// `token0` reserve (u112 on chain).
    pub reserve0: U256,
    /// `token1` reserve (u112 on chain).
    pub reserve1: U256,
    /// Timestamp of the last reserve update, truncated to 32 bits on chain.
    pub block_timestamp_last: u32,
    /// Cumulative `token0` price accumulator.
    pub price0_cumulative: U256,
    /// Cumulative `token1` price accumulator.
    pub price1_cumulative: U256,
    /// Reserve product as of the last liquidity event.
    pub k_last: U256,
}

fn u256_to_bigint(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

impl UniswapV2State {
    /// Price of `token0` denominated in `token1`: `reserve1 / reserve0`.
    ///
    /// Returns zero when `reserve0` is zero. Exact rational arithmetic; meant
    /// for display and analytics, not for the trading hot path.
    #[must_use]
    pub fn price(&self) -> BigRational {
        if self.reserve0.is_zero() {
            return BigRational::zero();
        }
        BigRational::new(u256_to_bigint(self.reserve1), u256_to_bigint(self.reserve0))
    }

    /// Price of `token1` denominated in `token0`: `reserve0 / reserve1`.
    ///
    /// Returns zero when `reserve1` is zero.
    #[must_use]
    pub fn inverse_price(&self) -> BigRational {
        if self.reserve1.is_zero() {
            return BigRational::zero();
        }
        BigRational::new(u256_to_bigint(self.reserve0), u256_to_bigint(self.reserve1))
    }
}

impl std::fmt::Display for UniswapV2State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UniswapV2{{token0: {}, token1: {}, reserve0: {}, reserve1: {}, timestamp: {}}}",
            self.token0, self.token1, self.reserve0, self.reserve1, self.block_timestamp_last
        )
    }
}

/// Decoder for Uniswap V2 pair contracts.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniswapV2Decoder;

impl ContractDecoder for UniswapV2Decoder {
    fn kind(&self) -> ContractKind {
        ContractKind::UniswapV2
    }

    fn required_slots(&self) -> &'static [B256] {
        &REQUIRED_SLOTS
    }

    fn decode(&self, slots: &SlotMap) -> Result<DecodedState, DecodeError> {
        let token0 = slots
            .get(&SLOT_TOKEN0)
            .map(|word| codec::extract_address(*word))
            .ok_or(DecodeError::MissingSlot("token0"))?;
        let token1 = slots
            .get(&SLOT_TOKEN1)
            .map(|word| codec::extract_address(*word))
            .ok_or(DecodeError::MissingSlot("token1"))?;

        let reserves_word = slots
            .get(&SLOT_RESERVES)
            .map(|word| U256::from_be_bytes(word.0))
            .ok_or(DecodeError::MissingSlot("reserves"))?;
        let (reserve0, reserve1, block_timestamp_last) = codec::extract_reserves(reserves_word);

        // The accumulators and kLast are zero on a freshly deployed pool, so
        // an absent slot decodes the same way.
        let word_or_zero =
            |slot: &B256| slots.get(slot).map_or(U256::ZERO, |word| U256::from_be_bytes(word.0));

        Ok(DecodedState::UniswapV2(UniswapV2State {
            token0,
            token1,
            reserve0,
            reserve1,
            block_timestamp_last,
            price0_cumulative: word_or_zero(&SLOT_PRICE0_CUMULATIVE),
            price1_cumulative: word_or_zero(&SLOT_PRICE1_CUMULATIVE),
            k_last: word_or_zero(&SLOT_K_LAST),
        }))
    }
}
