//! Contract storage decoders.
//!
//! A decoder knows one contract type's storage layout: which slots matter and
//! how to parse them into a typed record. Decoders are registered on the
//! cache per address and invoked by the updater on every block; the
//! [`required_slots`](ContractDecoder::required_slots) list must therefore be
//! deterministic so the updater and the shadow validator read the same set.
//!
//! Decoded records are a tagged sum ([`DecodedState`]) rather than a dynamic
//! bag, so callers narrow to a concrete variant without downcasting.

pub mod uniswap_v2;

pub use uniswap_v2::{UniswapV2Decoder, UniswapV2State};

use crate::types::{ContractKind, SlotMap};
use alloy_primitives::B256;
use thiserror::Error;

/// Errors produced while parsing raw storage slots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A slot the decoder declared as required was absent from the input.
    #[error("missing {0} slot")]
    MissingSlot(&'static str),

    /// A field value does not fit the width its storage layout allots.
    #[error("{field} exceeds {bits} bits")]
    FieldOverflow {
        /// Name of the offending field.
        field: &'static str,
        /// Width of the field in bits.
        bits: u32,
    },
}

/// Typed state produced by a registered decoder.
///
/// One variant per decodable [`ContractKind`]. The enum is non-exhaustive so
/// new protocol decoders can be added without breaking downstream matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodedState {
    /// Decoded Uniswap V2 pair state.
    UniswapV2(UniswapV2State),
}

impl DecodedState {
    /// Returns the contract kind this record was decoded as.
    #[must_use]
    pub fn kind(&self) -> ContractKind {
        match self {
            Self::UniswapV2(_) => ContractKind::UniswapV2,
        }
    }
}

/// Parses one contract type's raw storage into a typed record.
///
/// Implementations are stateless and shared across threads; the cache holds
/// them behind `Arc<dyn ContractDecoder>` and may invoke them concurrently
/// with registration of other decoders.
pub trait ContractDecoder: Send + Sync {
    /// The contract kind this decoder produces.
    fn kind(&self) -> ContractKind;

    /// The storage slots that must be read before [`decode`](Self::decode)
    /// can run.
    ///
    /// The returned sequence is fixed for the life of the decoder. The
    /// updater reads exactly these slots and the shadow validator re-reads
    /// them, so a nondeterministic list would make the two disagree.
    fn required_slots(&self) -> &'static [B256];

    /// Decodes raw slots into a typed record.
    ///
    /// Slots outside [`required_slots`](Self::required_slots) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if a required slot is absent or malformed.
    fn decode(&self, slots: &SlotMap) -> Result<DecodedState, DecodeError>;
}
