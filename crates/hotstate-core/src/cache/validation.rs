//! Shadow-mode validation against canonical state.
//!
//! Shadow mode exists to earn trust before anyone routes trading decisions
//! through the cache: every cached slot is re-read from canonical state and
//! compared bit for bit. A mismatch is never repaired here; it surfaces to
//! the host, which typically disables the cache and alerts operators.

use crate::{
    cache::{CacheError, ContractState, HotStateCache},
    types::StateReader,
};
use alloy_primitives::Address;
use tracing::debug;

impl HotStateCache {
    /// Cross-checks every cached slot of every contract in the current
    /// snapshot against canonical state.
    ///
    /// A no-op unless `shadow_mode` is enabled. Cost is
    /// O(watched contracts × required slots); hosts call it at a cadence of
    /// their choosing, for example once every N blocks.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InconsistentState`] for the first divergent
    /// slot and increments the validation error counter.
    pub fn validate(&self, reader: &dyn StateReader) -> Result<(), CacheError> {
        if !self.config.shadow_mode {
            return Ok(());
        }

        let snapshot = self.snapshot();
        for (address, state) in &snapshot.contracts {
            self.validate_slots(*address, state, reader)?;
        }

        debug!(block = snapshot.block_number, "cache validation passed");
        Ok(())
    }

    /// Cross-checks a single contract's cached slots against canonical
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the contract is not cached, or
    /// [`CacheError::InconsistentState`] for the first divergent slot.
    pub fn validate_contract(
        &self,
        address: &Address,
        reader: &dyn StateReader,
    ) -> Result<(), CacheError> {
        if !self.config.shadow_mode {
            return Ok(());
        }

        let state = self.contract_state(address)?;
        self.validate_slots(*address, &state, reader)
    }

    fn validate_slots(
        &self,
        address: Address,
        state: &ContractState,
        reader: &dyn StateReader,
    ) -> Result<(), CacheError> {
        for (slot, cached) in &state.raw_slots {
            let canonical = reader.get_state(address, *slot);
            if *cached != canonical {
                self.counters.record_validation_error();
                return Err(CacheError::InconsistentState {
                    address,
                    slot: *slot,
                    cached: *cached,
                    canonical,
                });
            }
        }
        Ok(())
    }
}
