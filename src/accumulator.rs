//! The holding accumulator: per-account weighted holding time.
//!
//! Each account carries a single fixed-size record instead of a history of
//! balance changes. On every balance change the time held at the old balance
//! is folded into a running weight; queries extrapolate that weight to "now"
//! without writing anything back. The weight is rescaled, not reset, when a
//! balance moves between nonzero values, so the implied holding duration
//! survives partial withdrawals and is diluted by top-ups.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::TenureError;
use crate::record::{AccountId, BalancePoint, HoldingRecord};
use crate::storage::Storage;
use crate::weight::{self, U256};

/// Voting power is the projected weight divided by this constant, chosen to
/// match an 18-decimal token's smallest unit.
pub const POWER_SCALE: u128 = 1_000_000_000_000_000_000;

/// Tracks one holding record per account.
///
/// Updates take `&mut self` (callers serialize mutations); queries take
/// `&self` and never write. The caller supplies the current time with every
/// call and must never let it regress.
pub struct HoldingAccumulator {
    records: HashMap<AccountId, HoldingRecord>,

    storage: Option<Arc<Storage>>,
}

impl HoldingAccumulator {
    /// Create an in-memory accumulator with no persistence.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            storage: None,
        }
    }

    /// Create an accumulator backed by storage, loading any persisted records.
    pub fn with_storage(storage: Arc<Storage>) -> Result<Self, TenureError> {
        let records = storage.load_records()?.into_iter().collect();
        Ok(Self {
            records,
            storage: Some(storage),
        })
    }

    /// Record `account`'s balance after a ledger event (mint, burn, or
    /// either side of a transfer).
    ///
    /// Accrues weight earned since the last update under the old balance,
    /// then applies the new balance: clearing the whole record when it hits
    /// zero, rescaling the weight proportionally when it moves between
    /// nonzero values. A call with an unchanged balance writes nothing at
    /// all - it does not refresh the accrual clock.
    ///
    /// The only failure path is persistence; the arithmetic itself never
    /// fails (it wraps on overflow unless built with `strict-math`).
    pub fn update(
        &mut self,
        account: &str,
        new_balance: u128,
        now: u64,
    ) -> Result<(), TenureError> {
        let record = self
            .records
            .get(account)
            .copied()
            .unwrap_or_default();
        let balance = record.balance();

        let mut weight = record.weight();
        if balance > 0 && now > record.last_update() {
            weight = weight::accrue(weight, balance, now - record.last_update());
        }

        if new_balance == balance {
            // Inert by design: the accrual above is recomputed from the old
            // timestamp on the next real change, so dropping it loses nothing.
            return Ok(());
        }

        let updated = if new_balance == 0 {
            // Position closed: accrued weight is discarded with it.
            HoldingRecord::default()
        } else {
            if balance > 0 {
                weight = weight::rescale(weight, balance, new_balance);
            }
            HoldingRecord::new(BalancePoint::new(new_balance, now), weight)
        };

        debug!(
            "holding update '{}': balance {} -> {} at {}",
            account, balance, new_balance, now
        );
        self.records.insert(account.to_string(), updated);

        if let Some(storage) = &self.storage {
            storage.save_record(account, &updated)?;
        }
        Ok(())
    }

    /// Current voting power for `account`: accumulated weight extrapolated
    /// to `now`, divided by [`POWER_SCALE`]. Pure read; queries between
    /// updates are idempotent and non-decreasing while time advances.
    pub fn voting_power_of(&self, account: &str, now: u64) -> U256 {
        let record = match self.records.get(account) {
            Some(r) if !r.is_empty() => r,
            _ => return U256::zero(),
        };

        // Clamped so a query at or before the recorded time sees no accrual.
        let elapsed = now.saturating_sub(record.last_update());
        let projected = weight::accrue(record.weight(), record.balance(), elapsed);
        projected / U256::from_u128(POWER_SCALE)
    }

    /// Stored record for an account, if one was ever written.
    pub fn record(&self, account: &str) -> Option<&HoldingRecord> {
        self.records.get(account)
    }

    /// All tracked records.
    pub fn accounts(&self) -> Vec<(&AccountId, &HoldingRecord)> {
        self.records.iter().collect()
    }
}

impl Default for HoldingAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
