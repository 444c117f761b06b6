//! Per-account holding records.

use serde::{Deserialize, Serialize};

use crate::weight::U256;

/// Account identifier - human-readable name
pub type AccountId = String;

/// A balance and the time it was last confirmed, as one indivisible unit.
///
/// The update algorithm assumes a balance is never observed with a stale
/// or foreign timestamp, so the pair has private fields and is only ever
/// replaced whole. No mutable access to either half is exposed.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalancePoint {
    balance: u128,
    last_update: u64,
}

impl BalancePoint {
    pub fn new(balance: u128, last_update: u64) -> Self {
        Self {
            balance,
            last_update,
        }
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }

    pub fn last_update(&self) -> u64 {
        self.last_update
    }
}

/// One account's holding state: the packed balance/time pair plus the
/// accumulated balance-time weight earned up to `last_update`.
///
/// An all-zero record means "no position"; a record whose balance drops to
/// zero is cleared back to exactly that state, never left with dangling
/// weight or timestamp.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldingRecord {
    point: BalancePoint,
    weight: U256,
}

impl HoldingRecord {
    pub fn new(point: BalancePoint, weight: U256) -> Self {
        // Zero balance only ever exists as the fully cleared record.
        debug_assert!(
            point.balance() > 0 || (point.last_update() == 0 && weight.is_zero()),
            "zero-balance record must be fully cleared"
        );
        Self { point, weight }
    }

    pub fn balance(&self) -> u128 {
        self.point.balance()
    }

    pub fn last_update(&self) -> u64 {
        self.point.last_update()
    }

    pub fn weight(&self) -> U256 {
        self.weight
    }

    /// True for the all-zero "no position" state.
    pub fn is_empty(&self) -> bool {
        self.point.balance() == 0
    }
}
