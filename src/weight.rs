//! 256-bit weight arithmetic for the holding accumulator.
//!
//! Balance (128 bits) times elapsed time (64 bits) fits in 192 bits, so a
//! single accrual term can never overflow the accumulator. The running sum
//! and the rescale product can, in principle; the default build wraps there
//! (matching deployed behavior), while the `strict-math` feature panics so
//! tests can prove the documented bounds are never reached.

#![allow(clippy::assign_op_pattern)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer holding accumulated balance-seconds.
    pub struct U256(4);
}

impl U256 {
    /// Widen a u128 balance into the accumulator domain.
    #[inline]
    pub fn from_u128(value: u128) -> Self {
        U256([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// Narrow back to u128, or None if the value needs more than 128 bits.
    #[inline]
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[2] == 0 && self.0[3] == 0 {
            Some((self.0[1] as u128) << 64 | self.0[0] as u128)
        } else {
            None
        }
    }

    /// Little-endian byte representation, limb 0 first.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, limb) in self.0.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    pub fn from_le_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = u64::from_le_bytes(bytes[i * 8..(i + 1) * 8].try_into().unwrap());
        }
        U256(limbs)
    }
}

/// Sum two weights under the configured overflow policy.
pub fn weight_add(a: U256, b: U256) -> U256 {
    if cfg!(feature = "strict-math") {
        a.checked_add(b).expect("holding weight overflowed 256 bits")
    } else {
        a.overflowing_add(b).0
    }
}

/// Fold `elapsed` time units held at `balance` into `weight`.
pub fn accrue(weight: U256, balance: u128, elapsed: u64) -> U256 {
    let earned = U256::from_u128(balance) * U256::from(elapsed);
    weight_add(weight, earned)
}

/// Proportionally adjust `weight` for a balance change, truncating.
///
/// Keeps the implied holding duration (`weight / balance`) approximately
/// invariant: a partial withdrawal keeps its share of accrued weight, a
/// top-up dilutes the effective duration. Callers guarantee
/// `old_balance > 0`.
pub fn rescale(weight: U256, old_balance: u128, new_balance: u128) -> U256 {
    let scaled = if cfg!(feature = "strict-math") {
        weight
            .checked_mul(U256::from_u128(new_balance))
            .expect("rescale product overflowed 256 bits")
    } else {
        weight.overflowing_mul(U256::from_u128(new_balance)).0
    };
    scaled / U256::from_u128(old_balance)
}

// Stable byte serde so records survive bincode round trips.
impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_le_bytes())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct U256Visitor;

        impl<'de> serde::de::Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("32 bytes")
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<U256, E> {
                let bytes: [u8; 32] = v
                    .try_into()
                    .map_err(|_| E::invalid_length(v.len(), &self))?;
                Ok(U256::from_le_bytes(&bytes))
            }

            fn visit_seq<A: serde::de::SeqAccess<'de>>(self, mut seq: A) -> Result<U256, A::Error> {
                let mut bytes = [0u8; 32];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(U256::from_le_bytes(&bytes))
            }
        }

        deserializer.deserialize_bytes(U256Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u128_conversions() {
        let big = u128::MAX;
        assert_eq!(U256::from_u128(big).to_u128(), Some(big));
        assert_eq!(U256::from_u128(7).to_u128(), Some(7));

        let too_big = U256::from_u128(u128::MAX) + U256::from(1u64);
        assert_eq!(too_big.to_u128(), None);
    }

    #[test]
    fn test_accrue_literal() {
        // 100 units held for 10 ticks on top of an existing 50.
        let weight = accrue(U256::from(50u64), 100, 10);
        assert_eq!(weight, U256::from(1050u64));
    }

    #[test]
    fn test_accrue_zero_elapsed() {
        let weight = accrue(U256::from(42u64), 100, 0);
        assert_eq!(weight, U256::from(42u64));
    }

    #[test]
    fn test_rescale_truncates() {
        // 1005 * 3 / 100 = 30.15 -> 30
        assert_eq!(rescale(U256::from(1005u64), 100, 3), U256::from(30u64));
        // Exact case: 1000 * 40 / 100 = 400
        assert_eq!(rescale(U256::from(1000u64), 100, 40), U256::from(400u64));
    }

    #[test]
    fn test_rescale_preserves_implied_duration() {
        // weight 1000 at balance 100 implies 10 ticks held; doubling the
        // balance scales the weight so the implied duration stays 10 ticks.
        let rescaled = rescale(U256::from(1000u64), 100, 200);
        assert_eq!(rescaled, U256::from(2000u64));
        assert_eq!(rescaled / U256::from(200u64), U256::from(10u64));
    }

    #[cfg(not(feature = "strict-math"))]
    #[test]
    fn test_weight_add_wraps_by_default() {
        assert_eq!(weight_add(U256::MAX, U256::from(1u64)), U256::zero());
    }

    #[cfg(feature = "strict-math")]
    #[test]
    #[should_panic(expected = "holding weight overflowed")]
    fn test_weight_add_panics_when_strict() {
        weight_add(U256::MAX, U256::from(1u64));
    }

    #[test]
    fn test_le_byte_roundtrip() {
        let value = U256::from_u128(0x1234_5678_9abc_def0_1122_3344_5566_7788);
        assert_eq!(U256::from_le_bytes(&value.to_le_bytes()), value);
    }
}
