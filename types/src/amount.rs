//! Coin amounts.
//!
//! Amounts are signed 64-bit counts of atoms, the indivisible coin unit. The
//! signed representation lets fee arithmetic (`inputs - outputs`) go negative
//! without wrapping, and every chain-visible amount is bounded by [`MAX_AMOUNT`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Number of atoms in one coin.
pub const ATOMS_PER_COIN: i64 = 100_000_000;

/// Maximum amount of atoms that can ever exist (21 million coins).
pub const MAX_AMOUNT: i64 = 21_000_000 * ATOMS_PER_COIN;

/// An amount of atoms.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// The largest representable chain amount.
    pub const MAX: Self = Self(MAX_AMOUNT);

    pub const fn from_atoms(atoms: i64) -> Self {
        Self(atoms)
    }

    /// Whole coins expressed as atoms, `None` on overflow.
    pub fn from_coins(coins: i64) -> Option<Self> {
        coins.checked_mul(ATOMS_PER_COIN).map(Self)
    }

    pub const fn atoms(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when the amount is within `0..=MAX_AMOUNT`.
    pub fn is_valid(&self) -> bool {
        (0..=MAX_AMOUNT).contains(&self.0)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for Amount {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = ATOMS_PER_COIN as u64;
        write!(f, "{}{}.{:08} coin", sign, abs / per, abs % per)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_coins_and_atoms() {
        assert_eq!(Amount::from_atoms(50_001).to_string(), "0.00050001 coin");
        assert_eq!(Amount::from_atoms(-150_000_000).to_string(), "-1.50000000 coin");
        assert_eq!(Amount::ZERO.to_string(), "0.00000000 coin");
    }

    #[test]
    fn validity_bounds() {
        assert!(Amount::ZERO.is_valid());
        assert!(Amount::MAX.is_valid());
        assert!(!Amount::from_atoms(MAX_AMOUNT + 1).is_valid());
        assert!(!Amount::from_atoms(-1).is_valid());
    }

    #[test]
    fn checked_arithmetic_detects_overflow() {
        assert!(Amount::from_atoms(i64::MAX)
            .checked_add(Amount::from_atoms(1))
            .is_none());
        assert!(Amount::from_atoms(i64::MAX).checked_mul(2).is_none());
        assert_eq!(Amount::from_coins(2), Some(Amount::from_atoms(200_000_000)));
    }
}
