// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Total block gas limit, in gas units.
pub const BLOCK_GAS_LIMIT: u64 = 10_000_000_000;
/// Number of `attoFIL` in one FIL.
pub const FILECOIN_PRECISION: u64 = 1_000_000_000_000_000_000;

/// An amount of `attoFIL`, backed by an arbitrary precision integer so that
/// fee and balance arithmetic can never overflow.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct TokenAmount(BigInt);

impl TokenAmount {
    /// Creates a token amount from an amount of `attoFIL`.
    pub fn from_atto(atto: impl Into<BigInt>) -> Self {
        Self(atto.into())
    }

    /// Creates a token amount from an amount of whole FIL.
    pub fn from_whole(fil: impl Into<BigInt>) -> Self {
        Self(fil.into() * FILECOIN_PRECISION)
    }

    /// Returns the quantity in `attoFIL`.
    pub fn atto(&self) -> &BigInt {
        &self.0
    }

    /// Floor division by an integer denominator.
    pub fn div_floor(&self, other: impl Into<BigInt>) -> TokenAmount {
        use num::Integer as _;
        Self(self.0.div_floor(&other.into()))
    }
}

impl Zero for TokenAmount {
    fn zero() -> Self {
        Self(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<BigInt> for TokenAmount {
    fn from(atto: BigInt) -> Self {
        Self(atto)
    }
}

impl From<TokenAmount> for BigInt {
    fn from(amount: TokenAmount) -> Self {
        amount.0
    }
}

impl Add for TokenAmount {
    type Output = TokenAmount;
    fn add(self, rhs: TokenAmount) -> TokenAmount {
        Self(self.0 + rhs.0)
    }
}

impl Add<&TokenAmount> for &TokenAmount {
    type Output = TokenAmount;
    fn add(self, rhs: &TokenAmount) -> TokenAmount {
        TokenAmount(&self.0 + &rhs.0)
    }
}

impl Add<&TokenAmount> for TokenAmount {
    type Output = TokenAmount;
    fn add(self, rhs: &TokenAmount) -> TokenAmount {
        Self(self.0 + &rhs.0)
    }
}

impl AddAssign<&TokenAmount> for TokenAmount {
    fn add_assign(&mut self, rhs: &TokenAmount) {
        self.0 += &rhs.0;
    }
}

impl AddAssign for TokenAmount {
    fn add_assign(&mut self, rhs: TokenAmount) {
        self.0 += rhs.0;
    }
}

impl Sub<&TokenAmount> for &TokenAmount {
    type Output = TokenAmount;
    fn sub(self, rhs: &TokenAmount) -> TokenAmount {
        TokenAmount(&self.0 - &rhs.0)
    }
}

impl SubAssign<&TokenAmount> for TokenAmount {
    fn sub_assign(&mut self, rhs: &TokenAmount) {
        self.0 -= &rhs.0;
    }
}

impl Mul<u64> for &TokenAmount {
    type Output = TokenAmount;
    fn mul(self, rhs: u64) -> TokenAmount {
        TokenAmount(&self.0 * rhs)
    }
}

impl Mul<u64> for TokenAmount {
    type Output = TokenAmount;
    fn mul(self, rhs: u64) -> TokenAmount {
        Self(self.0 * rhs)
    }
}

impl<'a> std::iter::Sum<&'a TokenAmount> for TokenAmount {
    fn sum<I: Iterator<Item = &'a TokenAmount>>(iter: I) -> Self {
        iter.fold(TokenAmount::zero(), |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn whole_fil_in_atto() {
        assert_eq!(
            TokenAmount::from_whole(2).atto(),
            &BigInt::from(2_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn fee_arithmetic_does_not_overflow() {
        let price = TokenAmount::from_atto(u64::MAX);
        let fee = &price * u64::MAX;
        assert!(fee > price);
        assert_eq!(
            fee.atto(),
            &(BigInt::from(u64::MAX) * BigInt::from(u64::MAX))
        );
    }

    #[test]
    fn div_floor_rounds_down() {
        assert_eq!(
            TokenAmount::from_atto(-7).div_floor(2),
            TokenAmount::from_atto(-4)
        );
        assert_eq!(
            TokenAmount::from_atto(7).div_floor(2),
            TokenAmount::from_atto(3)
        );
    }

    #[test]
    fn sum_of_amounts() {
        let amounts = [1, 2, 3].map(TokenAmount::from_atto);
        assert_eq!(amounts.iter().sum::<TokenAmount>(), TokenAmount::from_atto(6));
    }

    #[quickcheck]
    fn sum_matches_atto_sum(atto: Vec<BigInt>) -> bool {
        let amounts = atto.iter().cloned().map(TokenAmount::from_atto).collect::<Vec<_>>();
        amounts.iter().sum::<TokenAmount>().atto() == &atto.iter().sum::<BigInt>()
    }

    #[quickcheck]
    fn sub_undoes_add(a: BigInt, b: BigInt) -> bool {
        let (a, b) = (TokenAmount::from_atto(a), TokenAmount::from_atto(b));
        let mut c = &a + &b;
        c -= &b;
        c == a
    }
}
