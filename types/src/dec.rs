//! Signed fixed-point decimal with 18 fractional digits.
//!
//! Exchange rates, vote thresholds and slash fractions are all carried as [`Dec`].
//! The value is stored as an `i128` count of 10^-18 units, so every operation is
//! exact integer arithmetic and reproducible across nodes. Arithmetic that could leave
//! the representable range is exposed only through `checked_*` / `saturating_*`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Number of fractional decimal digits.
pub const PRECISION: u32 = 18;

const SCALE: i128 = 1_000_000_000_000_000_000;
const USCALE: u128 = SCALE as u128;
/// `sqrt(SCALE)`, used when `raw * SCALE` does not fit for square roots.
const SQRT_SCALE: u128 = 1_000_000_000;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dec(i128);

impl Dec {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(SCALE);

    /// Wrap a raw count of 10^-18 units.
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i128 {
        self.0
    }

    pub fn from_int(n: i64) -> Self {
        Self(n as i128 * SCALE)
    }

    pub fn from_u64(n: u64) -> Self {
        Self(n as i128 * SCALE)
    }

    /// `value * 10^-prec`, e.g. `with_prec(5, 3)` is `0.005`.
    pub fn with_prec(value: i64, prec: u32) -> Option<Self> {
        if prec > PRECISION {
            return None;
        }
        (value as i128)
            .checked_mul(10i128.pow(PRECISION - prec))
            .map(Self)
    }

    /// `num / den`, truncated toward zero. `None` if `den` is zero.
    pub fn from_ratio(num: u64, den: u64) -> Option<Self> {
        if den == 0 {
            return None;
        }
        Some(Self(num as i128 * SCALE / den as i128))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Option<Self> {
        self.0.checked_abs().map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Fixed-point product, truncated toward zero.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let negative = self.is_negative() != rhs.is_negative();
        let magnitude = mul_magnitudes(self.0.unsigned_abs(), rhs.0.unsigned_abs())?;
        signed(magnitude, negative)
    }

    pub fn checked_mul_int(self, n: u64) -> Option<Self> {
        self.0.checked_mul(n as i128).map(Self)
    }

    /// Division by an integer, truncated toward zero. `None` if `n` is zero.
    pub fn checked_quo_int(self, n: u64) -> Option<Self> {
        if n == 0 {
            return None;
        }
        Some(Self(self.0 / n as i128))
    }

    /// Square root, truncated. `None` for negative values.
    pub fn checked_sqrt(self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        let raw = self.0 as u128;
        let root = match raw.checked_mul(USCALE) {
            Some(scaled) => isqrt(scaled),
            None => isqrt(raw).checked_mul(SQRT_SCALE)?,
        };
        i128::try_from(root).ok().map(Self)
    }

    /// Integer part of a non-negative value. `None` for negative values.
    pub fn truncate_u128(self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        Some(self.0 as u128 / USCALE)
    }
}

fn mul_magnitudes(a: u128, b: u128) -> Option<u128> {
    let (ai, af) = (a / USCALE, a % USCALE);
    let (bi, bf) = (b / USCALE, b % USCALE);
    let whole = ai.checked_mul(bi)?.checked_mul(USCALE)?;
    let cross = ai.checked_mul(bf)?.checked_add(af.checked_mul(bi)?)?;
    // Both fractional parts are below 10^18, so their product fits in u128.
    let frac = af * bf / USCALE;
    whole.checked_add(cross)?.checked_add(frac)
}

fn signed(magnitude: u128, negative: bool) -> Option<Dec> {
    let value = i128::try_from(magnitude).ok()?;
    Some(Dec(if negative { -value } else { value }))
}

fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let bits = 128 - n.leading_zeros();
    let mut x = 1u128 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

impl FromStr for Dec {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidDec(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() || (body.contains('.') && frac_part.is_empty()) {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_part.len() > PRECISION as usize {
            return Err(invalid());
        }

        let overflow = || TypesError::DecOverflow(s.to_string());
        let mut whole: u128 = 0;
        for b in int_part.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|w| w.checked_add((b - b'0') as u128))
                .ok_or_else(overflow)?;
        }
        let mut frac: u128 = 0;
        for b in frac_part.bytes() {
            frac = frac * 10 + (b - b'0') as u128;
        }
        frac *= 10u128.pow(PRECISION - frac_part.len() as u32);

        let magnitude = whole
            .checked_mul(USCALE)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(overflow)?;
        signed(magnitude, negative).ok_or_else(overflow)
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:018}",
            magnitude / USCALE,
            magnitude % USCALE
        )
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({self})")
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        assert_eq!(dec("1700").to_string(), "1700.000000000000000000");
        assert_eq!(dec("0.5").to_string(), "0.500000000000000000");
        assert_eq!(dec("-1").to_string(), "-1.000000000000000000");
        assert_eq!(dec("0.000000000000000001"), Dec::from_raw(1));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "-", ".", "1.", ".5", "1e5", "+1", "1.2.3", "abc", "0.0000000000000000001"] {
            assert!(bad.parse::<Dec>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn parse_overflow_is_distinct() {
        let huge = "9".repeat(60);
        assert!(matches!(huge.parse::<Dec>(), Err(TypesError::DecOverflow(_))));
    }

    #[test]
    fn mul_truncates() {
        assert_eq!(dec("1.5").checked_mul(dec("2")).unwrap(), dec("3"));
        assert_eq!(dec("-0.5").checked_mul(dec("0.5")).unwrap(), dec("-0.25"));
        assert_eq!(
            Dec::from_raw(1).checked_mul(dec("0.5")).unwrap(),
            Dec::ZERO
        );
    }

    #[test]
    fn mul_overflow_is_none() {
        let big = Dec::from_raw(i128::MAX);
        assert!(big.checked_mul(dec("2")).is_none());
    }

    #[test]
    fn sqrt_exact_and_large() {
        assert_eq!(dec("4").checked_sqrt().unwrap(), dec("2"));
        assert_eq!(dec("0.25").checked_sqrt().unwrap(), dec("0.5"));
        assert!(dec("-1").checked_sqrt().is_none());
        let large = Dec::from_u64(10u64.pow(18));
        assert_eq!(large.checked_sqrt().unwrap(), Dec::from_u64(10u64.pow(9)));
    }

    #[test]
    fn ratio_and_quo() {
        assert_eq!(Dec::from_ratio(1, 4).unwrap(), dec("0.25"));
        assert!(Dec::from_ratio(1, 0).is_none());
        assert_eq!(dec("3").checked_quo_int(2).unwrap(), dec("1.5"));
        assert_eq!(Dec::with_prec(5, 3).unwrap(), dec("0.005"));
    }

    #[test]
    fn truncate_integer_part() {
        assert_eq!(dec("1500.999").truncate_u128(), Some(1500));
        assert_eq!(dec("-1").truncate_u128(), None);
    }
}
