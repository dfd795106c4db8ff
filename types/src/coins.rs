//! Multi-denomination token amounts.
//!
//! Amounts are whole raw units (`u128`). [`Coins`] keeps its entries sorted by denom,
//! with no duplicates and no zero amounts, so equal sets compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// A single denomination and amount.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A normalised set of coins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a coin set, dropping zero amounts. Duplicate or empty denoms are rejected.
    pub fn new(coins: Vec<Coin>) -> Result<Self, TypesError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| c.amount > 0).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for window in coins.windows(2) {
            if window[0].denom == window[1].denom {
                return Err(TypesError::InvalidCoins(format!(
                    "duplicate denom {}",
                    window[0].denom
                )));
            }
        }
        if coins.iter().any(|c| c.denom.is_empty()) {
            return Err(TypesError::InvalidCoins("empty denom".into()));
        }
        Ok(Self(coins))
    }

    /// Convenience for a single-denomination set.
    pub fn single(denom: impl Into<String>, amount: u128) -> Self {
        let coin = Coin::new(denom, amount);
        if coin.amount == 0 || coin.denom.is_empty() {
            return Self::empty();
        }
        Self(vec![coin])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map_or(0, |c| c.amount)
    }

    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for coin in &other.0 {
            match out.iter_mut().find(|c| c.denom == coin.denom) {
                Some(existing) => existing.amount = existing.amount.checked_add(coin.amount)?,
                None => out.push(coin.clone()),
            }
        }
        out.sort_by(|a, b| a.denom.cmp(&b.denom));
        Some(Coins(out))
    }

    /// `self - other`. `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for coin in &other.0 {
            let existing = out.iter_mut().find(|c| c.denom == coin.denom)?;
            existing.amount = existing.amount.checked_sub(coin.amount)?;
        }
        out.retain(|c| c.amount > 0);
        Some(Coins(out))
    }

    /// Each amount divided by `n`, truncated. `None` if `n` is zero.
    pub fn quo_int(&self, n: u64) -> Option<Coins> {
        if n == 0 {
            return None;
        }
        let divisor = n as u128;
        Some(Coins(
            self.0
                .iter()
                .map(|c| Coin::new(c.denom.clone(), c.amount / divisor))
                .filter(|c| c.amount > 0)
                .collect(),
        ))
    }

    /// Each amount scaled by `num / den`, truncated. `None` on a zero denominator or
    /// overflow.
    pub fn mul_div_floor(&self, num: u64, den: u64) -> Option<Coins> {
        if den == 0 {
            return None;
        }
        let (num, den) = (num as u128, den as u128);
        let mut out = Vec::with_capacity(self.0.len());
        for coin in &self.0 {
            // (a/d)*n + (a%d)*n/d avoids overflowing a*n for large balances.
            let whole = (coin.amount / den).checked_mul(num)?;
            let rest = (coin.amount % den).checked_mul(num)? / den;
            let amount = whole.checked_add(rest)?;
            if amount > 0 {
                out.push(Coin::new(coin.denom.clone(), amount));
            }
        }
        Some(Coins(out))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        f.write_str(&parts.join(","))
    }
}
