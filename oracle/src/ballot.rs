//! Per-pair ballots and the statistics computed over them.

use augury_types::{Dec, Pair, ValAddress};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// One validator's rate for one pair, weighted by its power.
///
/// An abstaining vote (rate `<= 0`) carries zero power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotVote {
    pub pair: Pair,
    pub exchange_rate: Dec,
    pub voter: ValAddress,
    pub power: u64,
}

impl BallotVote {
    pub fn new(pair: Pair, exchange_rate: Dec, voter: ValAddress, power: u64) -> Self {
        Self {
            pair,
            exchange_rate,
            voter,
            power,
        }
    }
}

/// All votes cast for a single pair in one vote period.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ballot {
    votes: Vec<BallotVote>,
}

impl Ballot {
    pub fn new(votes: Vec<BallotVote>) -> Self {
        Self { votes }
    }

    pub fn push(&mut self, vote: BallotVote) {
        self.votes.push(vote);
    }

    pub fn votes(&self) -> &[BallotVote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Sum of voting power. Abstentions contribute nothing.
    pub fn power(&self) -> u64 {
        self.votes
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.power))
    }

    /// Number of votes with a positive rate.
    pub fn num_valid_voters(&self) -> u64 {
        self.votes
            .iter()
            .filter(|v| v.exchange_rate.is_positive())
            .count() as u64
    }

    /// Stable sort by ascending rate.
    pub fn sort(&mut self) {
        self.votes.sort_by(|a, b| a.exchange_rate.cmp(&b.exchange_rate));
    }

    pub fn is_sorted(&self) -> bool {
        self.votes
            .windows(2)
            .all(|w| w[0].exchange_rate <= w[1].exchange_rate)
    }

    /// Whether the ballot carries enough power and enough distinct positive voters to
    /// be tallied. `threshold` is an absolute power level.
    pub fn passes_threshold(&self, threshold: Dec, min_voters: u64) -> bool {
        let power = self.power();
        if power == 0 {
            return false;
        }
        if Dec::from_u64(power) < threshold {
            return false;
        }
        self.num_valid_voters() >= min_voters
    }

    /// The rate at which cumulative power first reaches `ceil(total / 2)`.
    ///
    /// The ballot must already be sorted ascending by rate. An empty ballot has a
    /// median of zero.
    pub fn weighted_median(&self) -> Result<Dec, OracleError> {
        if !self.is_sorted() {
            return Err(OracleError::UnsortedBallot);
        }
        let total = self.power();
        let half = total.div_ceil(2);
        let mut cumulative = 0u64;
        for vote in &self.votes {
            cumulative = cumulative.saturating_add(vote.power);
            if cumulative >= half {
                return Ok(vote.exchange_rate);
            }
        }
        Ok(Dec::ZERO)
    }

    /// Power-weighted standard deviation of positive rates around `median`.
    ///
    /// Returns zero when no vote carries power or the computation overflows.
    pub fn standard_deviation(&self, median: Dec) -> Dec {
        self.try_standard_deviation(median).unwrap_or(Dec::ZERO)
    }

    fn try_standard_deviation(&self, median: Dec) -> Option<Dec> {
        let mut weighted_sum = Dec::ZERO;
        let mut total_power = 0u64;
        for vote in &self.votes {
            if !vote.exchange_rate.is_positive() || vote.power == 0 {
                continue;
            }
            let deviation = vote.exchange_rate.checked_sub(median)?;
            let squared = deviation.checked_mul(deviation)?;
            weighted_sum = weighted_sum.checked_add(squared.checked_mul_int(vote.power)?)?;
            total_power = total_power.checked_add(vote.power)?;
        }
        if total_power == 0 {
            return Some(Dec::ZERO);
        }
        weighted_sum.checked_quo_int(total_power)?.checked_sqrt()
    }
}

impl IntoIterator for Ballot {
    type Item = BallotVote;
    type IntoIter = std::vec::IntoIter<BallotVote>;

    fn into_iter(self) -> Self::IntoIter {
        self.votes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Pair {
        "BTC:USD".parse().unwrap()
    }

    fn vote(rate: i64, power: u64, id: u8) -> BallotVote {
        BallotVote::new(pair(), Dec::from_int(rate), ValAddress::new([id; 20]), power)
    }

    #[test]
    fn median_of_equal_power_is_positional() {
        let ballot = Ballot::new(vec![vote(1, 10, 1), vote(2, 10, 2), vote(3, 10, 3)]);
        assert_eq!(ballot.weighted_median().unwrap(), Dec::from_int(2));
    }

    #[test]
    fn median_follows_heavy_voter() {
        let ballot = Ballot::new(vec![vote(1, 10, 1), vote(2, 10, 2), vote(3, 100, 3)]);
        assert_eq!(ballot.weighted_median().unwrap(), Dec::from_int(3));
    }

    #[test]
    fn median_uses_ceiling_half() {
        // total 3, ceil(3/2) = 2: the second unit of power is reached at rate 2.
        let ballot = Ballot::new(vec![vote(1, 1, 1), vote(2, 1, 2), vote(3, 1, 3)]);
        assert_eq!(ballot.weighted_median().unwrap(), Dec::from_int(2));
        // total 4, half 2 is reached exactly at rate 2.
        let ballot = Ballot::new(vec![
            vote(1, 1, 1),
            vote(2, 1, 2),
            vote(3, 1, 3),
            vote(4, 1, 4),
        ]);
        assert_eq!(ballot.weighted_median().unwrap(), Dec::from_int(2));
    }

    #[test]
    fn unsorted_ballot_fails_loudly() {
        let ballot = Ballot::new(vec![vote(3, 1, 1), vote(1, 1, 2)]);
        assert!(matches!(
            ballot.weighted_median(),
            Err(OracleError::UnsortedBallot)
        ));
    }

    #[test]
    fn empty_ballot_median_is_zero() {
        assert_eq!(Ballot::default().weighted_median().unwrap(), Dec::ZERO);
    }

    #[test]
    fn abstentions_carry_no_power_and_are_not_valid_voters() {
        let ballot = Ballot::new(vec![vote(-1, 0, 1), vote(0, 0, 2), vote(5, 10, 3)]);
        assert_eq!(ballot.power(), 10);
        assert_eq!(ballot.num_valid_voters(), 1);
    }

    #[test]
    fn standard_deviation_weighted() {
        let ballot = Ballot::new(vec![vote(1, 1, 1), vote(3, 1, 2)]);
        assert_eq!(ballot.standard_deviation(Dec::from_int(2)), Dec::ONE);
        let single = Ballot::new(vec![vote(7, 5, 1)]);
        assert_eq!(single.standard_deviation(Dec::from_int(7)), Dec::ZERO);
    }

    #[test]
    fn standard_deviation_ignores_abstentions() {
        let ballot = Ballot::new(vec![vote(-100, 0, 1), vote(5, 10, 2), vote(5, 10, 3)]);
        assert_eq!(ballot.standard_deviation(Dec::from_int(5)), Dec::ZERO);
    }

    #[test]
    fn standard_deviation_overflow_clamps_to_zero() {
        let huge = BallotVote::new(pair(), Dec::from_raw(i128::MAX / 2), ValAddress::new([1; 20]), 1);
        let ballot = Ballot::new(vec![huge, vote(1, 1, 2)]);
        assert_eq!(ballot.standard_deviation(Dec::ONE), Dec::ZERO);
    }

    #[test]
    fn threshold_checks_power_and_voters() {
        let ballot = Ballot::new(vec![vote(5, 10, 1), vote(5, 10, 2)]);
        assert!(ballot.passes_threshold(Dec::from_int(20), 2));
        assert!(!ballot.passes_threshold(Dec::from_int(21), 2));
        assert!(!ballot.passes_threshold(Dec::from_int(1), 3));
        let abstained = Ballot::new(vec![vote(0, 0, 1)]);
        assert!(!abstained.passes_threshold(Dec::ZERO, 0));
    }

    #[test]
    fn sort_is_stable() {
        let mut ballot = Ballot::new(vec![vote(2, 1, 1), vote(1, 1, 2), vote(2, 1, 3)]);
        ballot.sort();
        let voters: Vec<u8> = ballot.votes().iter().map(|v| v.voter.as_bytes()[0]).collect();
        assert_eq!(voters, vec![2, 1, 3]);
    }
}
