use proptest::prelude::*;

use augury_oracle::{tally, Ballot, BallotVote, ValidatorPerformance, ValidatorPerformances};
use augury_types::{Dec, Pair, ValAddress};

fn btc() -> Pair {
    "BTC:USD".parse().unwrap()
}

fn ballot_of(entries: &[(u64, u64)]) -> Ballot {
    Ballot::new(
        entries
            .iter()
            .enumerate()
            .map(|(i, (rate, power))| {
                BallotVote::new(btc(), Dec::from_u64(*rate), ValAddress::new([i as u8; 20]), *power)
            })
            .collect(),
    )
}

proptest! {
    /// The weighted median is a submitted rate, and at least half the power sits at
    /// or below it.
    #[test]
    fn weighted_median_splits_power(
        entries in prop::collection::vec((1u64..1_000_000, 1u64..1_000), 1..40),
    ) {
        let mut ballot = ballot_of(&entries);
        ballot.sort();
        let median = ballot.weighted_median().unwrap();

        prop_assert!(ballot.votes().iter().any(|v| v.exchange_rate == median));
        let total: u64 = entries.iter().map(|(_, p)| p).sum();
        let at_or_below: u64 = ballot
            .votes()
            .iter()
            .filter(|v| v.exchange_rate <= median)
            .map(|v| v.power)
            .sum();
        prop_assert!(at_or_below * 2 >= total);
    }

    /// With equal power the weighted median is the positional median.
    #[test]
    fn equal_power_median_is_positional(
        rates in prop::collection::vec(1u64..1_000_000, 1..40),
    ) {
        let entries: Vec<(u64, u64)> = rates.iter().map(|r| (*r, 7)).collect();
        let mut ballot = ballot_of(&entries);
        ballot.sort();

        let mut sorted = rates.clone();
        sorted.sort_unstable();
        let expected = sorted[(sorted.len() + 1) / 2 - 1];
        prop_assert_eq!(ballot.weighted_median().unwrap(), Dec::from_u64(expected));
    }

    /// Every voter with a performance entry gets exactly one outcome per tally, and
    /// the median voter always wins.
    #[test]
    fn tally_assigns_one_outcome_per_vote(
        entries in prop::collection::vec((0u64..10_000, 1u64..100), 1..30),
    ) {
        let mut performances = ValidatorPerformances::new();
        for (i, (_, power)) in entries.iter().enumerate() {
            performances.insert(ValidatorPerformance::new(*power, ValAddress::new([i as u8; 20])));
        }
        let mut ballot = ballot_of(&entries);
        let result = tally(&mut ballot, Dec::from_raw(20_000_000_000_000_000), &mut performances).unwrap();

        for p in performances.values() {
            prop_assert_eq!(p.win_count + p.abstain_count + p.miss_count, 1);
        }
        prop_assert!(result.spread >= Dec::ZERO);
        let median_wins = ballot
            .votes()
            .iter()
            .filter(|v| v.exchange_rate == result.median)
            .all(|v| performances.get(&v.voter).map_or(false, |p| p.win_count == 1));
        prop_assert!(median_wins);
    }
}
