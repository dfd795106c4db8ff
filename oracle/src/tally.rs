//! Per-pair tally: weighted median, reward spread, and vote classification.

use augury_types::Dec;

use crate::ballot::Ballot;
use crate::error::OracleError;
use crate::performance::ValidatorPerformances;

/// Outcome of tallying one pair's ballot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallyResult {
    pub median: Dec,
    pub standard_deviation: Dec,
    pub spread: Dec,
}

/// Tally a ballot, crediting each voter's performance.
///
/// Votes within `median ± spread` win and add their power to the voter's reward
/// weight, where `spread = max(median * reward_band / 2, σ)`. Non-positive rates are
/// abstentions; anything else outside the band is a miss. Votes from validators with
/// no performance entry are ignored.
pub fn tally(
    ballot: &mut Ballot,
    reward_band: Dec,
    performances: &mut ValidatorPerformances,
) -> Result<TallyResult, OracleError> {
    ballot.sort();
    let median = ballot.weighted_median()?;
    let standard_deviation = ballot.standard_deviation(median);

    let band_spread = reward_band
        .checked_quo_int(2)
        .and_then(|half_band| median.checked_mul(half_band))
        .unwrap_or(Dec::ZERO);
    let spread = band_spread.max(standard_deviation);
    let lower = median.saturating_sub(spread);
    let upper = median.saturating_add(spread);

    for vote in ballot.votes() {
        let Some(performance) = performances.get_mut(&vote.voter) else {
            continue;
        };
        if vote.exchange_rate >= lower && vote.exchange_rate <= upper {
            performance.reward_weight = performance.reward_weight.saturating_add(vote.power);
            performance.win_count += 1;
        } else if !vote.exchange_rate.is_positive() {
            performance.abstain_count += 1;
        } else {
            performance.miss_count += 1;
        }
    }

    Ok(TallyResult {
        median,
        standard_deviation,
        spread,
    })
}
