//! Events emitted by message handlers and the end-block hook.

use augury_types::{AccAddress, Dec, ExchangeRateTuple, Pair, ValAddress};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OracleEvent {
    AggregatePrevote {
        validator: ValAddress,
        feeder: AccAddress,
    },
    AggregateVote {
        validator: ValAddress,
        feeder: AccAddress,
        prices: Vec<ExchangeRateTuple>,
    },
    DelegateFeederConsent {
        validator: ValAddress,
        feeder: AccAddress,
    },
    PriceUpdate {
        pair: Pair,
        price: Dec,
        timestamp_ms: u64,
    },
    /// One per validator at the end of every vote period, in address order.
    ValidatorPerformance {
        validator: ValAddress,
        voting_power: u64,
        reward_weight: u64,
        win_count: u64,
        abstain_count: u64,
        miss_count: u64,
    },
    Slash {
        validator: ValAddress,
        power: u64,
        fraction: Dec,
        infraction_height: i64,
    },
    ParamsUpdated {
        sender: AccAddress,
    },
}
