use augury_types::Coins;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Funds released to winning voters over a number of vote periods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPool {
    pub id: u64,
    /// Vote periods left to pay out.
    pub vote_periods: u64,
    /// Amount paid per vote period.
    pub coins: Coins,
}

pub trait RewardStore {
    /// Allocate the next pool id from a monotonically increasing sequence.
    fn next_reward_id(&self) -> Result<u64, StoreError>;
    fn get_reward_pool(&self, id: u64) -> Result<Option<RewardPool>, StoreError>;
    fn put_reward_pool(&self, pool: &RewardPool) -> Result<(), StoreError>;
    fn delete_reward_pool(&self, id: u64) -> Result<(), StoreError>;
    fn iter_reward_pools(&self) -> Result<Vec<RewardPool>, StoreError>;
}
