//! Nullable distribution: per-validator outstanding rewards.

use augury_oracle::{CollaboratorError, DistributionKeeper, ValidatorInfo};
use augury_types::{Coins, ValAddress};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct NullDistribution {
    outstanding: Mutex<BTreeMap<ValAddress, Coins>>,
}

impl NullDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding_rewards(&self, validator: &ValAddress) -> Coins {
        self.outstanding
            .lock()
            .unwrap()
            .get(validator)
            .cloned()
            .unwrap_or_default()
    }
}

impl DistributionKeeper for NullDistribution {
    fn allocate_tokens_to_validator(
        &self,
        validator: &ValidatorInfo,
        coins: &Coins,
    ) -> Result<(), CollaboratorError> {
        let mut outstanding = self.outstanding.lock().unwrap();
        let entry = outstanding.entry(validator.operator).or_default();
        *entry = entry
            .checked_add(coins)
            .ok_or_else(|| CollaboratorError::Other("reward overflow".into()))?;
        Ok(())
    }
}
