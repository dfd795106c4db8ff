//! Nullable staking: an in-memory validator set with slash and jail bookkeeping.

use augury_oracle::{BondStatus, CollaboratorError, StakingKeeper, ValidatorInfo};
use augury_types::{ConsAddress, Dec, ValAddress};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Default tokens per unit of consensus power.
pub const DEFAULT_POWER_REDUCTION: u128 = 1_000_000;

/// A recorded call to [`StakingKeeper::slash`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlashRecord {
    pub cons_address: ConsAddress,
    pub infraction_height: i64,
    pub power: u64,
    pub fraction: Dec,
    pub burned: u128,
}

pub struct NullStaking {
    validators: Mutex<BTreeMap<ValAddress, ValidatorInfo>>,
    power_reduction: u128,
    max_validators: Mutex<u32>,
    slashes: Mutex<Vec<SlashRecord>>,
}

impl NullStaking {
    pub fn new() -> Self {
        Self {
            validators: Mutex::new(BTreeMap::new()),
            power_reduction: DEFAULT_POWER_REDUCTION,
            max_validators: Mutex::new(100),
            slashes: Mutex::new(Vec::new()),
        }
    }

    /// Add a bonded validator with the given consensus power. Its consensus address
    /// shares the operator's bytes.
    pub fn add_bonded_validator(&self, operator: ValAddress, power: u64) -> ValidatorInfo {
        let info = ValidatorInfo {
            operator,
            cons_address: ConsAddress::new(*operator.as_bytes()),
            tokens: power as u128 * self.power_reduction,
            status: BondStatus::Bonded,
            jailed: false,
        };
        self.put_validator(info.clone());
        info
    }

    pub fn put_validator(&self, info: ValidatorInfo) {
        self.validators.lock().unwrap().insert(info.operator, info);
    }

    pub fn set_status(&self, operator: &ValAddress, status: BondStatus) {
        if let Some(v) = self.validators.lock().unwrap().get_mut(operator) {
            v.status = status;
        }
    }

    pub fn set_max_validators(&self, max: u32) {
        *self.max_validators.lock().unwrap() = max;
    }

    pub fn slashes(&self) -> Vec<SlashRecord> {
        self.slashes.lock().unwrap().clone()
    }

    fn find_by_cons<'a>(
        validators: &'a mut BTreeMap<ValAddress, ValidatorInfo>,
        cons_address: &ConsAddress,
    ) -> Result<&'a mut ValidatorInfo, CollaboratorError> {
        validators
            .values_mut()
            .find(|v| v.cons_address == *cons_address)
            .ok_or_else(|| CollaboratorError::UnknownValidator(cons_address.to_string()))
    }
}

impl Default for NullStaking {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingKeeper for NullStaking {
    fn validator(&self, operator: &ValAddress) -> Option<ValidatorInfo> {
        self.validators.lock().unwrap().get(operator).cloned()
    }

    fn total_bonded_tokens(&self) -> u128 {
        self.validators
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.is_bonded())
            .map(|v| v.tokens)
            .sum()
    }

    fn power_reduction(&self) -> u128 {
        self.power_reduction
    }

    fn max_validators(&self) -> u32 {
        *self.max_validators.lock().unwrap()
    }

    fn validators_by_power(&self) -> Vec<ValidatorInfo> {
        let mut validators: Vec<ValidatorInfo> =
            self.validators.lock().unwrap().values().cloned().collect();
        validators.sort_by(|a, b| b.tokens.cmp(&a.tokens).then(a.operator.cmp(&b.operator)));
        validators
    }

    fn slash(
        &self,
        cons_address: &ConsAddress,
        infraction_height: i64,
        power: u64,
        fraction: Dec,
    ) -> Result<u128, CollaboratorError> {
        let mut validators = self.validators.lock().unwrap();
        let validator = Self::find_by_cons(&mut validators, cons_address)?;
        let stake = Dec::from_u64(power)
            .checked_mul_int(u64::try_from(self.power_reduction).unwrap_or(u64::MAX))
            .and_then(|s| s.checked_mul(fraction))
            .and_then(Dec::truncate_u128)
            .unwrap_or(0);
        let burned = stake.min(validator.tokens);
        validator.tokens -= burned;
        self.slashes.lock().unwrap().push(SlashRecord {
            cons_address: *cons_address,
            infraction_height,
            power,
            fraction,
            burned,
        });
        Ok(burned)
    }

    fn jail(&self, cons_address: &ConsAddress) -> Result<(), CollaboratorError> {
        let mut validators = self.validators.lock().unwrap();
        Self::find_by_cons(&mut validators, cons_address)?.jailed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_power_then_address() {
        let staking = NullStaking::new();
        staking.add_bonded_validator(ValAddress::new([2; 20]), 10);
        staking.add_bonded_validator(ValAddress::new([1; 20]), 10);
        staking.add_bonded_validator(ValAddress::new([3; 20]), 50);
        let order: Vec<u8> = staking
            .validators_by_power()
            .iter()
            .map(|v| v.operator.as_bytes()[0])
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn total_bonded_excludes_unbonded() {
        let staking = NullStaking::new();
        let a = ValAddress::new([1; 20]);
        staking.add_bonded_validator(a, 10);
        staking.add_bonded_validator(ValAddress::new([2; 20]), 5);
        staking.set_status(&a, BondStatus::Unbonding);
        assert_eq!(staking.total_bonded_tokens(), 5 * DEFAULT_POWER_REDUCTION);
    }

    #[test]
    fn slash_burns_fraction_and_jail_sticks() {
        let staking = NullStaking::new();
        let info = staking.add_bonded_validator(ValAddress::new([1; 20]), 100);
        let burned = staking
            .slash(&info.cons_address, 5, 100, "0.01".parse().unwrap())
            .unwrap();
        assert_eq!(burned, DEFAULT_POWER_REDUCTION);
        staking.jail(&info.cons_address).unwrap();
        let after = staking.validator(&info.operator).unwrap();
        assert!(after.jailed);
        assert_eq!(after.tokens, 99 * DEFAULT_POWER_REDUCTION);
    }
}
