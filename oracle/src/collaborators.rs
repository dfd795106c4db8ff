//! Capabilities the oracle consumes from the surrounding chain.
//!
//! The engine never sees concrete staking, bank or distribution types. Each host
//! provides adapters implementing these traits; tests use the in-memory versions from
//! `augury-nullables`.

use augury_types::{Coins, ConsAddress, Dec, ValAddress};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a collaborator. The oracle propagates them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("module account {0:?} does not exist")]
    UnknownModuleAccount(String),

    #[error("insufficient funds in {module}: need {need}, have {have}")]
    InsufficientFunds {
        module: String,
        need: String,
        have: String,
    },

    #[error("unknown validator {0}")]
    UnknownValidator(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondStatus {
    Unbonded,
    Unbonding,
    Bonded,
}

/// The slice of a validator's staking record the oracle needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub operator: ValAddress,
    pub cons_address: ConsAddress,
    /// Bonded tokens, in raw staking units.
    pub tokens: u128,
    pub status: BondStatus,
    pub jailed: bool,
}

impl ValidatorInfo {
    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }

    /// Consensus power: tokens divided by the staking power reduction.
    pub fn consensus_power(&self, power_reduction: u128) -> u64 {
        tokens_to_power(self.tokens, power_reduction)
    }
}

/// Convert raw staking tokens to consensus power, saturating at `u64::MAX`.
pub fn tokens_to_power(tokens: u128, power_reduction: u128) -> u64 {
    if power_reduction == 0 {
        return 0;
    }
    u64::try_from(tokens / power_reduction).unwrap_or(u64::MAX)
}

pub trait StakingKeeper {
    fn validator(&self, operator: &ValAddress) -> Option<ValidatorInfo>;

    /// Total tokens held by bonded validators.
    fn total_bonded_tokens(&self) -> u128;

    fn power_reduction(&self) -> u128;

    /// Size of the active validator set.
    fn max_validators(&self) -> u32;

    /// All validators ordered by descending consensus power, ties by operator address.
    fn validators_by_power(&self) -> Vec<ValidatorInfo>;

    /// Slash `fraction` of the stake the validator had at `infraction_height`.
    /// Returns the amount burned.
    fn slash(
        &self,
        cons_address: &ConsAddress,
        infraction_height: i64,
        power: u64,
        fraction: Dec,
    ) -> Result<u128, CollaboratorError>;

    fn jail(&self, cons_address: &ConsAddress) -> Result<(), CollaboratorError>;
}

pub trait BankKeeper {
    fn has_module_account(&self, module: &str) -> bool;

    fn module_balance(&self, module: &str) -> Coins;

    fn send_coins_from_module_to_module(
        &self,
        from: &str,
        to: &str,
        coins: &Coins,
    ) -> Result<(), CollaboratorError>;
}

pub trait DistributionKeeper {
    /// Credit `coins` to the validator's outstanding rewards. The coins themselves are
    /// moved to the distribution module account separately.
    fn allocate_tokens_to_validator(
        &self,
        validator: &ValidatorInfo,
        coins: &Coins,
    ) -> Result<(), CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_divides_by_reduction() {
        assert_eq!(tokens_to_power(5_000_000, 1_000_000), 5);
        assert_eq!(tokens_to_power(999_999, 1_000_000), 0);
        assert_eq!(tokens_to_power(10, 0), 0);
        assert_eq!(tokens_to_power(u128::MAX, 1), u64::MAX);
    }
}
