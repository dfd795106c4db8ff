//! Oracle transaction messages and their stateless validation.

use augury_types::{
    parse_exchange_rate_tuples, AccAddress, AggregateVoteHash, ExchangeRateTuple, ParamsUpdate,
    TypesError, ValAddress,
};
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Longest accepted exchange-rate payload, in bytes.
pub const MAX_EXCHANGE_RATES_LEN: usize = 4096;
/// Longest accepted salt, in bytes.
pub const MAX_SALT_LEN: usize = 4;

/// Commit to a set of rates for the next vote period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAggregateExchangeRatePrevote {
    /// Hex encoding of the 20-byte vote hash.
    pub hash: String,
    pub feeder: AccAddress,
    pub validator: ValAddress,
}

impl MsgAggregateExchangeRatePrevote {
    pub fn new(hash: AggregateVoteHash, feeder: AccAddress, validator: ValAddress) -> Self {
        Self {
            hash: hash.to_string(),
            feeder,
            validator,
        }
    }

    pub fn validate_basic(&self) -> Result<(), OracleError> {
        AggregateVoteHash::from_hex(&self.hash)
            .map(|_| ())
            .map_err(|e| OracleError::InvalidHash(e.to_string()))
    }
}

/// Reveal the rates committed by the previous period's prevote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAggregateExchangeRateVote {
    pub salt: String,
    /// `(pair,rate)|(pair,rate)|…`, exactly as hashed in the prevote.
    pub exchange_rates: String,
    pub feeder: AccAddress,
    pub validator: ValAddress,
}

impl MsgAggregateExchangeRateVote {
    pub fn new(
        salt: impl Into<String>,
        exchange_rates: impl Into<String>,
        feeder: AccAddress,
        validator: ValAddress,
    ) -> Self {
        Self {
            salt: salt.into(),
            exchange_rates: exchange_rates.into(),
            feeder,
            validator,
        }
    }

    pub fn validate_basic(&self) -> Result<(), OracleError> {
        if self.salt.is_empty() || self.salt.len() > MAX_SALT_LEN {
            return Err(OracleError::InvalidSaltLength(self.salt.len()));
        }
        if self.exchange_rates.len() > MAX_EXCHANGE_RATES_LEN {
            return Err(OracleError::PayloadTooLong {
                len: self.exchange_rates.len(),
                max: MAX_EXCHANGE_RATES_LEN,
            });
        }
        if self.parse_tuples()?.is_empty() {
            return Err(OracleError::EmptyPayload);
        }
        Ok(())
    }

    /// Parse the payload, classifying failures as payload errors.
    pub fn parse_tuples(&self) -> Result<Vec<ExchangeRateTuple>, OracleError> {
        parse_exchange_rate_tuples(&self.exchange_rates).map_err(|e| match e {
            TypesError::DecOverflow(rate) => OracleError::RateOverflow(rate),
            other => OracleError::MalformedPayload(other.to_string()),
        })
    }
}

/// Authorise `delegate` to feed prices for validator `operator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDelegateFeedConsent {
    pub operator: ValAddress,
    pub delegate: AccAddress,
}

/// Merge a partial update into the stored parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditOracleParams {
    pub sender: AccAddress,
    pub update: ParamsUpdate,
}

/// Every message the oracle accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OracleMsg {
    AggregateExchangeRatePrevote(MsgAggregateExchangeRatePrevote),
    AggregateExchangeRateVote(MsgAggregateExchangeRateVote),
    DelegateFeedConsent(MsgDelegateFeedConsent),
    EditOracleParams(MsgEditOracleParams),
}

impl OracleMsg {
    pub fn validate_basic(&self) -> Result<(), OracleError> {
        match self {
            Self::AggregateExchangeRatePrevote(msg) => msg.validate_basic(),
            Self::AggregateExchangeRateVote(msg) => msg.validate_basic(),
            Self::DelegateFeedConsent(_) | Self::EditOracleParams(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(salt: &str, rates: &str) -> MsgAggregateExchangeRateVote {
        MsgAggregateExchangeRateVote::new(
            salt,
            rates,
            AccAddress::new([1; 20]),
            ValAddress::new([1; 20]),
        )
    }

    #[test]
    fn prevote_hash_must_be_forty_hex_chars() {
        let validator = ValAddress::new([1; 20]);
        let hash = AggregateVoteHash::compute("1", "(BTC:USD,1)", &validator);
        let mut msg = MsgAggregateExchangeRatePrevote::new(hash, AccAddress::new([1; 20]), validator);
        assert!(msg.validate_basic().is_ok());
        msg.hash.push_str("00");
        assert!(matches!(msg.validate_basic(), Err(OracleError::InvalidHash(_))));
        msg.hash = "not hex".into();
        assert!(matches!(msg.validate_basic(), Err(OracleError::InvalidHash(_))));
    }

    #[test]
    fn salt_length_bounds() {
        assert!(vote("1", "(BTC:USD,1)").validate_basic().is_ok());
        assert!(vote("abcd", "(BTC:USD,1)").validate_basic().is_ok());
        assert!(matches!(
            vote("", "(BTC:USD,1)").validate_basic(),
            Err(OracleError::InvalidSaltLength(0))
        ));
        assert!(matches!(
            vote("abcde", "(BTC:USD,1)").validate_basic(),
            Err(OracleError::InvalidSaltLength(5))
        ));
    }

    #[test]
    fn payload_errors_are_classified() {
        assert!(matches!(vote("1", "").validate_basic(), Err(OracleError::EmptyPayload)));
        assert!(matches!(
            vote("1", "(BTC:USD,1)|(BTC:USD,2)").validate_basic(),
            Err(OracleError::MalformedPayload(_))
        ));
        assert!(matches!(
            vote("1", "BTC:USD=1").validate_basic(),
            Err(OracleError::MalformedPayload(_))
        ));
        let huge = format!("(BTC:USD,{})", "9".repeat(50));
        assert!(matches!(vote("1", &huge).validate_basic(), Err(OracleError::RateOverflow(_))));
        let long = "x".repeat(MAX_EXCHANGE_RATES_LEN + 1);
        assert!(matches!(
            vote("1", &long).validate_basic(),
            Err(OracleError::PayloadTooLong { .. })
        ));
    }
}
