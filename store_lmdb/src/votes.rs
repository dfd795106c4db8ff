//! LMDB implementations of PrevoteStore and VoteStore, both keyed by validator.

use augury_store::{
    AggregateExchangeRatePrevote, AggregateExchangeRateVote, PrevoteStore, StoreError, VoteStore,
};
use augury_types::ValAddress;

use crate::store::{decode, encode, LmdbOracleStore};

impl PrevoteStore for LmdbOracleStore {
    fn get_prevote(
        &self,
        voter: &ValAddress,
    ) -> Result<Option<AggregateExchangeRatePrevote>, StoreError> {
        match self.get_raw(self.dbs.prevotes, voter.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_prevote(&self, prevote: &AggregateExchangeRatePrevote) -> Result<(), StoreError> {
        self.put_raw(self.dbs.prevotes, prevote.voter.as_bytes(), &encode(prevote)?)?;
        Ok(())
    }

    fn delete_prevote(&self, voter: &ValAddress) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.prevotes, voter.as_bytes())?;
        Ok(())
    }

    fn iter_prevotes(&self) -> Result<Vec<AggregateExchangeRatePrevote>, StoreError> {
        self.entries(self.dbs.prevotes)?
            .iter()
            .map(|(_, value)| Ok(decode(value)?))
            .collect()
    }
}

impl VoteStore for LmdbOracleStore {
    fn get_vote(
        &self,
        voter: &ValAddress,
    ) -> Result<Option<AggregateExchangeRateVote>, StoreError> {
        match self.get_raw(self.dbs.votes, voter.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_vote(&self, vote: &AggregateExchangeRateVote) -> Result<(), StoreError> {
        self.put_raw(self.dbs.votes, vote.voter.as_bytes(), &encode(vote)?)?;
        Ok(())
    }

    fn delete_vote(&self, voter: &ValAddress) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.votes, voter.as_bytes())?;
        Ok(())
    }

    fn iter_votes(&self) -> Result<Vec<AggregateExchangeRateVote>, StoreError> {
        self.entries(self.dbs.votes)?
            .iter()
            .map(|(_, value)| Ok(decode(value)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::open_test_store;
    use augury_types::{AggregateVoteHash, Dec, ExchangeRateTuple};

    #[test]
    fn prevote_put_get_delete() {
        let (_dir, store) = open_test_store();
        let voter = ValAddress::new([7; 20]);
        assert!(store.get_prevote(&voter).unwrap().is_none());

        let prevote = AggregateExchangeRatePrevote {
            hash: AggregateVoteHash::compute("1", "(BTC:USD,1.0)", &voter),
            voter,
            submit_block: 42,
        };
        store.put_prevote(&prevote).unwrap();
        assert_eq!(store.get_prevote(&voter).unwrap(), Some(prevote));

        store.delete_prevote(&voter).unwrap();
        assert!(store.iter_prevotes().unwrap().is_empty());
    }

    #[test]
    fn votes_iterate_in_address_order() {
        let (_dir, store) = open_test_store();
        for b in [3u8, 1, 2] {
            store
                .put_vote(&AggregateExchangeRateVote {
                    exchange_rate_tuples: vec![ExchangeRateTuple::new(
                        "BTC:USD".parse().unwrap(),
                        Dec::from_u64(b as u64),
                    )],
                    voter: ValAddress::new([b; 20]),
                })
                .unwrap();
        }
        let voters: Vec<u8> = store
            .iter_votes()
            .unwrap()
            .iter()
            .map(|v| v.voter.as_bytes()[0])
            .collect();
        assert_eq!(voters, vec![1, 2, 3]);
    }

    #[test]
    fn undecodable_vote_is_reported_as_corruption() {
        let (_dir, store) = open_test_store();
        let voter = ValAddress::new([4; 20]);
        store
            .put_raw(store.dbs.votes, voter.as_bytes(), &[0xFF, 0x01])
            .unwrap();
        assert!(matches!(store.get_vote(&voter), Err(StoreError::Corruption(_))));
        assert!(matches!(store.iter_votes(), Err(StoreError::Corruption(_))));
    }
}
