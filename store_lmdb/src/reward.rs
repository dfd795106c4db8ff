//! LMDB implementation of RewardStore. Pools are keyed by big-endian id; the id
//! sequence lives in the meta database.

use augury_store::{RewardPool, RewardStore, StoreError};

use crate::store::{decode, decode_u64, encode, LmdbOracleStore};

const NEXT_REWARD_ID_KEY: &[u8] = b"next_reward_id";

impl RewardStore for LmdbOracleStore {
    fn next_reward_id(&self) -> Result<u64, StoreError> {
        let mut allocated = 0;
        self.update_raw(self.dbs.meta, NEXT_REWARD_ID_KEY, |current| {
            allocated = match current {
                Some(bytes) => decode_u64(bytes)?,
                None => 0,
            };
            Ok((allocated + 1).to_be_bytes().to_vec())
        })?;
        Ok(allocated)
    }

    fn get_reward_pool(&self, id: u64) -> Result<Option<RewardPool>, StoreError> {
        match self.get_raw(self.dbs.reward_pools, &id.to_be_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_reward_pool(&self, pool: &RewardPool) -> Result<(), StoreError> {
        self.put_raw(self.dbs.reward_pools, &pool.id.to_be_bytes(), &encode(pool)?)?;
        Ok(())
    }

    fn delete_reward_pool(&self, id: u64) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.reward_pools, &id.to_be_bytes())?;
        Ok(())
    }

    fn iter_reward_pools(&self) -> Result<Vec<RewardPool>, StoreError> {
        self.entries(self.dbs.reward_pools)?
            .iter()
            .map(|(_, value)| Ok(decode(value)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::open_test_store;
    use augury_types::Coins;

    #[test]
    fn reward_ids_are_sequential() {
        let (_dir, store) = open_test_store();
        assert_eq!(store.next_reward_id().unwrap(), 0);
        assert_eq!(store.next_reward_id().unwrap(), 1);
        assert_eq!(store.next_reward_id().unwrap(), 2);
    }

    #[test]
    fn pools_put_get_delete() {
        let (_dir, store) = open_test_store();
        let pool = RewardPool {
            id: 5,
            vote_periods: 3,
            coins: Coins::single("reward", 300),
        };
        store.put_reward_pool(&pool).unwrap();
        assert_eq!(store.get_reward_pool(5).unwrap(), Some(pool.clone()));
        assert_eq!(store.iter_reward_pools().unwrap(), vec![pool]);

        store.delete_reward_pool(5).unwrap();
        assert_eq!(store.get_reward_pool(5).unwrap(), None);
    }
}
