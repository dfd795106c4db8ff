use augury_types::Pair;

use crate::StoreError;

/// The set of pairs currently accepted in votes.
///
/// This is the active set, which may lag the whitelist in the parameters by up to one
/// vote period.
pub trait WhitelistStore {
    fn is_whitelisted(&self, pair: &Pair) -> Result<bool, StoreError>;
    fn insert_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError>;
    fn delete_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError>;
    fn iter_whitelisted_pairs(&self) -> Result<Vec<Pair>, StoreError>;
}
