use augury_types::ValAddress;

use crate::StoreError;

/// Missed vote periods per validator within the current slash window.
pub trait MissCounterStore {
    fn get_miss_counter(&self, validator: &ValAddress) -> Result<Option<u64>, StoreError>;
    fn put_miss_counter(&self, validator: &ValAddress, count: u64) -> Result<(), StoreError>;
    fn delete_miss_counter(&self, validator: &ValAddress) -> Result<(), StoreError>;
    fn iter_miss_counters(&self) -> Result<Vec<(ValAddress, u64)>, StoreError>;
}
