use augury_types::{AccAddress, ValAddress};

use crate::StoreError;

/// Which account a validator has authorised to submit votes on its behalf.
///
/// A validator with no entry is fed by its own operator account.
pub trait FeederDelegationStore {
    fn get_feeder_delegation(&self, validator: &ValAddress)
        -> Result<Option<AccAddress>, StoreError>;
    fn put_feeder_delegation(
        &self,
        validator: &ValAddress,
        feeder: &AccAddress,
    ) -> Result<(), StoreError>;
    fn iter_feeder_delegations(&self) -> Result<Vec<(ValAddress, AccAddress)>, StoreError>;
}
