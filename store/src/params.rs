use augury_types::Params;

use crate::StoreError;

/// The singleton parameter record.
pub trait ParamsStore {
    /// Current parameters. Fails with [`StoreError::NotFound`] before genesis has
    /// written them.
    fn get_params(&self) -> Result<Params, StoreError>;
    fn put_params(&self, params: &Params) -> Result<(), StoreError>;
}
