use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("undecodable stored entry: {0}")]
    Corruption(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<bincode::Error> for LmdbError {
    fn from(e: bincode::Error) -> Self {
        LmdbError::Serialization(e.to_string())
    }
}

impl From<LmdbError> for augury_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::NotFound(key) => augury_store::StoreError::NotFound(key),
            LmdbError::Serialization(msg) => augury_store::StoreError::Serialization(msg),
            LmdbError::Corruption(msg) => augury_store::StoreError::Corruption(msg),
            other => augury_store::StoreError::Backend(other.to_string()),
        }
    }
}
