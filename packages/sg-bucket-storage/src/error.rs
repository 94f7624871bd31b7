use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StorageError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("DuplicateKey")]
    DuplicateKey {},

    #[error("KeyNotFound")]
    KeyNotFound {},

    #[error("IndexOutOfRange: index {index}, length {length}")]
    IndexOutOfRange { index: u64, length: u64 },

    #[error("ZeroBucketSize")]
    ZeroBucketSize {},

    #[error("ZeroBuckets")]
    ZeroBuckets {},

    #[error("NotInitialized")]
    NotInitialized {},

    #[error("AlreadyInitialized")]
    AlreadyInitialized {},
}

impl From<StorageError> for StdError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Std(err) => err,
            err => StdError::generic_err(err.to_string()),
        }
    }
}
