use cosmwasm_std::StdError;
use cw_controllers::AdminError;
use cw_utils::PaymentError;
use sg_bucket_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    PaymentError(#[from] PaymentError),

    #[error("{0}")]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Invalid reply ID")]
    InvalidReplyID {},

    #[error("Reply error")]
    ReplyOnSuccess {},

    #[error("CollectionNotConfigured")]
    CollectionNotConfigured {},

    #[error("CollectionAlreadyConfigured")]
    CollectionAlreadyConfigured {},

    #[error("InvalidRoyalty: {numerator}/{denominator}")]
    InvalidRoyalty { numerator: u64, denominator: u64 },

    #[error("InvalidMintWindow")]
    InvalidMintWindow {},

    #[error("InvalidMintPrice: public price must not be below whitelist price")]
    InvalidMintPrice {},

    #[error("WhitelistNotConfigured")]
    WhitelistNotConfigured {},

    #[error("WhitelistEnded")]
    WhitelistEnded {},

    #[error("WhitelistCannotBeRemoved")]
    WhitelistCannotBeRemoved {},

    #[error("MintAlreadyStarted")]
    MintAlreadyStarted {},

    #[error("InputLengthMismatch")]
    InputLengthMismatch {},

    #[error("ExceedsCollectionMaximum: {requested} > {maximum}")]
    ExceedsCollectionMaximum { requested: u64, maximum: u64 },

    #[error("DuplicateToken: {uri}")]
    DuplicateToken { uri: String },

    #[error("MintingNotEnabled")]
    MintingNotEnabled {},

    #[error("NotWhitelisted")]
    NotWhitelisted {},

    #[error("AllowanceExceeded: requested {requested}, remaining {remaining}")]
    AllowanceExceeded { requested: u64, remaining: u64 },

    #[error("InsufficientSupply: requested {requested}, remaining {remaining}")]
    InsufficientSupply { requested: u64, remaining: u64 },

    #[error("InvalidMintAmount")]
    InvalidMintAmount {},

    #[error("Incorrect payment, got: {got}, expected {expected}")]
    IncorrectPayment { got: u128, expected: u128 },
}

/// Broad category of a failure, independent of the operation that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    InvalidArgument,
    AlreadyExists,
    NotFound,
    ResourceExhausted,
    StateConflict,
}

impl ContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContractError::Admin(_) => ErrorKind::PermissionDenied,

            ContractError::CollectionAlreadyConfigured {}
            | ContractError::DuplicateToken { .. }
            | ContractError::Storage(StorageError::DuplicateKey {})
            | ContractError::Storage(StorageError::AlreadyInitialized {}) => {
                ErrorKind::AlreadyExists
            }

            ContractError::CollectionNotConfigured {}
            | ContractError::WhitelistNotConfigured {}
            | ContractError::NotWhitelisted {}
            | ContractError::Storage(StorageError::KeyNotFound {})
            | ContractError::Storage(StorageError::NotInitialized {}) => ErrorKind::NotFound,

            ContractError::InsufficientSupply { .. }
            | ContractError::AllowanceExceeded { .. }
            | ContractError::ExceedsCollectionMaximum { .. } => ErrorKind::ResourceExhausted,

            ContractError::MintAlreadyStarted {}
            | ContractError::MintingNotEnabled {}
            | ContractError::WhitelistEnded {}
            | ContractError::WhitelistCannotBeRemoved {} => ErrorKind::StateConflict,

            ContractError::Std(_)
            | ContractError::PaymentError(_)
            | ContractError::Storage(_)
            | ContractError::InvalidReplyID {}
            | ContractError::ReplyOnSuccess {}
            | ContractError::InvalidRoyalty { .. }
            | ContractError::InvalidMintWindow {}
            | ContractError::InvalidMintPrice {}
            | ContractError::InputLengthMismatch {}
            | ContractError::InvalidMintAmount {}
            | ContractError::IncorrectPayment { .. } => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(
            ContractError::Admin(AdminError::NotAdmin {}).kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            ContractError::DuplicateToken {
                uri: "ipfs://a".to_string()
            }
            .kind(),
            ErrorKind::AlreadyExists
        );
        assert_eq!(
            ContractError::InsufficientSupply {
                requested: 2,
                remaining: 1
            }
            .kind(),
            ErrorKind::ResourceExhausted
        );
        assert_eq!(
            ContractError::MintAlreadyStarted {}.kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            ContractError::Storage(StorageError::ZeroBucketSize {}).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ContractError::Storage(StorageError::KeyNotFound {}).kind(),
            ErrorKind::NotFound
        );
    }
}
