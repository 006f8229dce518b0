//! Error types for the Verifix SDK

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

/// Anchor reserves 2000..3000 for constraint failures and 3000..4000 for
/// account (de)serialization and ownership failures.
const ANCHOR_CONSTRAINT_ERRORS: std::ops::Range<u32> = 2000..4000;

/// First code of errors raised by the program itself
const PROGRAM_ERROR_OFFSET: u32 = 6000;

/// System program `AccountAlreadyInUse`, returned when `init` hits an allocated account
const ACCOUNT_ALREADY_IN_USE: u32 = 0;

/// Main error type for the Verifix SDK
#[derive(Error, Debug)]
pub enum VerifixError {
    /// Required accounts or arguments are missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The cluster could not be reached
    #[error("Network error: {0}")]
    Network(String),

    #[error("Program is already initialized")]
    AlreadyInitialized,

    #[error("Program is not initialized")]
    NotInitialized,

    #[error("No hash stored for {0}")]
    RecordNotFound(String),

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    #[error("Program rejected the instruction with code {0}")]
    ProgramRejected(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Keypair error: {0}")]
    Keypair(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VerifixError {
    /// Stable numeric code, grouped by category
    pub fn code(&self) -> u32 {
        match self {
            // Validation
            VerifixError::Validation(_) => 1000,
            VerifixError::InvalidAccountData(_) => 1001,

            // Program state
            VerifixError::AlreadyInitialized => 2000,
            VerifixError::NotInitialized => 2001,
            VerifixError::RecordNotFound(_) => 2002,
            VerifixError::ProgramRejected(_) => 2003,

            // Transport
            VerifixError::Network(_) => 3000,
            VerifixError::TransactionFailed(_) => 3001,

            // Local setup
            VerifixError::InvalidConfiguration(_) => 4000,
            VerifixError::Keypair(_) => 4001,
            VerifixError::Io(_) => 4002,
        }
    }

    /// True when retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, VerifixError::Network(_))
    }

    /// Classify a failed `initialize` submission.
    ///
    /// The config account already existing on-chain means another
    /// initialization landed first.
    pub(crate) fn from_initialize(err: ClientError) -> Self {
        match err.get_transaction_error() {
            Some(TransactionError::InstructionError(
                _,
                InstructionError::Custom(ACCOUNT_ALREADY_IN_USE),
            )) => VerifixError::AlreadyInitialized,
            _ => Self::from(err),
        }
    }
}

impl From<ClientError> for VerifixError {
    fn from(err: ClientError) -> Self {
        if let Some(tx_err) = err.get_transaction_error() {
            return Self::from(tx_err);
        }
        match err.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
                VerifixError::Network(err.to_string())
            }
            _ => VerifixError::TransactionFailed(err.to_string()),
        }
    }
}

impl From<TransactionError> for VerifixError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::InstructionError(_, InstructionError::Custom(code))
                if ANCHOR_CONSTRAINT_ERRORS.contains(&code) =>
            {
                VerifixError::Validation(format!("account constraint violated (code {code})"))
            }
            TransactionError::InstructionError(_, InstructionError::Custom(code))
                if code >= PROGRAM_ERROR_OFFSET =>
            {
                VerifixError::ProgramRejected(code)
            }
            TransactionError::InstructionError(_, InstructionError::MissingRequiredSignature)
            | TransactionError::InstructionError(_, InstructionError::NotEnoughAccountKeys) => {
                VerifixError::Validation(err.to_string())
            }
            other => VerifixError::TransactionFailed(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifixError>;
