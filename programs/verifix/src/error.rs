//! Verifix program errors

use anchor_lang::prelude::*;

#[error_code]
pub enum VerifixProgramError {
    #[msg("File name is empty")]
    FileNameEmpty,

    #[msg("File name exceeds 32 bytes")]
    FileNameTooLong,

    #[msg("Hash does not match the stored record")]
    HashMismatch,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Record counter overflow")]
    CounterOverflow,

    #[msg("Record counter underflow")]
    CounterUnderflow,
}
