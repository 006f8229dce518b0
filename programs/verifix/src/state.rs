//! Verifix state

use anchor_lang::prelude::*;
use crate::error::VerifixProgramError;

pub const CONFIG_SEED: &[u8] = b"config";

/// A single PDA seed is capped at 32 bytes
pub const MAX_FILE_NAME_LEN: usize = 32;

/// Program-wide configuration, created once by `initialize`
#[account]
pub struct ProgramConfig {
    /// Signer that initialized the program
    pub authority: Pubkey,
    /// Number of live file records
    pub record_count: u64,
    pub initialized_at: i64,
    pub bump: u8,
}

impl ProgramConfig {
    pub const SIZE: usize = 8 + // discriminator
        32 + // authority
        8 + // record_count
        8 + // initialized_at
        1; // bump
}

/// Digest of one file, keyed by `[owner, file_name]`
///
/// `hash` must stay the first field: off-chain readers take the digest from
/// bytes `8..40` of the account data.
#[account]
pub struct FileHash {
    pub hash: [u8; 32],
    pub owner: Pubkey,
    pub stored_at: i64,
    pub updated_at: i64,
    pub bump: u8,
}

impl FileHash {
    pub const SIZE: usize = 8 + // discriminator
        32 + // hash
        32 + // owner
        8 + // stored_at
        8 + // updated_at
        1; // bump

    pub const HASH_OFFSET: usize = 8;
}

/// Reject names that cannot be used as a PDA seed
pub fn validate_file_name(file_name: &str) -> Result<()> {
    require!(!file_name.is_empty(), VerifixProgramError::FileNameEmpty);
    require!(
        file_name.len() <= MAX_FILE_NAME_LEN,
        VerifixProgramError::FileNameTooLong
    );
    Ok(())
}
