use anchor_lang::prelude::*;

/// Emitted once, when the config singleton is created
#[event]
pub struct ProgramInitialized {
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct HashStored {
    pub record: Pubkey,
    pub owner: Pubkey,
    pub file_name: String,
    pub hash: [u8; 32],
    pub timestamp: i64,
}

#[event]
pub struct HashUpdated {
    pub record: Pubkey,
    pub owner: Pubkey,
    pub previous_hash: [u8; 32],
    pub hash: [u8; 32],
    pub timestamp: i64,
}

/// Emitted only on a successful match; a mismatch aborts the instruction
#[event]
pub struct HashVerified {
    pub record: Pubkey,
    pub owner: Pubkey,
    pub file_name: String,
}
