//! Verifix - on-chain file integrity registry
//!
//! Stores one SHA-256 digest per (owner, file name) pair so a file can later
//! be checked against the digest recorded when it was stored.
//! - `initialize`: creates the program config singleton
//! - `store_hash` / `update_hash` / `remove_hash`: manage a file record
//! - `verify_hash`: compares a digest against a stored record

use anchor_lang::prelude::*;

declare_id!("3G7fYQpdrsuRSHPqSGoTBZunmxqLTXYZdrd9VwkUiUUs");

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

#[program]
pub mod verifix_program {
    use super::*;

    /// Create the program config singleton. Fails if it already exists.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Record the digest of `file_name` for the signing user
    pub fn store_hash(ctx: Context<StoreHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
        instructions::store_hash::handler(ctx, file_name, hash)
    }

    /// Replace the digest of an existing record (owner only)
    pub fn update_hash(ctx: Context<UpdateHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
        instructions::update_hash::handler(ctx, file_name, hash)
    }

    /// Succeeds only if `hash` matches the stored digest
    pub fn verify_hash(ctx: Context<VerifyHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
        instructions::verify_hash::handler(ctx, file_name, hash)
    }

    /// Close a record and return its rent to the owner
    pub fn remove_hash(ctx: Context<RemoveHash>, file_name: String) -> Result<()> {
        instructions::remove_hash::handler(ctx, file_name)
    }
}
