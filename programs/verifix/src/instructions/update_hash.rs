use anchor_lang::prelude::*;
use crate::error::VerifixProgramError;
use crate::events::HashUpdated;
use crate::state::*;

pub fn handler(ctx: Context<UpdateHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
    validate_file_name(&file_name)?;

    let record_key = ctx.accounts.file_hash.key();
    let file_hash = &mut ctx.accounts.file_hash;

    // Keep the old digest for the event
    let previous_hash = file_hash.hash;

    // Overwrite the digest; stored_at is left untouched
    let now = Clock::get()?.unix_timestamp;
    file_hash.hash = hash;
    file_hash.updated_at = now;

    msg!("Updated hash for {}", file_name);

    emit!(HashUpdated {
        record: record_key,
        owner: file_hash.owner,
        previous_hash,
        hash,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(file_name: String)]
pub struct UpdateHash<'info> {
    #[account(
        mut,
        has_one = owner @ VerifixProgramError::Unauthorized,
        seeds = [owner.key().as_ref(), file_name.as_bytes()],
        bump = file_hash.bump
    )]
    pub file_hash: Account<'info, FileHash>,

    pub owner: Signer<'info>,
}
