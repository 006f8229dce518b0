use anchor_lang::prelude::*;
use crate::error::VerifixProgramError;
use crate::events::HashVerified;
use crate::state::*;

pub fn handler(ctx: Context<VerifyHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
    validate_file_name(&file_name)?;

    // Read-only comparison against the stored digest
    let file_hash = &ctx.accounts.file_hash;
    require!(file_hash.hash == hash, VerifixProgramError::HashMismatch);

    msg!("Hash verified for {}", file_name);

    emit!(HashVerified {
        record: file_hash.key(),
        owner: file_hash.owner,
        file_name,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(file_name: String)]
pub struct VerifyHash<'info> {
    #[account(
        seeds = [owner.key().as_ref(), file_name.as_bytes()],
        bump = file_hash.bump
    )]
    pub file_hash: Account<'info, FileHash>,

    /// CHECK: only used as a PDA seed; anyone may verify anyone's record
    pub owner: UncheckedAccount<'info>,
}
