use anchor_lang::prelude::*;
use crate::error::VerifixProgramError;
use crate::state::*;

pub fn handler(ctx: Context<RemoveHash>, file_name: String) -> Result<()> {
    validate_file_name(&file_name)?;

    // The record itself is closed by the `close = owner` constraint
    let config = &mut ctx.accounts.config;
    config.record_count = config
        .record_count
        .checked_sub(1)
        .ok_or(VerifixProgramError::CounterUnderflow)?;

    msg!("Removed hash for {}", file_name);
    Ok(())
}

#[derive(Accounts)]
#[instruction(file_name: String)]
pub struct RemoveHash<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        mut,
        close = owner,
        has_one = owner @ VerifixProgramError::Unauthorized,
        seeds = [owner.key().as_ref(), file_name.as_bytes()],
        bump = file_hash.bump
    )]
    pub file_hash: Account<'info, FileHash>,

    #[account(mut)]
    pub owner: Signer<'info>,
}
