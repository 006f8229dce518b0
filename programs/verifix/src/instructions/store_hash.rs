use anchor_lang::prelude::*;
use crate::error::VerifixProgramError;
use crate::events::HashStored;
use crate::state::*;

pub fn handler(ctx: Context<StoreHash>, file_name: String, hash: [u8; 32]) -> Result<()> {
    // Seed derivation already bounds the length; an empty name still gets here
    validate_file_name(&file_name)?;

    let now = Clock::get()?.unix_timestamp;
    let record_key = ctx.accounts.file_hash.key();

    // Fill in the new record
    let file_hash = &mut ctx.accounts.file_hash;
    file_hash.hash = hash;
    file_hash.owner = ctx.accounts.user.key();
    file_hash.stored_at = now;
    file_hash.updated_at = now;
    file_hash.bump = ctx.bumps.file_hash;

    // Count it in the config
    let config = &mut ctx.accounts.config;
    config.record_count = config
        .record_count
        .checked_add(1)
        .ok_or(VerifixProgramError::CounterOverflow)?;

    msg!("Stored hash for {} owned by {}", file_name, file_hash.owner);

    emit!(HashStored {
        record: record_key,
        owner: file_hash.owner,
        file_name,
        hash,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(file_name: String)]
pub struct StoreHash<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, ProgramConfig>,

    #[account(
        init,
        payer = user,
        space = FileHash::SIZE,
        seeds = [user.key().as_ref(), file_name.as_bytes()],
        bump
    )]
    pub file_hash: Account<'info, FileHash>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}
