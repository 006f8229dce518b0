use anchor_lang::prelude::*;
use crate::events::ProgramInitialized;
use crate::state::*;

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    let now = Clock::get()?.unix_timestamp;

    // The initializer becomes the authority
    config.authority = ctx.accounts.authority.key();

    // No records yet
    config.record_count = 0;
    config.initialized_at = now;

    // Store the bump seed
    config.bump = ctx.bumps.config;

    // Log the initialization
    msg!("Verifix initialized with authority: {}", config.authority);

    emit!(ProgramInitialized {
        authority: config.authority,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// `init` rejects a second initialization: the PDA is already allocated
    #[account(
        init,
        payer = authority,
        space = ProgramConfig::SIZE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, ProgramConfig>,

    pub system_program: Program<'info, System>,
}
