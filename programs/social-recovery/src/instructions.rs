use anchor_lang::prelude::*;
use crate::state::*;
use crate::errors::ErrorCode;

#[derive(Accounts)]
pub struct CreateSocialRecovery<'info> {
    // Allocated by the client with enough space for the allies.
    #[account(zero)]
    pub social_recovery: Box<Account<'info, SocialRecovery>>,
}

#[derive(Accounts)]
pub struct CreateTransaction<'info> {
    pub social_recovery: Box<Account<'info, SocialRecovery>>,

    #[account(zero)]
    pub transaction: Box<Account<'info, Transaction>>,

    pub proposer: Signer<'info>,
}

#[derive(Accounts)]
pub struct Approve<'info> {
    pub social_recovery: Box<Account<'info, SocialRecovery>>,

    #[account(
        mut,
        has_one = social_recovery @ ErrorCode::InvalidSocialRecovery
    )]
    pub transaction: Box<Account<'info, Transaction>>,

    pub ally: Signer<'info>,
}

/// Only the derived signer can satisfy this, so these instructions are
/// reachable only through `execute_transaction`.
#[derive(Accounts)]
pub struct Auth<'info> {
    #[account(mut)]
    pub social_recovery: Box<Account<'info, SocialRecovery>>,

    #[account(
        seeds = [social_recovery.key().as_ref()],
        bump = social_recovery.nonce,
    )]
    pub social_recovery_signer: Signer<'info>,
}

#[derive(Accounts)]
pub struct ExecuteTransaction<'info> {
    // Not `mut`: a dispatched config change writes it through its own context.
    pub social_recovery: Box<Account<'info, SocialRecovery>>,

    #[account(
        seeds = [social_recovery.key().as_ref()],
        bump = social_recovery.nonce,
    )]
    /// CHECK: PDA, signs the dispatched instruction
    pub social_recovery_signer: UncheckedAccount<'info>,

    #[account(
        mut,
        has_one = social_recovery @ ErrorCode::InvalidSocialRecovery
    )]
    pub transaction: Box<Account<'info, Transaction>>,
}
