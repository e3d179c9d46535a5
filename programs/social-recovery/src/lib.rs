//! A social recovery multisig that executes arbitrary instructions once a
//! threshold of allies has approved them.
//!
//! The allies and threshold can only be changed by the multisig's own derived
//! signer, which the program only produces while executing an approved
//! transaction. Every change bumps `config_seqno`, so transactions proposed
//! under the old configuration can no longer be approved or executed.

use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;

pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod sdk;
pub mod state;

use dispatch::{Dispatch, SignedInvoke};
use events::*;
use instructions::*;
use state::*;

declare_id!("EqLecNHYNM9rWoABDzMGqZg14jAtRPpHkdsg2Akz4qNf");

#[program]
pub mod social_recovery {
    use super::*;

    pub fn create_social_recovery(
        ctx: Context<CreateSocialRecovery>,
        allies: Vec<Pubkey>,
        threshold: u64,
        nonce: u8,
    ) -> Result<()> {
        let key = ctx.accounts.social_recovery.key();
        SocialRecovery::signer_address(&key, nonce, ctx.program_id)?;

        let social_recovery = &mut ctx.accounts.social_recovery;
        social_recovery.init(allies, threshold, nonce)?;

        msg!(
            "Created social recovery {} with {} allies, threshold {}",
            key,
            social_recovery.allies.len(),
            threshold
        );
        emit!(SocialRecoveryCreated {
            social_recovery: key,
            allies: social_recovery.allies.clone(),
            threshold,
        });
        Ok(())
    }

    pub fn create_transaction(
        ctx: Context<CreateTransaction>,
        program_id: Pubkey,
        accounts: Vec<TransactionAccount>,
        data: Vec<u8>,
    ) -> Result<()> {
        let social_recovery_key = ctx.accounts.social_recovery.key();
        let transaction_key = ctx.accounts.transaction.key();
        let proposer = ctx.accounts.proposer.key();

        let transaction = &mut ctx.accounts.transaction;
        transaction.propose(
            social_recovery_key,
            &ctx.accounts.social_recovery,
            proposer,
            program_id,
            accounts,
            data,
        )?;

        msg!("Proposed transaction {} against {}", transaction_key, program_id);
        emit!(TransactionCreated {
            social_recovery: social_recovery_key,
            transaction: transaction_key,
            proposer,
            program_id,
            config_seqno: transaction.config_seqno,
        });
        Ok(())
    }

    pub fn approve(ctx: Context<Approve>) -> Result<()> {
        let ally = ctx.accounts.ally.key();
        let transaction_key = ctx.accounts.transaction.key();
        let social_recovery = &ctx.accounts.social_recovery;

        let transaction = &mut ctx.accounts.transaction;
        transaction.approve(social_recovery, &ally)?;

        msg!(
            "Ally {} approved, {}/{}",
            ally,
            transaction.approval_count(),
            social_recovery.threshold
        );
        emit!(TransactionApproved {
            transaction: transaction_key,
            ally,
            approvals: transaction.approval_count() as u64,
            threshold: social_recovery.threshold,
        });
        Ok(())
    }

    /// Executes an approved transaction as the derived signer.
    ///
    /// The transaction is marked executed and written back before dispatch,
    /// so a dispatched instruction that re-enters this program sees it as
    /// executed.
    pub fn execute_transaction<'info>(
        ctx: Context<'_, '_, '_, 'info, ExecuteTransaction<'info>>,
    ) -> Result<()> {
        let social_recovery_key = ctx.accounts.social_recovery.key();
        let transaction_key = ctx.accounts.transaction.key();
        let signer = ctx.accounts.social_recovery_signer.key();

        let ix = ctx
            .accounts
            .transaction
            .prepare_execution(&ctx.accounts.social_recovery, &signer)?;
        ctx.accounts.transaction.exit(ctx.program_id)?;

        let nonce = [ctx.accounts.social_recovery.nonce];
        let seeds: &[&[u8]] = &[social_recovery_key.as_ref(), &nonce];
        SignedInvoke {
            accounts: ctx.remaining_accounts,
            signer_seeds: &[seeds],
        }
        .dispatch(&ix)?;

        msg!("Executed transaction {}", transaction_key);
        emit!(TransactionExecuted {
            social_recovery: social_recovery_key,
            transaction: transaction_key,
        });
        Ok(())
    }

    pub fn set_allies_and_threshold(
        ctx: Context<Auth>,
        allies: Vec<Pubkey>,
        threshold: u64,
    ) -> Result<()> {
        ctx.accounts.social_recovery.rewrite(allies, threshold)?;
        allies_changed(&ctx.accounts.social_recovery)
    }

    pub fn set_allies(ctx: Context<Auth>, allies: Vec<Pubkey>) -> Result<()> {
        ctx.accounts.social_recovery.set_allies(allies)?;
        allies_changed(&ctx.accounts.social_recovery)
    }

    pub fn change_threshold(ctx: Context<Auth>, threshold: u64) -> Result<()> {
        ctx.accounts.social_recovery.change_threshold(threshold)?;
        allies_changed(&ctx.accounts.social_recovery)
    }
}

fn allies_changed(social_recovery: &Account<'_, SocialRecovery>) -> Result<()> {
    msg!(
        "Config {}: {} allies, threshold {}",
        social_recovery.config_seqno,
        social_recovery.allies.len(),
        social_recovery.threshold
    );
    emit!(AlliesChanged {
        social_recovery: social_recovery.key(),
        allies: social_recovery.allies.clone(),
        threshold: social_recovery.threshold,
        config_seqno: social_recovery.config_seqno,
    });
    Ok(())
}
