use anchor_lang::prelude::*;

#[event]
pub struct SocialRecoveryCreated {
    pub social_recovery: Pubkey,
    pub allies: Vec<Pubkey>,
    pub threshold: u64,
}

#[event]
pub struct TransactionCreated {
    pub social_recovery: Pubkey,
    pub transaction: Pubkey,
    pub proposer: Pubkey,
    pub program_id: Pubkey,
    pub config_seqno: u32,
}

#[event]
pub struct TransactionApproved {
    pub transaction: Pubkey,
    pub ally: Pubkey,
    pub approvals: u64,
    pub threshold: u64,
}

#[event]
pub struct TransactionExecuted {
    pub social_recovery: Pubkey,
    pub transaction: Pubkey,
}

#[event]
pub struct AlliesChanged {
    pub social_recovery: Pubkey,
    pub allies: Vec<Pubkey>,
    pub threshold: u64,
    pub config_seqno: u32,
}
