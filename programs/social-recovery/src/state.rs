use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use crate::constants::*;
use crate::errors::ErrorCode;

// ============= Social Recovery Account =============
#[account]
#[derive(Default)]
pub struct SocialRecovery {
    pub allies: Vec<Pubkey>,
    pub threshold: u64,
    pub nonce: u8,
    pub config_seqno: u32,
}

impl SocialRecovery {
    /// Bytes to allocate for an account holding up to `max_allies` allies.
    pub fn space(max_allies: usize) -> usize {
        DISCRIMINATOR_LEN
            + VEC_PREFIX_LEN + PUBKEY_LEN * max_allies // allies
            + 8 // threshold
            + 1 // nonce
            + 4 // config_seqno
    }

    pub fn validate_config(allies: &[Pubkey], threshold: u64) -> Result<()> {
        require!(allies.len() <= MAX_ALLIES, ErrorCode::TooManyAllies);
        require!(
            threshold >= 1 && threshold <= allies.len() as u64,
            ErrorCode::InvalidThreshold
        );
        for (i, ally) in allies.iter().enumerate() {
            require!(!allies[..i].contains(ally), ErrorCode::DuplicateAlly);
        }
        Ok(())
    }

    pub fn init(&mut self, allies: Vec<Pubkey>, threshold: u64, nonce: u8) -> Result<()> {
        Self::validate_config(&allies, threshold)?;
        self.allies = allies;
        self.threshold = threshold;
        self.nonce = nonce;
        self.config_seqno = 0;
        Ok(())
    }

    pub fn is_ally(&self, key: &Pubkey) -> bool {
        self.allies.contains(key)
    }

    pub fn signer_address(social_recovery: &Pubkey, nonce: u8, program_id: &Pubkey) -> Result<Pubkey> {
        Pubkey::create_program_address(&[social_recovery.as_ref(), &[nonce]], program_id)
            .map_err(|_| error!(ErrorCode::InvalidNonce))
    }

    /// The program-derived authority that signs dispatched instructions.
    pub fn derived_signer(&self, social_recovery: &Pubkey, program_id: &Pubkey) -> Result<Pubkey> {
        Self::signer_address(social_recovery, self.nonce, program_id)
    }

    // Replaces allies and threshold together.
    pub fn rewrite(&mut self, allies: Vec<Pubkey>, threshold: u64) -> Result<()> {
        Self::validate_config(&allies, threshold)?;
        let seqno = self.next_seqno()?;
        self.allies = allies;
        self.threshold = threshold;
        self.config_seqno = seqno;
        Ok(())
    }

    // Replaces allies, lowering the threshold if the new set is smaller.
    pub fn set_allies(&mut self, allies: Vec<Pubkey>) -> Result<()> {
        let threshold = self.threshold.min(allies.len() as u64);
        self.rewrite(allies, threshold)
    }

    pub fn change_threshold(&mut self, threshold: u64) -> Result<()> {
        Self::validate_config(&self.allies, threshold)?;
        self.config_seqno = self.next_seqno()?;
        self.threshold = threshold;
        Ok(())
    }

    fn next_seqno(&self) -> Result<u32> {
        self.config_seqno
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::Overflow))
    }
}

// ============= Transaction Account Meta =============
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct TransactionAccount {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl TransactionAccount {
    pub const LEN: usize = PUBKEY_LEN + 1 + 1;
}

impl From<&TransactionAccount> for AccountMeta {
    fn from(account: &TransactionAccount) -> Self {
        Self {
            pubkey: account.pubkey,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }
    }
}

impl From<&AccountMeta> for TransactionAccount {
    fn from(account_meta: &AccountMeta) -> Self {
        Self {
            pubkey: account_meta.pubkey,
            is_signer: account_meta.is_signer,
            is_writable: account_meta.is_writable,
        }
    }
}

// ============= Transaction Account =============
#[account]
#[derive(Default)]
pub struct Transaction {
    pub social_recovery: Pubkey,
    pub proposer: Pubkey,
    pub program_id: Pubkey,
    pub accounts: Vec<TransactionAccount>,
    pub data: Vec<u8>,
    // Allies that approved, in approval order.
    pub approvals: Vec<Pubkey>,
    pub did_execute: bool,
    // Config seqno of the social recovery when proposed.
    pub config_seqno: u32,
}

impl Transaction {
    pub fn space(max_allies: usize, account_count: usize, data_len: usize) -> usize {
        DISCRIMINATOR_LEN
            + PUBKEY_LEN // social_recovery
            + PUBKEY_LEN // proposer
            + PUBKEY_LEN // program_id
            + VEC_PREFIX_LEN + TransactionAccount::LEN * account_count
            + VEC_PREFIX_LEN + data_len
            + VEC_PREFIX_LEN + PUBKEY_LEN * max_allies // approvals
            + 1 // did_execute
            + 4 // config_seqno
    }

    pub fn propose(
        &mut self,
        social_recovery_key: Pubkey,
        social_recovery: &SocialRecovery,
        proposer: Pubkey,
        program_id: Pubkey,
        accounts: Vec<TransactionAccount>,
        data: Vec<u8>,
    ) -> Result<()> {
        require!(accounts.len() <= MAX_ACCOUNTS, ErrorCode::TooManyAccounts);
        require!(data.len() <= MAX_DATA_SIZE, ErrorCode::DataTooLarge);

        self.social_recovery = social_recovery_key;
        self.proposer = proposer;
        self.program_id = program_id;
        self.accounts = accounts;
        self.data = data;
        self.approvals = Vec::new();
        self.did_execute = false;
        self.config_seqno = social_recovery.config_seqno;
        Ok(())
    }

    fn ensure_pending(&self, social_recovery: &SocialRecovery) -> Result<()> {
        require!(!self.did_execute, ErrorCode::AlreadyExecuted);
        require!(
            self.config_seqno == social_recovery.config_seqno,
            ErrorCode::StaleConfig
        );
        Ok(())
    }

    pub fn has_approved(&self, ally: &Pubkey) -> bool {
        self.approvals.contains(ally)
    }

    pub fn approve(&mut self, social_recovery: &SocialRecovery, ally: &Pubkey) -> Result<()> {
        require!(social_recovery.is_ally(ally), ErrorCode::NotAnAlly);
        self.ensure_pending(social_recovery)?;
        require!(!self.has_approved(ally), ErrorCode::DuplicateApproval);

        self.approvals.push(*ally);
        Ok(())
    }

    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    // Measured against the live threshold, not the one at proposal time.
    pub fn has_quorum(&self, social_recovery: &SocialRecovery) -> bool {
        self.approval_count() as u64 >= social_recovery.threshold
    }

    /// Builds the instruction to dispatch, with `signer` marked as a signer.
    pub fn to_instruction(&self, signer: &Pubkey) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self
                .accounts
                .iter()
                .map(|acc| {
                    let mut meta = AccountMeta::from(acc);
                    if &meta.pubkey == signer {
                        meta.is_signer = true;
                    }
                    meta
                })
                .collect(),
            data: self.data.clone(),
        }
    }

    /// Checks the transaction may run and marks it executed.
    ///
    /// The transaction is terminal from here on, whatever the outcome of
    /// dispatching the returned instruction.
    pub fn prepare_execution(
        &mut self,
        social_recovery: &SocialRecovery,
        signer: &Pubkey,
    ) -> Result<Instruction> {
        self.ensure_pending(social_recovery)?;
        require!(self.has_quorum(social_recovery), ErrorCode::QuorumNotMet);

        let ix = self.to_instruction(signer);
        self.did_execute = true;
        Ok(ix)
    }
}
