//! Client-side helpers for building and reviewing social recovery transactions.

use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};
use crate::instruction;
use crate::state::{SocialRecovery, Transaction, TransactionAccount};

/// Derived signer address and nonce for a social recovery account.
pub fn find_signer(social_recovery: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[social_recovery.as_ref()], program_id)
}

/// Accounts for a config change routed through `execute_transaction`.
pub fn config_change_accounts(social_recovery: &Pubkey, signer: &Pubkey) -> Vec<TransactionAccount> {
    vec![
        TransactionAccount {
            pubkey: *social_recovery,
            is_signer: false,
            is_writable: true,
        },
        TransactionAccount {
            pubkey: *signer,
            is_signer: true,
            is_writable: false,
        },
    ]
}

/// Remaining accounts for `execute_transaction`.
///
/// The signer flag is cleared on the derived signer, since the program signs
/// for it rather than the client, and the target program is appended.
pub fn execute_remaining_accounts(transaction: &Transaction, signer: &Pubkey) -> Vec<AccountMeta> {
    transaction
        .accounts
        .iter()
        .map(|acc| {
            let mut meta = AccountMeta::from(acc);
            if &meta.pubkey == signer {
                meta.is_signer = false;
            }
            meta
        })
        .chain(std::iter::once(AccountMeta::new_readonly(transaction.program_id, false)))
        .collect()
}

// ============= Config Changes =============
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigChange {
    SetAlliesAndThreshold { allies: Vec<Pubkey>, threshold: u64 },
    SetAllies { allies: Vec<Pubkey> },
    ChangeThreshold { threshold: u64 },
}

impl ConfigChange {
    /// Instruction data for the matching gated instruction.
    pub fn data(&self) -> Vec<u8> {
        match self {
            ConfigChange::SetAlliesAndThreshold { allies, threshold } => {
                instruction::SetAlliesAndThreshold {
                    allies: allies.clone(),
                    threshold: *threshold,
                }
                .data()
            }
            ConfigChange::SetAllies { allies } => instruction::SetAllies {
                allies: allies.clone(),
            }
            .data(),
            ConfigChange::ChangeThreshold { threshold } => instruction::ChangeThreshold {
                threshold: *threshold,
            }
            .data(),
        }
    }

    /// Recognises a proposed instruction as a config change to this program,
    /// so allies can review it before approving.
    pub fn decode(program_id: &Pubkey, data: &[u8]) -> Option<Self> {
        if program_id != &crate::ID || data.len() < 8 {
            return None;
        }
        let (discriminator, args) = data.split_at(8);

        if discriminator == &instruction::SetAlliesAndThreshold::DISCRIMINATOR[..] {
            let ix = instruction::SetAlliesAndThreshold::try_from_slice(args).ok()?;
            Some(ConfigChange::SetAlliesAndThreshold {
                allies: ix.allies,
                threshold: ix.threshold,
            })
        } else if discriminator == &instruction::SetAllies::DISCRIMINATOR[..] {
            let ix = instruction::SetAllies::try_from_slice(args).ok()?;
            Some(ConfigChange::SetAllies { allies: ix.allies })
        } else if discriminator == &instruction::ChangeThreshold::DISCRIMINATOR[..] {
            let ix = instruction::ChangeThreshold::try_from_slice(args).ok()?;
            Some(ConfigChange::ChangeThreshold {
                threshold: ix.threshold,
            })
        } else {
            None
        }
    }

    pub fn apply(self, social_recovery: &mut SocialRecovery) -> Result<()> {
        match self {
            ConfigChange::SetAlliesAndThreshold { allies, threshold } => {
                social_recovery.rewrite(allies, threshold)
            }
            ConfigChange::SetAllies { allies } => social_recovery.set_allies(allies),
            ConfigChange::ChangeThreshold { threshold } => {
                social_recovery.change_threshold(threshold)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_change_data_decodes_back() {
        let change = ConfigChange::SetAlliesAndThreshold {
            allies: vec![Pubkey::new_unique(), Pubkey::new_unique()],
            threshold: 2,
        };
        assert_eq!(ConfigChange::decode(&crate::ID, &change.data()), Some(change));

        let change = ConfigChange::ChangeThreshold { threshold: 1 };
        assert_eq!(ConfigChange::decode(&crate::ID, &change.data()), Some(change));
    }

    #[test]
    fn decode_ignores_other_programs_and_instructions() {
        let change = ConfigChange::SetAllies { allies: vec![Pubkey::new_unique()] };
        assert_eq!(ConfigChange::decode(&Pubkey::new_unique(), &change.data()), None);

        let approve = instruction::Approve {}.data();
        assert_eq!(ConfigChange::decode(&crate::ID, &approve), None);
        assert_eq!(ConfigChange::decode(&crate::ID, &[1, 2, 3]), None);
    }

    #[test]
    fn remaining_accounts_leave_signing_to_the_program() {
        let social_recovery = Pubkey::new_unique();
        let (signer, _) = find_signer(&social_recovery, &crate::ID);
        let transaction = Transaction {
            program_id: crate::ID,
            accounts: config_change_accounts(&social_recovery, &signer),
            ..Transaction::default()
        };

        let metas = execute_remaining_accounts(&transaction, &signer);
        assert_eq!(
            metas,
            vec![
                AccountMeta::new(social_recovery, false),
                AccountMeta::new_readonly(signer, false),
                AccountMeta::new_readonly(crate::ID, false),
            ]
        );
    }
}
