use anchor_lang::prelude::*;
use anchor_lang::solana_program::{instruction::Instruction, program::invoke_signed};

/// Hands an approved instruction to whatever runs it.
pub trait Dispatch {
    fn dispatch(&self, ix: &Instruction) -> Result<()>;
}

/// Cross-program invocation signed by the social recovery's derived signer.
pub struct SignedInvoke<'a, 'info> {
    pub accounts: &'a [AccountInfo<'info>],
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl Dispatch for SignedInvoke<'_, '_> {
    fn dispatch(&self, ix: &Instruction) -> Result<()> {
        invoke_signed(ix, self.accounts, self.signer_seeds)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SocialRecovery, Transaction};

    struct Reject;

    impl Dispatch for Reject {
        fn dispatch(&self, _ix: &Instruction) -> Result<()> {
            Err(ProgramError::InvalidInstructionData.into())
        }
    }

    #[test]
    fn failed_dispatch_leaves_the_transaction_executed() {
        let ally = Pubkey::new_unique();
        let mut sr = SocialRecovery::default();
        sr.init(vec![ally], 1, 255).unwrap();

        let mut tx = Transaction::default();
        tx.propose(
            Pubkey::new_unique(),
            &sr,
            ally,
            Pubkey::new_unique(),
            vec![],
            vec![7],
        )
        .unwrap();
        tx.approve(&sr, &ally).unwrap();

        let ix = tx.prepare_execution(&sr, &Pubkey::new_unique()).unwrap();
        assert_eq!(
            Reject.dispatch(&ix).unwrap_err(),
            anchor_lang::error::Error::from(ProgramError::InvalidInstructionData)
        );
        assert!(tx.did_execute);
        assert!(tx.prepare_execution(&sr, &Pubkey::new_unique()).is_err());
    }
}
