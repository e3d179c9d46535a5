use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Threshold must be at least 1 and no greater than the number of allies")]
    InvalidThreshold,
    #[msg("Allies must be unique")]
    DuplicateAlly,
    #[msg("The given key is not an ally of this social recovery")]
    NotAnAlly,
    #[msg("Ally has already approved this transaction")]
    DuplicateApproval,
    #[msg("The given transaction has already been executed")]
    AlreadyExecuted,
    #[msg("Allies or threshold changed since the transaction was proposed")]
    StaleConfig,
    #[msg("Not enough allies approved this transaction")]
    QuorumNotMet,
    #[msg("Too many allies")]
    TooManyAllies,
    #[msg("Too many accounts in instruction")]
    TooManyAccounts,
    #[msg("Instruction data too large")]
    DataTooLarge,
    #[msg("Nonce does not derive a valid signer address")]
    InvalidNonce,
    #[msg("Transaction belongs to a different social recovery")]
    InvalidSocialRecovery,
    #[msg("Arithmetic overflow")]
    Overflow,
}
