// ============= Limits =============
pub const MAX_ALLIES: usize = 16;
pub const MAX_ACCOUNTS: usize = 32;
pub const MAX_DATA_SIZE: usize = 1024;

// ============= Account Layout =============
pub const DISCRIMINATOR_LEN: usize = 8;
pub const VEC_PREFIX_LEN: usize = 4;
pub const PUBKEY_LEN: usize = 32;
