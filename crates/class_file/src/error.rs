use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("Unknown cp info tag {tag} at constant pool index {index}")]
    UnknownTag { tag: u8, index: u16 },
    #[error("Invalid magic identifier: 0x{0:X}")]
    BadMagic(u32),
    #[error("Expected {expected} at constant pool index {index}, found {found:?}")]
    UnexpectedConstantPoolEntry {
        index: u16,
        expected: &'static str,
        found: Option<constant_pool::CpInfo>,
    },
}
