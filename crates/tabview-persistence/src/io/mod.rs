//! File primitives for the session directory.

mod hash;
mod read;
mod write;

pub use hash::{sha256_hex, verify_sha256};
pub(crate) use read::read_key;
pub(crate) use write::{commit_staged, discard_staged, remove_key, stage, write_atomic};
