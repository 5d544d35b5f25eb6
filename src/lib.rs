mod hash_table;
mod macros;
mod prime;

pub use hash_table::{HashTable, Iter};
pub use prime::{is_prime, next_prime};

use thiserror::Error;

/// A domain name together with the address it resolves to
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Every slot on the probe sequence of `key` was taken
    #[error("No free slot for key {key:?} after probing all {capacity} slots")]
    ProbeExhausted { key: String, capacity: usize },
}
