//! Key-value store implementations - in-memory and file-backed.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::InMemoryStore;

/// Default capacity, matching what browsers grant local storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Bytes an entry counts against the quota.
fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
