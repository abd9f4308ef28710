#![forbid(unsafe_code)]

mod backend;
mod local_fs;
mod memory;
mod paths;

pub use backend::{LedgerStore, StoreError, StoreErrorCode};
pub use local_fs::{LocalFsStore, SaveLockGuard};
pub use memory::MemoryStore;
pub use paths::{state_file_path, state_lock_path, state_tmp_path, STATE_FILE_NAME};

pub const CRATE_NAME: &str = "acctthrive-store";
