// SPDX-License-Identifier: Apache-2.0

use crate::backend::{LedgerStore, StoreError, StoreErrorCode};
use crate::paths::{state_file_path, state_lock_path, state_tmp_path};
use acctthrive_core::{canonical, sha256_hex, ErrorContext, ResultExt};
use acctthrive_model::LedgerState;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON-file store rooted at a state directory.
///
/// Saves write a temp file, verify its checksum, then rename it over the
/// state file while holding a single-writer lock file.
///
/// The lock file is not reclaimed automatically. If a writer dies mid-save,
/// `.referral_ledger.json.lock` stays behind and every later save fails with
/// [`StoreErrorCode::Conflict`] until an operator removes it.
#[derive(Debug, Clone)]
pub struct LocalFsStore {
    pub root: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        state_file_path(&self.root)
    }

    pub fn acquire_save_lock(&self) -> Result<SaveLockGuard, StoreError> {
        fs::create_dir_all(&self.root)
            .with_context("create state dir")
            .map_err(io_error)?;
        let lock_path = state_lock_path(&self.root);
        match fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&lock_path)
        {
            Ok(_) => Ok(SaveLockGuard { lock_path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::new(
                StoreErrorCode::Conflict,
                format!(
                    "ledger state is locked by another writer ({})",
                    lock_path.display()
                ),
            )),
            Err(e) => Err(io_error(ErrorContext::new("create save lock", e))),
        }
    }
}

impl LedgerStore for LocalFsStore {
    fn load(&self) -> Result<LedgerState, StoreError> {
        let path = self.state_path();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger state yet; starting empty");
                return Ok(LedgerState::default());
            }
            Err(e) => return Err(io_error(ErrorContext::new("read ledger state", e))),
        };
        let state: LedgerState = serde_json::from_slice(&raw).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Decode,
                format!("{}: {e}", path.display()),
            )
        })?;
        state
            .validate_strict()
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        debug!(
            path = %path.display(),
            accounts = state.accounts.len(),
            relationships = state.relationships.len(),
            "ledger state loaded"
        );
        Ok(state)
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        state
            .validate_strict()
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        let _lock = self.acquire_save_lock()?;

        let bytes = canonical::stable_json_pretty_bytes(state)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        let expected = sha256_hex(&bytes);

        let tmp = state_tmp_path(&self.root);
        fs::write(&tmp, &bytes)
            .with_context("write ledger temp file")
            .map_err(io_error)?;
        let written = fs::read(&tmp)
            .with_context("read back ledger temp file")
            .map_err(io_error)?;
        let actual = sha256_hex(&written);
        if actual != expected {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::new(
                StoreErrorCode::Io,
                "ledger state checksum verification failed before replace",
            ));
        }
        fs::rename(&tmp, self.state_path())
            .with_context("replace ledger state")
            .map_err(io_error)?;
        debug!(root = %self.root.display(), sha256 = %expected, "ledger state saved");
        Ok(())
    }
}

/// Removes the lock file on drop.
#[derive(Debug)]
pub struct SaveLockGuard {
    lock_path: PathBuf,
}

impl SaveLockGuard {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for SaveLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn io_error(e: ErrorContext<std::io::Error>) -> StoreError {
    StoreError::new(StoreErrorCode::Io, e.to_string())
}
