use std::path::{Path, PathBuf};

pub const STATE_FILE_NAME: &str = "referral_ledger.json";

#[must_use]
pub fn state_file_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE_NAME)
}

#[must_use]
pub fn state_tmp_path(root: &Path) -> PathBuf {
    root.join(format!("{STATE_FILE_NAME}.tmp"))
}

#[must_use]
pub fn state_lock_path(root: &Path) -> PathBuf {
    root.join(format!(".{STATE_FILE_NAME}.lock"))
}
