use std::path::PathBuf;

use crate::errors::ConfigPathScope;

fn non_empty_env(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Directory holding the ledger state file.
///
/// Resolution order: `ACCTTHRIVE_STATE_DIR`, `$XDG_DATA_HOME/acctthrive`,
/// `$HOME/.local/share/acctthrive`, then `.acctthrive/state`.
#[must_use]
pub fn resolve_acctthrive_state_dir() -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_ACCTTHRIVE_STATE_DIR) {
        return PathBuf::from(explicit);
    }
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("acctthrive");
    }
    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("acctthrive");
    }
    PathBuf::from(".acctthrive").join("state")
}

#[must_use]
pub fn resolve_acctthrive_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Some(explicit) = non_empty_env(crate::ENV_ACCTTHRIVE_CONFIG) {
                return PathBuf::from(explicit);
            }
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("acctthrive")
                    .join("config.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("acctthrive")
                    .join("config.toml");
            }
            PathBuf::from(".acctthrive").join("config.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".acctthrive").join("config.toml"),
    }
}
