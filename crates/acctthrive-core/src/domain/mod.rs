pub mod canonical;
pub mod config;

pub use canonical::sha256_hex;
pub use config::{resolve_acctthrive_config_path, resolve_acctthrive_state_dir};
