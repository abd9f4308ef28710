#![forbid(unsafe_code)]
//! Shared primitives for the Acctthrive referral ledger.
//!
//! This crate holds no business rules. It owns the exit-code and
//! machine-error vocabulary, the clock and entropy ports the ledger is
//! driven through, canonical JSON encoding, and config/state path resolution.

pub mod domain;
pub mod errors;
pub mod ports;

pub use domain::canonical;
pub use domain::{resolve_acctthrive_config_path, resolve_acctthrive_state_dir, sha256_hex};
pub use errors::{
    ConfigPathScope, Error, ErrorContext, ExitCode, MachineError, Result, ResultExt,
};
pub use ports::{ClockPort, EntropyPort};

pub const CRATE_NAME: &str = "acctthrive-core";

pub const ENV_ACCTTHRIVE_LOG_LEVEL: &str = "ACCTTHRIVE_LOG_LEVEL";
pub const ENV_ACCTTHRIVE_LOG_JSON: &str = "ACCTTHRIVE_LOG_JSON";
pub const ENV_ACCTTHRIVE_CONFIG: &str = "ACCTTHRIVE_CONFIG";
pub const ENV_ACCTTHRIVE_STATE_DIR: &str = "ACCTTHRIVE_STATE_DIR";
