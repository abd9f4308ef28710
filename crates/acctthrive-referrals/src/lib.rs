#![forbid(unsafe_code)]
//! Referral bookkeeping for the Acctthrive storefront.
//!
//! [`ReferralService`] owns the ledger snapshot and writes every change
//! through a [`LedgerStore`](acctthrive_store::LedgerStore) before making it
//! visible. Domain rejections (unknown code, self-referral, no pending
//! referral) are reported as `false`; only storage failures surface as
//! [`LedgerError`].

mod adapters;
mod codegen;
mod error;
mod ledger;
mod qualification;
mod stats;

pub use adapters::{CountingEntropy, ManualClock, SystemClock, UuidEntropy};
pub use codegen::{generate_code, generate_link, CODE_PREFIX_LEN, CODE_SUFFIX_LEN, CODE_TIME_DIGITS};
pub use error::LedgerError;
pub use ledger::{ReferralOutcome, ReferralRejection, ReferralService, MAX_CODE_ATTEMPTS};
pub use qualification::DepositOutcome;
pub use stats::{recent_referrals, referral_stats, DEFAULT_RECENT_LIMIT};

pub const CRATE_NAME: &str = "acctthrive-referrals";
