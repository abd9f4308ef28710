#![forbid(unsafe_code)]
//! Referral ledger model SSOT.
//!
//! ```compile_fail
//! use acctthrive_model::ReferralStatus;
//!
//! fn exhaustive_match(s: ReferralStatus) -> &'static str {
//!     match s {
//!         ReferralStatus::Pending => "p",
//!         ReferralStatus::Qualified => "q",
//!         ReferralStatus::Rewarded => "r",
//!     }
//! }
//! ```

mod currency;
mod ids;
mod money;
mod program;
mod referral;
mod state;

pub use currency::ExchangeRate;
pub use ids::{ReferralCode, RelationshipId, UserId, ValidationError, CODE_MAX_LEN, USER_ID_MAX_LEN};
pub use money::{Ngn, Usd};
pub use program::{
    ProgramConfig, DEFAULT_MAX_REFERRALS_PER_USER, DEFAULT_MINIMUM_DEPOSIT_USD_CENTS,
    DEFAULT_NGN_PER_USD, DEFAULT_PROGRAM_NAME, DEFAULT_REFERRAL_BONUS_NGN,
    DEFAULT_SIGNUP_BASE_URL,
};
pub use referral::{ReferralAccount, ReferralRelationship, ReferralStats, ReferralStatus, Timestamp};
pub use state::{LedgerState, LEDGER_SCHEMA_VERSION};

pub const CRATE_NAME: &str = "acctthrive-model";
