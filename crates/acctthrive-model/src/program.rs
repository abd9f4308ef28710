use crate::currency::ExchangeRate;
use crate::ids::{ReferralCode, ValidationError};
use crate::money::{Ngn, Usd};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROGRAM_NAME: &str = "Acctthrive Referral Program";
pub const DEFAULT_NGN_PER_USD: u64 = 1550;
pub const DEFAULT_REFERRAL_BONUS_NGN: u64 = 1000;
pub const DEFAULT_MINIMUM_DEPOSIT_USD_CENTS: u64 = 2500;
pub const DEFAULT_MAX_REFERRALS_PER_USER: u64 = 1000;
pub const DEFAULT_SIGNUP_BASE_URL: &str = "https://acctthrive.com/signup";

/// Referral program parameters.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgramConfig {
    pub name: String,
    pub ngn_per_usd: u64,
    pub referral_bonus_ngn: Ngn,
    pub minimum_deposit_usd: Usd,
    pub max_referrals_per_user: u64,
    pub signup_base_url: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROGRAM_NAME.to_string(),
            ngn_per_usd: DEFAULT_NGN_PER_USD,
            referral_bonus_ngn: Ngn::new(DEFAULT_REFERRAL_BONUS_NGN),
            minimum_deposit_usd: Usd::from_cents(DEFAULT_MINIMUM_DEPOSIT_USD_CENTS),
            max_referrals_per_user: DEFAULT_MAX_REFERRALS_PER_USER,
            signup_base_url: DEFAULT_SIGNUP_BASE_URL.to_string(),
        }
    }
}

impl ProgramConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError("program name must not be empty".to_string()));
        }
        let rate = self.exchange_rate()?;
        if rate.to_base(self.referral_bonus_ngn).is_zero() {
            return Err(ValidationError(
                "referral bonus must convert to at least one cent".to_string(),
            ));
        }
        if self.max_referrals_per_user == 0 {
            return Err(ValidationError(
                "max_referrals_per_user must be > 0".to_string(),
            ));
        }
        let base = self.signup_base_url.trim();
        if base.is_empty() {
            return Err(ValidationError("signup_base_url must not be empty".to_string()));
        }
        if base.contains('?') || base.contains('#') {
            return Err(ValidationError(
                "signup_base_url must not carry a query or fragment".to_string(),
            ));
        }
        Ok(())
    }

    pub fn exchange_rate(&self) -> Result<ExchangeRate, ValidationError> {
        ExchangeRate::new(self.ngn_per_usd)
    }

    /// Fixed referrer bonus in the base currency.
    pub fn bonus_usd(&self) -> Result<Usd, ValidationError> {
        Ok(self.exchange_rate()?.to_base(self.referral_bonus_ngn))
    }

    /// `<signup_base_url>?ref=<code>`.
    #[must_use]
    pub fn share_link(&self, code: &ReferralCode) -> String {
        format!("{}?ref={}", self.signup_base_url.trim(), code.as_str())
    }
}
