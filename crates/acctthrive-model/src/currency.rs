use crate::ids::ValidationError;
use crate::money::{Ngn, Usd};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Fixed NGN-per-USD rate.
///
/// Conversions to NGN round to the nearest whole naira; conversions to USD
/// round to the nearest cent. Both round half-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRate(NonZeroU64);

impl ExchangeRate {
    pub fn new(ngn_per_usd: u64) -> Result<Self, ValidationError> {
        NonZeroU64::new(ngn_per_usd)
            .map(Self)
            .ok_or_else(|| ValidationError("exchange rate must be > 0".to_string()))
    }

    #[must_use]
    pub const fn ngn_per_usd(self) -> u64 {
        self.0.get()
    }

    #[must_use]
    pub fn to_base(self, amount: Ngn) -> Usd {
        let rate = u128::from(self.0.get());
        let cents = (u128::from(amount.naira()) * 200 + rate) / (2 * rate);
        Usd::from_cents(u64::try_from(cents).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn to_foreign(self, amount: Usd) -> Ngn {
        let rate = u128::from(self.0.get());
        let naira = u128::from(amount.cents())
            .saturating_mul(rate)
            .saturating_mul(2)
            .saturating_add(100)
            / 200;
        Ngn::new(u64::try_from(naira).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bonus_converts_to_sixty_five_cents() {
        let rate = ExchangeRate::new(1550).expect("rate");
        assert_eq!(rate.to_base(Ngn::new(1000)), Usd::from_cents(65));
        assert_eq!(rate.to_foreign(Usd::from_cents(65)), Ngn::new(1008));
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(ExchangeRate::new(0).is_err());
    }

    #[test]
    fn conversions_round_half_up() {
        let rate = ExchangeRate::new(200).expect("rate");
        assert_eq!(rate.to_base(Ngn::new(1)), Usd::from_cents(1));
        assert_eq!(rate.to_foreign(Usd::from_cents(1)), Ngn::new(2));
        let rate = ExchangeRate::new(50).expect("rate");
        assert_eq!(rate.to_foreign(Usd::from_cents(1)), Ngn::new(1));
    }
}
