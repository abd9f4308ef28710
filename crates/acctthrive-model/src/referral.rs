// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ReferralCode, RelationshipId, UserId};
use crate::money::Usd;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Times before the epoch clamp to zero.
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ReferralStatus {
    Pending,
    Qualified,
    /// Paid out. No ledger operation produces this state yet.
    Rewarded,
}

impl ReferralStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Qualified => "qualified",
            Self::Rewarded => "rewarded",
        }
    }

    /// True once the referral has earned its bonus.
    #[must_use]
    pub const fn has_qualified(self) -> bool {
        matches!(self, Self::Qualified | Self::Rewarded)
    }
}

/// Per-user referral account holding the shareable code and running totals.
/// The share link is not stored; it is derived from the code and the
/// configured signup URL whenever it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferralAccount {
    pub user_id: UserId,
    pub code: ReferralCode,
    pub total_referrals: u64,
    pub total_earnings: Usd,
    pub pending_earnings: Usd,
    pub created_at: Timestamp,
}

impl ReferralAccount {
    #[must_use]
    pub fn new(user_id: UserId, code: ReferralCode, created_at: Timestamp) -> Self {
        Self {
            user_id,
            code,
            total_referrals: 0,
            total_earnings: Usd::ZERO,
            pending_earnings: Usd::ZERO,
            created_at,
        }
    }

    pub fn note_referral(&mut self) {
        self.total_referrals = self.total_referrals.saturating_add(1);
    }

    pub fn credit_bonus(&mut self, bonus: Usd) {
        self.total_earnings = self.total_earnings.saturating_add(bonus);
        self.pending_earnings = self.pending_earnings.saturating_add(bonus);
    }
}

/// One referrer -> referred-user link and its qualification progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferralRelationship {
    pub id: RelationshipId,
    pub referrer_id: UserId,
    pub referred_user_id: UserId,
    pub code: ReferralCode,
    pub status: ReferralStatus,
    pub accumulated_deposit: Usd,
    pub reward_amount: Usd,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_at: Option<Timestamp>,
}

impl ReferralRelationship {
    #[must_use]
    pub fn pending(
        id: RelationshipId,
        referrer_id: UserId,
        referred_user_id: UserId,
        code: ReferralCode,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            referrer_id,
            referred_user_id,
            code,
            status: ReferralStatus::Pending,
            accumulated_deposit: Usd::ZERO,
            reward_amount: Usd::ZERO,
            created_at,
            qualified_at: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == ReferralStatus::Pending
    }

    pub fn record_deposit(&mut self, amount: Usd) {
        self.accumulated_deposit = self.accumulated_deposit.saturating_add(amount);
    }

    /// Moves a pending relationship to `qualified` with the given bonus.
    ///
    /// Returns `false` and changes nothing when the relationship has already
    /// left `pending`.
    pub fn qualify(&mut self, bonus: Usd, at: Timestamp) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = ReferralStatus::Qualified;
        self.reward_amount = bonus;
        self.qualified_at = Some(at);
        true
    }
}

/// Read-only projection over one referrer's relationships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    pub total_referrals: u64,
    pub qualified_referrals: u64,
    pub pending_referrals: u64,
    pub total_earnings: Usd,
    pub pending_earnings: Usd,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relationship() -> ReferralRelationship {
        ReferralRelationship::pending(
            RelationshipId::from_sequence(1),
            UserId::parse("user_123").expect("referrer"),
            UserId::parse("user_456").expect("referred"),
            ReferralCode::parse("US123456ABC").expect("code"),
            Timestamp::from_millis(10),
        )
    }

    #[test]
    fn qualify_transitions_only_once() {
        let mut rel = relationship();
        assert!(rel.qualify(Usd::from_cents(65), Timestamp::from_millis(20)));
        assert!(!rel.qualify(Usd::from_cents(999), Timestamp::from_millis(30)));
        assert_eq!(rel.reward_amount, Usd::from_cents(65));
        assert_eq!(rel.qualified_at, Some(Timestamp::from_millis(20)));
        assert_eq!(rel.status, ReferralStatus::Qualified);
    }

    #[test]
    fn timestamp_before_epoch_clamps_to_zero() {
        let before = UNIX_EPOCH - std::time::Duration::from_secs(5);
        assert_eq!(Timestamp::from_system_time(before), Timestamp::from_millis(0));
    }

    #[test]
    fn rewarded_counts_as_qualified() {
        assert!(ReferralStatus::Rewarded.has_qualified());
        assert!(ReferralStatus::Qualified.has_qualified());
        assert!(!ReferralStatus::Pending.has_qualified());
    }
}
