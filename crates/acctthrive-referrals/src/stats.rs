use crate::ledger::ReferralService;
use acctthrive_core::{ClockPort, EntropyPort};
use acctthrive_model::{LedgerState, ReferralRelationship, ReferralStats, ReferralStatus, UserId};
use acctthrive_store::LedgerStore;
use std::cmp::Reverse;

pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[must_use]
pub fn referral_stats(state: &LedgerState, referrer_id: &UserId) -> ReferralStats {
    let mut stats = ReferralStats::default();
    for rel in state
        .relationships
        .iter()
        .filter(|r| &r.referrer_id == referrer_id)
    {
        stats.total_referrals += 1;
        if rel.status.has_qualified() {
            stats.qualified_referrals += 1;
        }
        if rel.status == ReferralStatus::Pending {
            stats.pending_referrals += 1;
        }
        stats.total_earnings = stats.total_earnings.saturating_add(rel.reward_amount);
        if rel.status == ReferralStatus::Qualified {
            stats.pending_earnings = stats.pending_earnings.saturating_add(rel.reward_amount);
        }
    }
    stats
}

/// Newest first; relationships created in the same millisecond keep
/// reverse insertion order.
#[must_use]
pub fn recent_referrals(
    state: &LedgerState,
    referrer_id: &UserId,
    limit: usize,
) -> Vec<ReferralRelationship> {
    let mut rows: Vec<&ReferralRelationship> = state
        .relationships
        .iter()
        .filter(|r| &r.referrer_id == referrer_id)
        .collect();
    rows.sort_by_key(|r| Reverse((r.created_at, r.id)));
    rows.into_iter().take(limit).cloned().collect()
}

impl<S: LedgerStore, C: ClockPort, E: EntropyPort> ReferralService<S, C, E> {
    #[must_use]
    pub fn stats(&self, referrer_id: &UserId) -> ReferralStats {
        referral_stats(&self.state, referrer_id)
    }

    #[must_use]
    pub fn recent(&self, referrer_id: &UserId, limit: usize) -> Vec<ReferralRelationship> {
        recent_referrals(&self.state, referrer_id, limit)
    }
}
