// SPDX-License-Identifier: Apache-2.0

use crate::error::LedgerError;
use crate::ledger::ReferralService;
use acctthrive_core::{ClockPort, EntropyPort};
use acctthrive_model::{RelationshipId, Usd, UserId};
use acctthrive_store::LedgerStore;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositOutcome {
    /// The user has no pending referral; nothing changed.
    NoPendingReferral,
    /// Deposit added, threshold not reached yet.
    Accumulated {
        relationship: RelationshipId,
        accumulated: Usd,
    },
    /// Threshold reached on this deposit; the referrer was credited.
    Qualified {
        relationship: RelationshipId,
        referrer_id: UserId,
        bonus: Usd,
    },
}

impl DepositOutcome {
    #[must_use]
    pub const fn qualified(&self) -> bool {
        matches!(self, Self::Qualified { .. })
    }
}

impl<S: LedgerStore, C: ClockPort, E: EntropyPort> ReferralService<S, C, E> {
    /// Attributes a confirmed deposit to the user's pending referral.
    ///
    /// Returns `true` only on the deposit that moves the referral to
    /// `qualified`. Later deposits find no pending referral and return
    /// `false`, so the bonus is paid once per relationship.
    pub fn process_deposit(&mut self, referred_user_id: &UserId, amount: Usd) -> Result<bool, LedgerError> {
        Ok(self.apply_deposit(referred_user_id, amount)?.qualified())
    }

    pub fn apply_deposit(
        &mut self,
        referred_user_id: &UserId,
        amount: Usd,
    ) -> Result<DepositOutcome, LedgerError> {
        let Some(index) = self
            .state
            .relationships
            .iter()
            .position(|r| &r.referred_user_id == referred_user_id && r.is_pending())
        else {
            debug!(user_id = %referred_user_id, amount = %amount, "deposit has no pending referral");
            return Ok(DepositOutcome::NoPendingReferral);
        };

        let now = self.now();
        let bonus = self.bonus;
        let minimum = self.config().minimum_deposit_usd;
        let mut next = self.state.clone();
        let rel = &mut next.relationships[index];
        rel.record_deposit(amount);
        let relationship = rel.id;
        let accumulated = rel.accumulated_deposit;
        let referrer_id = rel.referrer_id.clone();

        let qualified = accumulated >= minimum && rel.qualify(bonus, now);
        if qualified {
            if let Some(referrer) = next.accounts.get_mut(&referrer_id) {
                referrer.credit_bonus(bonus);
            }
        }
        self.commit(next)?;

        if qualified {
            info!(
                relationship = %relationship,
                referrer_id = %referrer_id,
                referred_user_id = %referred_user_id,
                bonus_usd = %bonus,
                bonus_ngn = %self.rate.to_foreign(bonus),
                "referral qualified"
            );
            Ok(DepositOutcome::Qualified {
                relationship,
                referrer_id,
                bonus,
            })
        } else {
            debug!(
                relationship = %relationship,
                accumulated = %accumulated,
                minimum = %minimum,
                "deposit recorded below referral threshold"
            );
            Ok(DepositOutcome::Accumulated {
                relationship,
                accumulated,
            })
        }
    }
}
