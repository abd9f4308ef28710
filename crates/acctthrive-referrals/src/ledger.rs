// SPDX-License-Identifier: Apache-2.0

use crate::codegen::{generate_code, generate_link};
use crate::error::LedgerError;
use acctthrive_core::{ClockPort, EntropyPort};
use acctthrive_model::{
    ExchangeRate, LedgerState, ProgramConfig, ReferralAccount, ReferralCode, ReferralRelationship,
    RelationshipId, Timestamp, Usd, UserId,
};
use acctthrive_store::{LedgerStore, StoreError, StoreErrorCode};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Draws allowed before giving up on finding an unused code.
pub const MAX_CODE_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralRejection {
    UnknownCode,
    SelfReferral,
    DuplicatePair,
    ReferrerAtCapacity,
}

impl ReferralRejection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownCode => "unknown_code",
            Self::SelfReferral => "self_referral",
            Self::DuplicatePair => "duplicate_pair",
            Self::ReferrerAtCapacity => "referrer_at_capacity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralOutcome {
    Recorded(RelationshipId),
    Rejected(ReferralRejection),
}

impl ReferralOutcome {
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Referral ledger bound to a store, a clock and an entropy source.
///
/// Every mutation is applied to a copy of the snapshot, saved through the
/// store, and only then swapped in. A failed save leaves the service
/// exactly as it was.
pub struct ReferralService<S, C, E> {
    store: S,
    clock: C,
    entropy: E,
    config: ProgramConfig,
    pub(crate) rate: ExchangeRate,
    pub(crate) bonus: Usd,
    pub(crate) state: LedgerState,
    codes: BTreeMap<ReferralCode, UserId>,
}

impl<S: LedgerStore, C: ClockPort, E: EntropyPort> ReferralService<S, C, E> {
    pub fn open(store: S, clock: C, entropy: E, config: ProgramConfig) -> Result<Self, LedgerError> {
        config.validate().map_err(LedgerError::Config)?;
        let rate = config.exchange_rate().map_err(LedgerError::Config)?;
        let bonus = config.bonus_usd().map_err(LedgerError::Config)?;
        let state = store.load()?;
        state
            .validate_strict()
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        let codes = state.code_index();
        debug!(
            accounts = state.accounts.len(),
            relationships = state.relationships.len(),
            bonus_usd = %bonus,
            "referral ledger opened"
        );
        Ok(Self {
            store,
            clock,
            entropy,
            config,
            rate,
            bonus,
            state,
            codes,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Signup link for `code` under the current signup base URL.
    #[must_use]
    pub fn share_link(&self, code: &ReferralCode) -> String {
        generate_link(&self.config, code)
    }

    #[must_use]
    pub fn exchange_rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Fixed referrer bonus in USD.
    #[must_use]
    pub fn bonus(&self) -> Usd {
        self.bonus
    }

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn now(&self) -> Timestamp {
        Timestamp::from_system_time(self.clock.now())
    }

    pub(crate) fn commit(&mut self, next: LedgerState) -> Result<(), LedgerError> {
        if let Err(err) = self.store.save(&next) {
            warn!(error = %err, "ledger save failed; change discarded");
            return Err(err.into());
        }
        self.state = next;
        Ok(())
    }

    #[must_use]
    pub fn account(&self, user_id: &UserId) -> Option<&ReferralAccount> {
        self.state.accounts.get(user_id)
    }

    pub fn get_or_create_account(&mut self, user_id: &UserId) -> Result<ReferralAccount, LedgerError> {
        if let Some(existing) = self.state.accounts.get(user_id) {
            return Ok(existing.clone());
        }

        let now = self.now();
        let code = self.draw_unused_code(user_id, now)?;
        let account = ReferralAccount::new(user_id.clone(), code.clone(), now);

        let mut next = self.state.clone();
        next.accounts.insert(user_id.clone(), account.clone());
        self.commit(next)?;
        self.codes.insert(code, user_id.clone());

        debug!(user_id = %user_id, code = %account.code, "referral account created");
        Ok(account)
    }

    fn draw_unused_code(&mut self, user_id: &UserId, now: Timestamp) -> Result<ReferralCode, LedgerError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(user_id, now, &mut self.entropy).map_err(LedgerError::Config)?;
            if !self.codes.contains_key(&code) {
                return Ok(code);
            }
            debug!(user_id = %user_id, code = %code, "generated referral code already taken");
        }
        Err(LedgerError::CodeSpaceExhausted {
            user_id: user_id.clone(),
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    #[must_use]
    pub fn is_valid_code(&self, code: &str) -> bool {
        self.referrer_by_code(code).is_some()
    }

    #[must_use]
    pub fn referrer_by_code(&self, code: &str) -> Option<&UserId> {
        let code = ReferralCode::parse(code).ok()?;
        self.codes.get(&code)
    }

    /// Records that `referred_user_id` signed up with `code`.
    ///
    /// Returns `false` with no state change for an unknown code, a
    /// self-referral, a repeated referrer/referred pair, or a referrer that
    /// has reached the program's referral cap.
    pub fn record_referral(&mut self, code: &str, referred_user_id: &UserId) -> Result<bool, LedgerError> {
        Ok(self.try_record_referral(code, referred_user_id)?.is_recorded())
    }

    pub fn try_record_referral(
        &mut self,
        code: &str,
        referred_user_id: &UserId,
    ) -> Result<ReferralOutcome, LedgerError> {
        let (referral_code, referrer_id) = match self.check_referral(code, referred_user_id) {
            Ok(resolved) => resolved,
            Err(rejection) => {
                warn!(
                    code = code,
                    referred_user_id = %referred_user_id,
                    reason = rejection.as_str(),
                    "referral rejected"
                );
                return Ok(ReferralOutcome::Rejected(rejection));
            }
        };

        let now = self.now();
        let mut next = self.state.clone();
        let id = RelationshipId::from_sequence(next.next_sequence);
        next.next_sequence += 1;
        next.relationships.push(ReferralRelationship::pending(
            id,
            referrer_id.clone(),
            referred_user_id.clone(),
            referral_code,
            now,
        ));
        if let Some(referrer) = next.accounts.get_mut(&referrer_id) {
            referrer.note_referral();
        }
        self.commit(next)?;

        debug!(
            relationship = %id,
            referrer_id = %referrer_id,
            referred_user_id = %referred_user_id,
            "referral recorded"
        );
        Ok(ReferralOutcome::Recorded(id))
    }

    fn check_referral(
        &self,
        code: &str,
        referred_user_id: &UserId,
    ) -> Result<(ReferralCode, UserId), ReferralRejection> {
        let referral_code = ReferralCode::parse(code).map_err(|_| ReferralRejection::UnknownCode)?;
        let referrer_id = self
            .codes
            .get(&referral_code)
            .cloned()
            .ok_or(ReferralRejection::UnknownCode)?;
        if &referrer_id == referred_user_id {
            return Err(ReferralRejection::SelfReferral);
        }
        let duplicate = self
            .state
            .relationships
            .iter()
            .any(|r| r.referrer_id == referrer_id && &r.referred_user_id == referred_user_id);
        if duplicate {
            return Err(ReferralRejection::DuplicatePair);
        }
        let at_capacity = self
            .state
            .accounts
            .get(&referrer_id)
            .is_some_and(|a| a.total_referrals >= self.config.max_referrals_per_user);
        if at_capacity {
            return Err(ReferralRejection::ReferrerAtCapacity);
        }
        Ok((referral_code, referrer_id))
    }
}
