use crate::ids::{ReferralCode, UserId, ValidationError};
use crate::referral::{ReferralAccount, ReferralRelationship, ReferralStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Serializable snapshot of the whole referral ledger.
///
/// Relationships are kept in insertion order; the code index is not stored
/// and is rebuilt from `accounts` with [`LedgerState::code_index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerState {
    pub schema_version: u32,
    pub next_sequence: u64,
    #[serde(default)]
    pub accounts: BTreeMap<UserId, ReferralAccount>,
    #[serde(default)]
    pub relationships: Vec<ReferralRelationship>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            schema_version: LEDGER_SCHEMA_VERSION,
            next_sequence: 1,
            accounts: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }
}

impl LedgerState {
    #[must_use]
    pub fn code_index(&self) -> BTreeMap<ReferralCode, UserId> {
        self.accounts
            .values()
            .map(|account| (account.code.clone(), account.user_id.clone()))
            .collect()
    }

    /// Checks the structural invariants a loaded snapshot must satisfy
    /// before the ledger will operate on it.
    pub fn validate_strict(&self) -> Result<(), ValidationError> {
        if self.schema_version != LEDGER_SCHEMA_VERSION {
            return Err(ValidationError(format!(
                "unsupported ledger schema_version {} (expected {LEDGER_SCHEMA_VERSION})",
                self.schema_version
            )));
        }

        let mut codes = BTreeSet::new();
        for (key, account) in &self.accounts {
            if key != &account.user_id {
                return Err(ValidationError(format!(
                    "account key {key} does not match user_id {}",
                    account.user_id
                )));
            }
            if !codes.insert(&account.code) {
                return Err(ValidationError(format!(
                    "referral code {} is assigned to more than one account",
                    account.code
                )));
            }
        }

        let mut pairs = BTreeSet::new();
        let mut last_sequence = 0_u64;
        for rel in &self.relationships {
            let sequence = rel.id.sequence();
            if sequence <= last_sequence {
                return Err(ValidationError(format!(
                    "relationship {} is out of insertion order",
                    rel.id
                )));
            }
            last_sequence = sequence;
            if rel.referrer_id == rel.referred_user_id {
                return Err(ValidationError(format!(
                    "relationship {} is a self-referral",
                    rel.id
                )));
            }
            if !self.accounts.contains_key(&rel.referrer_id) {
                return Err(ValidationError(format!(
                    "relationship {} references unknown referrer {}",
                    rel.id, rel.referrer_id
                )));
            }
            if !pairs.insert((&rel.referrer_id, &rel.referred_user_id)) {
                return Err(ValidationError(format!(
                    "duplicate referral pair {} -> {}",
                    rel.referrer_id, rel.referred_user_id
                )));
            }
            let pending = rel.status == ReferralStatus::Pending;
            if pending != rel.qualified_at.is_none() {
                return Err(ValidationError(format!(
                    "relationship {} has qualified_at inconsistent with status {}",
                    rel.id,
                    rel.status.as_str()
                )));
            }
            if pending && !rel.reward_amount.is_zero() {
                return Err(ValidationError(format!(
                    "pending relationship {} must not carry a reward",
                    rel.id
                )));
            }
        }
        if self.next_sequence <= last_sequence {
            return Err(ValidationError(format!(
                "next_sequence {} must exceed last relationship sequence {last_sequence}",
                self.next_sequence
            )));
        }
        Ok(())
    }
}
