use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const USER_ID_MAX_LEN: usize = 128;
pub const CODE_MAX_LEN: usize = 20;

/// Opaque user identifier issued by the authentication backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Rejects empty ids, ids longer than [`USER_ID_MAX_LEN`], and any
    /// whitespace or control characters. No hidden trimming is applied.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("user id must not be empty".to_string()));
        }
        if input.len() > USER_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "user id exceeds max length {USER_ID_MAX_LEN}"
            )));
        }
        if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError(
                "user id must not contain whitespace or control characters".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Shareable referral code: upper-case ASCII letters and digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("referral code must not be empty".to_string()));
        }
        if input.len() > CODE_MAX_LEN {
            return Err(ValidationError(format!(
                "referral code exceeds max length {CODE_MAX_LEN}"
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError(
                "referral code must match [A-Z0-9]+".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ReferralCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ReferralCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReferralCode> for String {
    fn from(value: ReferralCode) -> Self {
        value.0
    }
}

/// Ledger-assigned relationship id, `rec_<sequence>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationshipId(u64);

impl RelationshipId {
    const PREFIX: &'static str = "rec_";

    #[must_use]
    pub const fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let digits = input.strip_prefix(Self::PREFIX).ok_or_else(|| {
            ValidationError(format!("relationship id must start with `{}`", Self::PREFIX))
        })?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError(
                "relationship id must end with a decimal sequence".to_string(),
            ));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ValidationError(format!("relationship id sequence: {e}")))
    }
}

impl Display for RelationshipId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl TryFrom<String> for RelationshipId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RelationshipId> for String {
    fn from(value: RelationshipId) -> Self {
        value.to_string()
    }
}
