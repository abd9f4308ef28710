use acctthrive_core::ExitCode;
use acctthrive_model::{UserId, ValidationError};
use acctthrive_store::StoreError;
use std::fmt;

#[derive(Debug)]
#[non_exhaustive]
pub enum LedgerError {
    Store(StoreError),
    Config(ValidationError),
    CodeSpaceExhausted { user_id: UserId, attempts: usize },
}

impl LedgerError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Store(_) => ExitCode::DependencyFailure,
            Self::Config(_) => ExitCode::Validation,
            Self::CodeSpaceExhausted { .. } => ExitCode::Internal,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_error",
            Self::Config(_) => "config_error",
            Self::CodeSpaceExhausted { .. } => "code_space_exhausted",
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "ledger store failure: {err}"),
            Self::Config(err) => write!(f, "invalid referral program config: {err}"),
            Self::CodeSpaceExhausted { user_id, attempts } => write!(
                f,
                "could not draw an unused referral code for {user_id} after {attempts} attempts"
            ),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::CodeSpaceExhausted { .. } => None,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
