use acctthrive_model::LedgerState;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Validation,
    Conflict,
    Io,
    Decode,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Io => "io_error",
            Self::Decode => "decode_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Storage port for the ledger snapshot.
///
/// `load` on a store that has never been saved returns an empty
/// [`LedgerState`]. `save` replaces the whole snapshot.
pub trait LedgerStore {
    fn load(&self) -> Result<LedgerState, StoreError>;
    fn save(&self, state: &LedgerState) -> Result<(), StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for &T {
    fn load(&self) -> Result<LedgerState, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}

impl<T: LedgerStore + ?Sized> LedgerStore for Box<T> {
    fn load(&self) -> Result<LedgerState, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}
