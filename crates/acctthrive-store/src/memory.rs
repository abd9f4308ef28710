use crate::backend::{LedgerStore, StoreError, StoreErrorCode};
use acctthrive_model::LedgerState;
use std::sync::Mutex;

/// Process-local store. Holds the last saved snapshot and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    state: Option<LedgerState>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an initial snapshot.
    #[must_use]
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                state: Some(state),
                saves: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> Result<Option<LedgerState>, StoreError> {
        Ok(self.lock()?.state.clone())
    }

    pub fn save_count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.saves)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "memory store lock poisoned"))
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<LedgerState, StoreError> {
        Ok(self.lock()?.state.clone().unwrap_or_default())
    }

    fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}
