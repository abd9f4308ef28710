use acctthrive_core::{ClockPort, EntropyPort};
use std::cell::Cell;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Entropy drawn from random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidEntropy;

impl EntropyPort for UuidEntropy {
    fn next_u32(&mut self) -> u32 {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<u64>,
}

impl ManualClock {
    #[must_use]
    pub fn at_millis(millis: u64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub fn advance_millis(&self, delta: u64) {
        self.millis.set(self.millis.get().saturating_add(delta));
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.millis.get())
    }
}

/// Deterministic entropy: yields `start`, `start + 1`, ...
#[derive(Debug, Clone, Default)]
pub struct CountingEntropy {
    next: u32,
}

impl CountingEntropy {
    #[must_use]
    pub const fn starting_at(start: u32) -> Self {
        Self { next: start }
    }
}

impl EntropyPort for CountingEntropy {
    fn next_u32(&mut self) -> u32 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}
