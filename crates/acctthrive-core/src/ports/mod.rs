use std::time::SystemTime;

/// Source of wall-clock time for timestamps and code generation.
pub trait ClockPort {
    fn now(&self) -> SystemTime;
}

/// Source of randomness for best-effort-unique identifiers.
pub trait EntropyPort {
    fn next_u32(&mut self) -> u32;
}

impl<T: ClockPort + ?Sized> ClockPort for &T {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

impl<T: EntropyPort + ?Sized> EntropyPort for Box<T> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
