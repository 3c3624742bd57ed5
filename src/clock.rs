/// Time sources used by the sensor state machines.
pub trait Clock {
    /// Monotonic milliseconds since boot.
    fn millis(&self) -> u64;

    /// Wall clock, seconds since the Unix epoch.
    fn epoch_seconds(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn millis(&self) -> u64 {
        (**self).millis()
    }

    fn epoch_seconds(&self) -> u32 {
        (**self).epoch_seconds()
    }
}
