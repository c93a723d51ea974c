use std::{
    sync::atomic::{AtomicI64, Ordering},
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::types::{EpochMs, FreqHz};

/// Frequency-derived band and mode lookups supplied by the host.
pub trait FrequencyLookup {
    /// Band label for `freq_hz`, e.g. `"20m"`.
    fn band_for(&self, freq_hz: FreqHz) -> Option<String>;
    /// Conventional mode for `freq_hz` within its band plan, e.g. `"CW"`.
    fn mode_for(&self, freq_hz: FreqHz) -> Option<String>;
}

/// Adapts a pair of closures into a [`FrequencyLookup`].
pub struct FnLookup<B, M> {
    band: B,
    mode: M,
}

impl<B, M> FnLookup<B, M>
where
    B: Fn(FreqHz) -> Option<String>,
    M: Fn(FreqHz) -> Option<String>,
{
    /// Wraps a band closure and a mode closure.
    pub fn new(band: B, mode: M) -> Self {
        Self { band, mode }
    }
}

impl<B, M> FrequencyLookup for FnLookup<B, M>
where
    B: Fn(FreqHz) -> Option<String>,
    M: Fn(FreqHz) -> Option<String>,
{
    fn band_for(&self, freq_hz: FreqHz) -> Option<String> {
        (self.band)(freq_hz)
    }

    fn mode_for(&self, freq_hz: FreqHz) -> Option<String> {
        (self.mode)(freq_hz)
    }
}

/// Source of the current instant.
pub trait Clock {
    /// Milliseconds since epoch.
    fn now_ms(&self) -> EpochMs;
}

/// Wall clock that never returns the same instant twice.
///
/// A read landing in the last issued millisecond waits for the next one, so
/// instants are never later than the wall clock. If the wall clock steps
/// backwards the earlier reading is followed as-is.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicI64,
}

impl SystemClock {
    /// Clock that has not issued any instant yet.
    pub fn new() -> Self {
        Self::default()
    }
}

fn wall_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as EpochMs)
        .unwrap_or(0)
}

impl Clock for SystemClock {
    fn now_ms(&self) -> EpochMs {
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let wall = wall_ms();
            if wall == prev {
                // Same millisecond as the last issued instant.
                std::hint::spin_loop();
                thread::yield_now();
                prev = self.last.load(Ordering::Acquire);
                continue;
            }
            match self
                .last
                .compare_exchange_weak(prev, wall, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return wall,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub EpochMs);

impl Clock for FixedClock {
    fn now_ms(&self) -> EpochMs {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> EpochMs {
        (**self).now_ms()
    }
}

impl<L: FrequencyLookup + ?Sized> FrequencyLookup for &L {
    fn band_for(&self, freq_hz: FreqHz) -> Option<String> {
        (**self).band_for(freq_hz)
    }

    fn mode_for(&self, freq_hz: FreqHz) -> Option<String> {
        (**self).mode_for(freq_hz)
    }
}
