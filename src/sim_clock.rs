//! A virtual timeline for exercising the display engine without hardware.
//!
//! [`SimClock`] is a nanosecond counter that only moves when a [`SimDelay`]
//! busy-waits on it. Bind [`FakePin`](crate::gpio_pin::FakePin)s to the same
//! clock and each pin accumulates how long it sat at each level, which is how
//! brightness-to-time encoding is measured on the host.
//!
//! ```rust
//! use embedded_hal::delay::DelayNs;
//! use led_matrix_kit::animation::TickSource;
//! use led_matrix_kit::sim_clock::{SimClock, SimDelay};
//!
//! let clock = SimClock::new();
//! let mut delay = SimDelay::new(&clock);
//! delay.delay_ms(3);
//! assert_eq!(clock.now_ns(), 3_000_000);
//! assert_eq!(clock.now_ms(), 3);
//! ```

use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::animation::TickSource;

/// A monotonic nanosecond counter advanced by [`SimDelay`].
#[derive(Debug, Default)]
pub struct SimClock {
    now_ns: Cell<u64>,
}

impl SimClock {
    /// Create a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now_ns: Cell::new(0),
        }
    }

    /// Current virtual time in nanoseconds.
    #[must_use]
    pub fn now_ns(&self) -> u64 {
        self.now_ns.get()
    }

    /// Move the clock forward. Saturates instead of wrapping.
    pub fn advance_ns(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get().saturating_add(ns));
    }
}

impl TickSource for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ns() / 1_000_000
    }
}

/// A blocking delay that advances a [`SimClock`] instead of spinning.
#[derive(Clone, Copy, Debug)]
pub struct SimDelay<'a> {
    clock: &'a SimClock,
}

impl<'a> SimDelay<'a> {
    /// Create a delay bound to `clock`.
    #[must_use]
    pub const fn new(clock: &'a SimClock) -> Self {
        Self { clock }
    }
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(u64::from(ns));
    }
}
