use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use super::{GpioPin, PinMode, PinState};
use crate::sim_clock::SimClock;

/// An in-memory [`GpioPin`] with no physical identity.
///
/// Every operation only touches local state, and
/// [`digital_read`](GpioPin::digital_read) returns the last written level.
/// Writes are recorded even while the pin is in [`PinMode::Input`] so tests
/// can assert on them.
///
/// When created with [`FakePin::with_clock`], the pin also accumulates how
/// many virtual nanoseconds it spent at each level.
///
/// ```rust
/// use led_matrix_kit::gpio_pin::{FakePin, GpioPin, PinMode, PinState};
///
/// let mut pin = FakePin::new();
/// pin.init();
/// assert_eq!(pin.mode(), PinMode::Input);
/// assert_eq!(pin.digital_read(), PinState::Low);
///
/// pin.set_mode(PinMode::Output);
/// pin.digital_write(PinState::High);
/// assert_eq!(pin.digital_read(), PinState::High);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FakePin<'a> {
    mode: PinMode,
    state: PinState,
    initialized: bool,
    write_count: u32,
    clock: Option<&'a SimClock>,
    last_change_ns: u64,
    low_ns: u64,
    high_ns: u64,
}

impl<'a> FakePin<'a> {
    /// Create a pin in input mode at the low level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: PinMode::Input,
            state: PinState::Low,
            initialized: false,
            write_count: 0,
            clock: None,
            last_change_ns: 0,
            low_ns: 0,
            high_ns: 0,
        }
    }

    /// Create a pin that measures time at each level against `clock`.
    #[must_use]
    pub fn with_clock(clock: &'a SimClock) -> Self {
        Self {
            clock: Some(clock),
            last_change_ns: clock.now_ns(),
            ..Self::new()
        }
    }

    /// Current direction.
    #[must_use]
    pub const fn mode(&self) -> PinMode {
        self.mode
    }

    /// Last written level, without going through the trait.
    #[must_use]
    pub const fn state(&self) -> PinState {
        self.state
    }

    /// Whether [`GpioPin::init`] has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of [`GpioPin::digital_write`] calls seen.
    #[must_use]
    pub const fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Virtual nanoseconds spent at `state`, including the current stretch.
    ///
    /// Always zero for a pin created without a clock.
    #[must_use]
    pub fn time_at(&self, state: PinState) -> u64 {
        let settled = match state {
            PinState::Low => self.low_ns,
            PinState::High => self.high_ns,
        };
        if self.state == state {
            settled.saturating_add(self.running_ns())
        } else {
            settled
        }
    }

    /// Forget the accumulated level times, keeping mode and state.
    pub fn reset_timing(&mut self) {
        self.low_ns = 0;
        self.high_ns = 0;
        self.last_change_ns = self.clock.map_or(0, SimClock::now_ns);
    }

    fn running_ns(&self) -> u64 {
        self.clock
            .map_or(0, |clock| clock.now_ns().saturating_sub(self.last_change_ns))
    }

    fn change_state(&mut self, state: PinState) {
        let running_ns = self.running_ns();
        match self.state {
            PinState::Low => self.low_ns = self.low_ns.saturating_add(running_ns),
            PinState::High => self.high_ns = self.high_ns.saturating_add(running_ns),
        }
        self.last_change_ns = self.clock.map_or(0, SimClock::now_ns);
        self.state = state;
    }
}

impl GpioPin for FakePin<'_> {
    fn init(&mut self) {
        self.initialized = true;
        self.mode = PinMode::Input;
        self.change_state(PinState::Low);
    }

    fn set_mode(&mut self, mode: PinMode) {
        self.mode = mode;
        if mode == PinMode::Output {
            self.change_state(PinState::Low);
        }
    }

    fn digital_write(&mut self, state: PinState) {
        self.write_count = self.write_count.saturating_add(1);
        self.change_state(state);
    }

    fn digital_read(&mut self) -> PinState {
        self.state
    }
}

// The fake also speaks embedded-hal, so it can stand in for HAL pins in other drivers.

impl ErrorType for FakePin<'_> {
    type Error = Infallible;
}

impl OutputPin for FakePin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.digital_write(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.digital_write(PinState::High);
        Ok(())
    }
}

impl StatefulOutputPin for FakePin<'_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state.is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state.is_low())
    }
}

impl InputPin for FakePin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state.is_low())
    }
}
