//! A capability abstraction over a single digital I/O line.
//!
//! See [`GpioPin`] for the contract shared by every backend.
//!
//! Backends:
//!
//! - `HardwarePin`: a Pico GPIO line (`pico1`/`pico2` features).
//! - [`FakePin`]: in-memory, records what was written, for tests.
//! - [`HalOutputPin`]: wraps any infallible `embedded-hal` output pin.

use core::ops::Not;

mod fake_pin;
mod hal_output_pin;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod hardware_pin;

pub use fake_pin::FakePin;
pub use hal_output_pin::HalOutputPin;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use hardware_pin::HardwarePin;

// ============================================================================
// PinMode / PinState
// ============================================================================

/// Direction of a digital line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// The line is sensed, not driven. This is the safe power-on mode.
    #[default]
    Input,
    /// The line is driven to the written [`PinState`].
    Output,
}

/// Electrical level of a digital line.
///
/// `!state` gives the opposite level. The display engine uses this to derive
/// the "off" level from the "on" level of each wiring polarity.
///
/// ```rust
/// use led_matrix_kit::gpio_pin::PinState;
///
/// assert_eq!(!PinState::High, PinState::Low);
/// assert_eq!(!PinState::Low, PinState::High);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Logic 0. Also the defined value of a pin that was never written.
    #[default]
    Low,
    /// Logic 1.
    High,
}

impl PinState {
    /// Returns `true` for [`PinState::High`].
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Returns `true` for [`PinState::Low`].
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl Not for PinState {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
        }
    }
}

impl From<bool> for PinState {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<PinState> for bool {
    fn from(state: PinState) -> Self {
        state.is_high()
    }
}

// ============================================================================
// GpioPin trait
// ============================================================================

/// The operations the display engine needs from one digital line.
///
/// Implementations must keep these guarantees:
///
/// - [`init`](Self::init) is idempotent and leaves the line in
///   [`PinMode::Input`] at [`PinState::Low`].
/// - Switching to [`PinMode::Output`] with [`set_mode`](Self::set_mode) resets
///   the level to [`PinState::Low`] before the line is driven.
/// - [`digital_write`](Self::digital_write) on an input line must not fault.
/// - [`digital_read`](Self::digital_read) on a line that was never written
///   returns [`PinState::Low`].
///
/// The engine is generic over this trait and never depends on which backend
/// it holds.
pub trait GpioPin {
    /// Prepares the underlying line and sets the safe default (input, low).
    fn init(&mut self);

    /// Reconfigures the direction of the line.
    fn set_mode(&mut self, mode: PinMode);

    /// Drives the line to `state`.
    fn digital_write(&mut self, state: PinState);

    /// Returns the current sensed (or stored) level.
    fn digital_read(&mut self) -> PinState;
}

impl<P: GpioPin + ?Sized> GpioPin for &mut P {
    #[inline]
    fn init(&mut self) {
        (**self).init();
    }

    #[inline]
    fn set_mode(&mut self, mode: PinMode) {
        (**self).set_mode(mode);
    }

    #[inline]
    fn digital_write(&mut self, state: PinState) {
        (**self).digital_write(state);
    }

    #[inline]
    fn digital_read(&mut self) -> PinState {
        (**self).digital_read()
    }
}
