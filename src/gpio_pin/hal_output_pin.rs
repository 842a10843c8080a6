use core::convert::Infallible;

use embedded_hal::digital::StatefulOutputPin;

use super::{GpioPin, PinMode, PinState};

/// Adapts any infallible `embedded-hal` output pin to [`GpioPin`].
///
/// Output-only hardware cannot really become an input, so the adapter tracks
/// the requested mode itself: while in [`PinMode::Input`] writes are dropped
/// and the line is held low.
///
/// ```rust
/// use embedded_hal::digital::StatefulOutputPin;
/// use led_matrix_kit::gpio_pin::{FakePin, GpioPin, HalOutputPin, PinMode, PinState};
///
/// let mut pin = HalOutputPin::new(FakePin::new());
/// pin.init();
/// pin.digital_write(PinState::High);
/// assert_eq!(pin.digital_read(), PinState::Low);
///
/// pin.set_mode(PinMode::Output);
/// pin.digital_write(PinState::High);
/// assert_eq!(pin.digital_read(), PinState::High);
/// assert!(pin.into_inner().is_set_high().unwrap());
/// ```
#[derive(Debug)]
pub struct HalOutputPin<P> {
    pin: P,
    mode: PinMode,
}

impl<P> HalOutputPin<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    /// Wrap `pin`. The adapter starts in [`PinMode::Input`].
    #[must_use]
    pub const fn new(pin: P) -> Self {
        Self {
            pin,
            mode: PinMode::Input,
        }
    }

    /// Current requested direction.
    #[must_use]
    pub const fn mode(&self) -> PinMode {
        self.mode
    }

    /// Give back the wrapped pin.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> GpioPin for HalOutputPin<P>
where
    P: StatefulOutputPin<Error = Infallible>,
{
    fn init(&mut self) {
        let Ok(()) = self.pin.set_low();
        self.mode = PinMode::Input;
    }

    fn set_mode(&mut self, mode: PinMode) {
        if mode == PinMode::Output {
            let Ok(()) = self.pin.set_low();
        }
        self.mode = mode;
    }

    fn digital_write(&mut self, state: PinState) {
        if self.mode == PinMode::Input {
            return;
        }
        let Ok(()) = match state {
            PinState::High => self.pin.set_high(),
            PinState::Low => self.pin.set_low(),
        };
    }

    fn digital_read(&mut self) -> PinState {
        let Ok(high) = self.pin.is_set_high();
        PinState::from(high)
    }
}
