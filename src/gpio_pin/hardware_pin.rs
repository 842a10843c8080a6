use embassy_rp::Peri;
use embassy_rp::gpio::{Flex, Pull};

use super::{GpioPin, PinMode, PinState};
use crate::fmt::trace;

/// A [`GpioPin`] backed by one physical Pico GPIO line.
///
/// The line is taken as an embassy `Flex` so it can switch direction at run
/// time. In [`PinMode::Input`] the internal pull-down is enabled, which makes a
/// floating line read [`PinState::Low`].
///
/// **Pico 2 note**: the RP2350 pull-down erratum (E9) can leave an input line
/// reading high after it was driven high. Display lines are outputs, so this
/// only matters if you read a line back while it is an input.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use led_matrix_kit::gpio_pin::{GpioPin, HardwarePin, PinMode, PinState};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// fn example(p: embassy_rp::Peripherals) {
///     let mut pin = HardwarePin::new(p.PIN_2);
///     pin.init();
///     pin.set_mode(PinMode::Output);
///     pin.digital_write(PinState::High);
/// }
/// ```
pub struct HardwarePin<'d> {
    flex: Flex<'d>,
    pin_number: u8,
    mode: PinMode,
}

impl<'d> HardwarePin<'d> {
    /// Take ownership of a GPIO peripheral.
    ///
    /// The line is left untouched until [`GpioPin::init`] runs.
    #[must_use]
    pub fn new<P: embassy_rp::gpio::Pin>(pin: Peri<'d, P>) -> Self {
        let pin_number = pin.pin();
        Self {
            flex: Flex::new(pin),
            pin_number,
            mode: PinMode::Input,
        }
    }

    /// GPIO number of the underlying line.
    #[must_use]
    pub const fn pin_number(&self) -> u8 {
        self.pin_number
    }

    fn enter_input(&mut self) {
        self.flex.set_pull(Pull::Down);
        self.flex.set_as_input();
        self.mode = PinMode::Input;
    }

    fn enter_output(&mut self) {
        // Latch low first so the line never glitches high.
        self.flex.set_low();
        self.flex.set_as_output();
        self.mode = PinMode::Output;
    }
}

impl GpioPin for HardwarePin<'_> {
    fn init(&mut self) {
        trace!("gpio {} init", self.pin_number);
        self.flex.set_low();
        self.enter_input();
    }

    fn set_mode(&mut self, mode: PinMode) {
        match mode {
            PinMode::Input => self.enter_input(),
            PinMode::Output => self.enter_output(),
        }
    }

    fn digital_write(&mut self, state: PinState) {
        // On an input line this only updates the output latch.
        match state {
            PinState::High => self.flex.set_high(),
            PinState::Low => self.flex.set_low(),
        }
    }

    fn digital_read(&mut self) -> PinState {
        match self.mode {
            PinMode::Input => PinState::from(self.flex.is_high()),
            PinMode::Output => PinState::from(self.flex.is_set_high()),
        }
    }
}
