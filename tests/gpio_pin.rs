#![allow(missing_docs)]
//! Host-level tests for the pin backends.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use led_matrix_kit::gpio_pin::{FakePin, GpioPin, HalOutputPin, PinMode, PinState};
use led_matrix_kit::sim_clock::{SimClock, SimDelay};

#[test]
fn pin_state_not_flips_level() {
    assert_eq!(!PinState::High, PinState::Low);
    assert_eq!(!PinState::Low, PinState::High);
    assert_eq!(!!PinState::High, PinState::High);
}

#[test]
fn pin_state_bool_conversions() {
    assert_eq!(PinState::from(true), PinState::High);
    assert_eq!(PinState::from(false), PinState::Low);
    assert!(bool::from(PinState::High));
    assert!(PinState::Low.is_low());
    assert_eq!(PinState::default(), PinState::Low);
    assert_eq!(PinMode::default(), PinMode::Input);
}

#[test]
fn fake_pin_never_written_reads_low() {
    let mut pin = FakePin::new();
    assert_eq!(pin.digital_read(), PinState::Low);
    assert!(!pin.is_initialized());
}

#[test]
fn fake_pin_init_is_idempotent() {
    let mut pin = FakePin::new();
    pin.set_mode(PinMode::Output);
    pin.digital_write(PinState::High);

    pin.init();
    pin.init();
    assert!(pin.is_initialized());
    assert_eq!(pin.mode(), PinMode::Input);
    assert_eq!(pin.digital_read(), PinState::Low);
}

#[test]
fn fake_pin_switch_to_output_resets_low() {
    let mut pin = FakePin::new();
    pin.digital_write(PinState::High);
    pin.set_mode(PinMode::Output);
    assert_eq!(pin.mode(), PinMode::Output);
    assert_eq!(pin.digital_read(), PinState::Low);
}

#[test]
fn fake_pin_write_on_input_is_recorded() {
    let mut pin = FakePin::new();
    pin.init();
    pin.digital_write(PinState::High);
    assert_eq!(pin.mode(), PinMode::Input);
    assert_eq!(pin.digital_read(), PinState::High);
    assert_eq!(pin.write_count(), 1);
}

#[test]
fn fake_pin_measures_time_at_each_level() {
    let clock = SimClock::new();
    let mut delay = SimDelay::new(&clock);
    let mut pin = FakePin::with_clock(&clock);
    pin.set_mode(PinMode::Output);

    delay.delay_ns(300);
    pin.digital_write(PinState::High);
    delay.delay_ns(1_000);
    pin.digital_write(PinState::Low);
    delay.delay_ns(200);

    assert_eq!(pin.time_at(PinState::High), 1_000);
    // The running low stretch is included.
    assert_eq!(pin.time_at(PinState::Low), 500);

    pin.reset_timing();
    assert_eq!(pin.time_at(PinState::High), 0);
    assert_eq!(pin.time_at(PinState::Low), 0);
}

#[test]
fn fake_pin_without_clock_reports_no_time() {
    let mut pin = FakePin::new();
    pin.digital_write(PinState::High);
    assert_eq!(pin.time_at(PinState::High), 0);
}

#[test]
fn fake_pin_speaks_embedded_hal() {
    let mut pin = FakePin::new();
    pin.set_high().unwrap();
    assert!(pin.is_set_high().unwrap());
    assert!(InputPin::is_high(&mut pin).unwrap());
    pin.set_low().unwrap();
    assert!(InputPin::is_low(&mut pin).unwrap());
    assert_eq!(pin.write_count(), 2);
}

#[test]
fn hal_output_pin_drops_writes_while_input() {
    let mut pin = HalOutputPin::new(FakePin::new());
    pin.init();
    assert_eq!(pin.mode(), PinMode::Input);
    pin.digital_write(PinState::High);
    assert_eq!(pin.digital_read(), PinState::Low);

    pin.set_mode(PinMode::Output);
    pin.digital_write(PinState::High);
    assert_eq!(pin.digital_read(), PinState::High);

    pin.set_mode(PinMode::Output);
    assert_eq!(pin.digital_read(), PinState::Low);
    assert_eq!(pin.into_inner().state(), PinState::Low);
}

#[test]
fn mutable_reference_is_a_pin() {
    fn drive_high(mut pin: impl GpioPin) {
        pin.set_mode(PinMode::Output);
        pin.digital_write(PinState::High);
    }

    let mut pin = FakePin::new();
    drive_high(&mut pin);
    assert_eq!(pin.state(), PinState::High);
}
