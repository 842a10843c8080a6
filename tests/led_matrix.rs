#![allow(missing_docs)]
//! Host-level tests for the display engine, timed on a virtual clock.

use embedded_graphics::{pixelcolor::Gray8, prelude::*};
use led_matrix_kit::gpio_pin::{FakePin, GpioPin, HalOutputPin, PinMode, PinState};
use led_matrix_kit::led_matrix::{
    DEFAULT_PULSE_UNIT_NS, Frame, Gamma, LedMatrix, MatrixConfig, gamma_correct,
};
use led_matrix_kit::sim_clock::{SimClock, SimDelay};

type SimMatrix<'a, const COLS: usize, const ROWS: usize> =
    LedMatrix<FakePin<'a>, SimDelay<'a>, COLS, ROWS>;

fn sim_matrix<const COLS: usize, const ROWS: usize>(
    clock: &SimClock,
    config: MatrixConfig,
) -> SimMatrix<'_, COLS, ROWS> {
    LedMatrix::new(
        core::array::from_fn(|_| FakePin::with_clock(clock)),
        core::array::from_fn(|_| FakePin::with_clock(clock)),
        SimDelay::new(clock),
        config,
    )
}

fn all_pins_at<const COLS: usize, const ROWS: usize>(
    matrix: &SimMatrix<'_, COLS, ROWS>,
    col_level: PinState,
    row_level: PinState,
) -> bool {
    matrix.col_pins().iter().all(|pin| pin.state() == col_level)
        && matrix.row_pins().iter().all(|pin| pin.state() == row_level)
}

#[test]
fn initialize_sets_outputs_at_idle_levels() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<4, 3>(&clock, MatrixConfig::default());
    matrix.set_pixel(1, 1, 255);
    matrix.initialize();

    for pin in matrix.col_pins().iter().chain(matrix.row_pins()) {
        assert!(pin.is_initialized());
        assert_eq!(pin.mode(), PinMode::Output);
    }
    assert!(all_pins_at(&matrix, PinState::Low, PinState::Low));
    assert!(matrix.frame().is_blank());
    // The refresh of a blank frame takes no time.
    assert_eq!(clock.now_ns(), 0);
}

#[test]
fn initialize_honors_active_low_wiring() {
    let clock = SimClock::new();
    let config = MatrixConfig::new(PinState::Low, PinState::High);
    let mut matrix = sim_matrix::<3, 3>(&clock, config);
    matrix.initialize();
    assert!(all_pins_at(&matrix, PinState::High, PinState::Low));

    matrix.set_pixel(2, 0, 255);
    matrix.update();
    assert!(all_pins_at(&matrix, PinState::High, PinState::Low));
    let hold = 255 * u64::from(DEFAULT_PULSE_UNIT_NS);
    assert_eq!(matrix.col_pins()[2].time_at(PinState::Low), hold);
    assert_eq!(matrix.row_pins()[0].time_at(PinState::High), hold);
    assert_eq!(matrix.row_pins()[1].time_at(PinState::High), 0);
}

#[test]
fn set_pixel_out_of_range_changes_nothing() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<4, 4>(&clock, MatrixConfig::default());
    matrix.initialize();
    let before = matrix.frame();
    matrix.set_pixel(-1, 0, 255);
    matrix.set_pixel(4, 0, 255);
    matrix.set_pixel(0, 4, 255);
    matrix.set_pixel(0, -9, 255);
    assert_eq!(matrix.frame(), before);
    assert_eq!(matrix.pixel(4, 0), None);
}

#[test]
fn frame_snapshot_is_independent() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<4, 4>(&clock, MatrixConfig::default());
    matrix.set_pixel(1, 2, 99);
    let snapshot = matrix.frame();
    matrix.clear();
    assert_eq!(snapshot.get(1, 2), Some(99));
    assert_eq!(matrix.pixel(1, 2), Some(0));
}

#[test]
fn clone_frame_replaces_prior_contents() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<4, 3>(&clock, MatrixConfig::default());
    matrix.draw_line(0, 0, 3, 2, 9);
    matrix.set_pixel(3, 0, 250);

    let mut source = Frame::<4, 3>::new();
    for (y_index, row) in source.0.iter_mut().enumerate() {
        for (x_index, value) in row.iter_mut().enumerate() {
            *value = u8::try_from(y_index * 4 + x_index).unwrap() * 10;
        }
    }
    matrix.clone_frame(source);

    for y_index in 0..3 {
        for x_index in 0..4 {
            assert_eq!(
                matrix.pixel(x_index, y_index),
                source.get(x_index, y_index),
                "mismatch at ({x_index}, {y_index})"
            );
        }
    }

    // The matrix holds its own copy.
    source.clear();
    assert_eq!(matrix.pixel(3, 2), Some(110));
}

#[test]
fn clone_frame_accepts_plain_array() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<2, 2>(&clock, MatrixConfig::default());
    matrix.set_pixel(0, 0, 77);
    matrix.clone_frame([[0, 1], [2, 3]]);
    assert_eq!(matrix.frame(), Frame::from([[0, 1], [2, 3]]));
}

#[test]
fn matrix_is_an_embedded_graphics_target() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<4, 4>(&clock, MatrixConfig::default());
    assert_eq!(matrix.size(), Size::new(4, 4));

    for point in [Point::new(2, 1), Point::new(-1, 1), Point::new(4, 4)] {
        Pixel(point, Gray8::new(180)).draw(&mut matrix).unwrap();
    }

    let mut expected = Frame::<4, 4>::new();
    expected.set_pixel(2, 1, 180);
    assert_eq!(matrix.frame(), expected);
}

#[test]
fn invert_frame_twice_is_identity() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<5, 5>(&clock, MatrixConfig::default());
    matrix.draw_line(0, 4, 4, 0, 200);
    let original = matrix.frame();
    matrix.invert_frame();
    assert_eq!(matrix.pixel(0, 4), Some(55));
    assert_eq!(matrix.pixel(0, 0), Some(255));
    matrix.invert_frame();
    assert_eq!(matrix.frame(), original);
}

#[test]
fn update_holds_each_pixel_for_its_corrected_brightness() {
    let clock = SimClock::new();
    let unit = 10;
    let config = MatrixConfig::default().with_pulse_unit_ns(unit);
    let mut matrix = sim_matrix::<3, 2>(&clock, config);
    matrix.initialize();

    let values = [[255, 128, 0], [64, 0, 200]];
    for (y, row) in values.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            matrix.set_pixel(x as i32, y as i32, value);
        }
    }
    matrix.update();

    let hold = |value: u8| u64::from(gamma_correct(value)) * u64::from(unit);
    for x in 0..3 {
        let expected = hold(values[0][x]) + hold(values[1][x]);
        assert_eq!(matrix.col_pins()[x].time_at(PinState::High), expected, "column {x}");
    }
    for (y, row) in values.iter().enumerate() {
        let expected: u64 = row.iter().map(|&value| hold(value)).sum();
        assert_eq!(matrix.row_pins()[y].time_at(PinState::High), expected, "row {y}");
    }
    let total: u64 = values.iter().flatten().map(|&value| hold(value)).sum();
    assert_eq!(clock.now_ns(), total);
    assert!(all_pins_at(&matrix, PinState::Low, PinState::Low));
}

#[test]
fn brighter_pixels_stay_on_longer() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<2, 1>(&clock, MatrixConfig::default());
    matrix.initialize();
    matrix.set_pixel(0, 0, 100);
    matrix.set_pixel(1, 0, 220);
    matrix.update();
    let dim = matrix.col_pins()[0].time_at(PinState::High);
    let bright = matrix.col_pins()[1].time_at(PinState::High);
    assert!(dim > 0);
    assert!(bright > dim);
}

#[test]
fn dark_pixels_are_never_energized() {
    let clock = SimClock::new();
    let mut matrix = sim_matrix::<3, 3>(&clock, MatrixConfig::default());
    matrix.initialize();
    let writes_before: Vec<u32> = matrix.col_pins().iter().map(FakePin::write_count).collect();

    // 20 is lit in the frame but corrects to 0.
    matrix.set_pixel(1, 1, 20);
    matrix.update();
    let writes_after: Vec<u32> = matrix.col_pins().iter().map(FakePin::write_count).collect();
    assert_eq!(writes_before, writes_after);
    assert_eq!(clock.now_ns(), 0);
}

#[test]
fn brightness_cap_shortens_on_time() {
    let clock = SimClock::new();
    let config = MatrixConfig::default()
        .with_gamma(Gamma::Linear)
        .with_max_brightness(51)
        .with_pulse_unit_ns(1);
    let mut matrix = sim_matrix::<1, 1>(&clock, config);
    matrix.initialize();
    assert_eq!(matrix.brightness(255), 51);
    assert_eq!(matrix.brightness(100), 20);

    matrix.set_pixel(0, 0, 255);
    matrix.update();
    assert_eq!(matrix.col_pins()[0].time_at(PinState::High), 51);
}

#[test]
fn repeated_updates_accumulate() {
    let clock = SimClock::new();
    let config = MatrixConfig::default().with_pulse_unit_ns(1);
    let mut matrix = sim_matrix::<2, 2>(&clock, config);
    matrix.initialize();
    matrix.set_pixel(0, 1, 255);
    for _ in 0..3 {
        matrix.update();
    }
    assert_eq!(matrix.col_pins()[0].time_at(PinState::High), 3 * 255);
    assert_eq!(matrix.row_pins()[1].time_at(PinState::High), 3 * 255);
    assert_eq!(matrix.col_pins()[1].time_at(PinState::High), 0);
}

#[test]
fn engine_method_matches_free_gamma_function() {
    let clock = SimClock::new();
    let matrix = sim_matrix::<1, 1>(&clock, MatrixConfig::default());
    for value in [0, 1, 77, 128, 254, 255] {
        assert_eq!(matrix.gamma_correct(value), gamma_correct(value));
    }
}

#[test]
fn engine_drives_embedded_hal_pins() {
    let clock = SimClock::new();
    let mut matrix: LedMatrix<_, _, 2, 2> = LedMatrix::new(
        [HalOutputPin::new(FakePin::new()), HalOutputPin::new(FakePin::new())],
        [HalOutputPin::new(FakePin::new()), HalOutputPin::new(FakePin::new())],
        SimDelay::new(&clock),
        MatrixConfig::default().with_pulse_unit_ns(1),
    );
    matrix.initialize();
    matrix.draw_line(0, 0, 1, 1, 255);
    matrix.update();
    assert_eq!(clock.now_ns(), 2 * 255);

    // Every line: init, switch to output and idle write (3 writes).
    // Columns add an on/off pair for their one lit pixel; rows add a pair per pass.
    let (col_pins, row_pins, _delay) = matrix.release();
    for (mut pin, expected_writes) in col_pins
        .into_iter()
        .map(|pin| (pin, 5))
        .chain(row_pins.into_iter().map(|pin| (pin, 7)))
    {
        assert_eq!(pin.mode(), PinMode::Output);
        assert_eq!(pin.digital_read(), PinState::Low);
        assert_eq!(pin.into_inner().write_count(), expected_writes);
    }
}
