//! A device abstraction for multiplexed row/column LED matrices.
//!
//! See [`LedMatrix`] for the blocking engine and [`Frame`] for the drawing
//! surface. On a Pico, the `device` items (`pico1`/`pico2` features) run the
//! engine as a background task.
//!
//! # How the refresh works
//!
//! Only one row is energized at a time. Within that row each column whose
//! pixel is lit is energized for `brightness_table[value] * pulse_unit_ns`
//! nanoseconds, using a blocking [`DelayNs`] busy wait. Brightness is therefore
//! encoded as on-time, and the gamma curve turns that into perceived
//! brightness. Call [`LedMatrix::update`] over and over, fast enough to beat
//! flicker.
//!
//! # Example
//!
//! ```rust
//! use led_matrix_kit::gpio_pin::{FakePin, PinState};
//! use led_matrix_kit::led_matrix::{LedMatrix, MatrixConfig};
//! use led_matrix_kit::sim_clock::{SimClock, SimDelay};
//!
//! let clock = SimClock::new();
//! let col_pins = core::array::from_fn(|_| FakePin::with_clock(&clock));
//! let row_pins = core::array::from_fn(|_| FakePin::with_clock(&clock));
//! let mut matrix: LedMatrix<_, _, 4, 4> =
//!     LedMatrix::new(col_pins, row_pins, SimDelay::new(&clock), MatrixConfig::default());
//!
//! matrix.initialize();
//! matrix.draw_circle(1, 1, 1, 255);
//! matrix.update();
//!
//! assert_eq!(matrix.pixel(1, 0), Some(255));
//! assert!(matrix.col_pins().iter().all(|pin| pin.state() == PinState::Low));
//! ```

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{Gray8, GrayColor},
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};
use embedded_hal::delay::DelayNs;

use crate::fmt::{debug, info};
use crate::gpio_pin::{GpioPin, PinMode, PinState};

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod device;
mod frame;
mod gamma;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use device::{
    MatrixCommandSignal, MatrixDisplay, MatrixStatic, matrix_device_loop, matrix_device_task,
};
pub use frame::Frame;
pub use gamma::{GAMMA_DEFAULT, Gamma, brightness_table, gamma_correct};

// ============================================================================
// Configuration
// ============================================================================

/// Default on-time, in nanoseconds, per step of corrected brightness.
///
/// A full-brightness pixel is lit for `255 * 500 ns` (about 128 us). An 8x8
/// matrix at full brightness then refreshes at roughly 120 Hz.
pub const DEFAULT_PULSE_UNIT_NS: u32 = 500;

/// Wiring and brightness settings for a [`LedMatrix`].
///
/// `col_active` and `row_active` are the levels that energize a column or a
/// row. The opposite level (`!active`) is the idle level.
///
/// ```rust
/// use led_matrix_kit::gpio_pin::PinState;
/// use led_matrix_kit::led_matrix::{Gamma, MatrixConfig};
///
/// // Common-anode wiring: rows source current, columns sink it.
/// const CONFIG: MatrixConfig = MatrixConfig::new(PinState::Low, PinState::High)
///     .with_gamma(Gamma::Gamma2_2)
///     .with_max_brightness(128);
/// # assert_eq!(CONFIG.max_brightness, 128);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    /// Level that energizes a column line.
    pub col_active: PinState,
    /// Level that energizes a row line.
    pub row_active: PinState,
    /// Brightness curve (default: [`GAMMA_DEFAULT`]).
    pub gamma: Gamma,
    /// Brightness cap applied after the curve. 255 means uncapped.
    pub max_brightness: u8,
    /// Busy-wait nanoseconds per step of corrected brightness.
    pub pulse_unit_ns: u32,
}

impl MatrixConfig {
    /// Create a config for the given wiring polarity, with default brightness.
    #[must_use]
    pub const fn new(col_active: PinState, row_active: PinState) -> Self {
        Self {
            col_active,
            row_active,
            gamma: GAMMA_DEFAULT,
            max_brightness: u8::MAX,
            pulse_unit_ns: DEFAULT_PULSE_UNIT_NS,
        }
    }

    /// Replace the brightness curve.
    #[must_use]
    pub const fn with_gamma(mut self, gamma: Gamma) -> Self {
        self.gamma = gamma;
        self
    }

    /// Replace the brightness cap.
    #[must_use]
    pub const fn with_max_brightness(mut self, max_brightness: u8) -> Self {
        self.max_brightness = max_brightness;
        self
    }

    /// Replace the on-time per brightness step.
    #[must_use]
    pub const fn with_pulse_unit_ns(mut self, pulse_unit_ns: u32) -> Self {
        self.pulse_unit_ns = pulse_unit_ns;
        self
    }
}

impl Default for MatrixConfig {
    /// Both rows and columns energized by driving them high.
    fn default() -> Self {
        Self::new(PinState::High, PinState::High)
    }
}

// ============================================================================
// LedMatrix
// ============================================================================

/// Blocking engine for a `COLS x ROWS` multiplexed LED matrix.
///
/// The engine owns its framebuffer, one pin per column, one pin per row, and
/// a blocking delay. The pin arrays are sized by the const generics, so wiring
/// the wrong number of lines is a compile error. The engine is generic over
/// [`GpioPin`] and works the same with [`HardwarePin`]s on a board and
/// [`FakePin`]s on the host.
///
/// Drawing operations only touch the framebuffer; nothing reaches the LEDs
/// until [`update`](Self::update) runs. The matrix is also an
/// `embedded-graphics` [`DrawTarget`], clipped like [`set_pixel`](Self::set_pixel).
///
/// [`HardwarePin`]: crate::gpio_pin
/// [`FakePin`]: crate::gpio_pin::FakePin
///
/// See the [module docs](mod@crate::led_matrix) for an example.
pub struct LedMatrix<P, D, const COLS: usize, const ROWS: usize> {
    frame: Frame<COLS, ROWS>,
    col_pins: [P; COLS],
    row_pins: [P; ROWS],
    delay: D,
    config: MatrixConfig,
    brightness_table: [u8; 256],
}

impl<P, D, const COLS: usize, const ROWS: usize> LedMatrix<P, D, COLS, ROWS>
where
    P: GpioPin,
    D: DelayNs,
{
    /// Take ownership of the pins and delay. No pin is touched until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(col_pins: [P; COLS], row_pins: [P; ROWS], delay: D, config: MatrixConfig) -> Self {
        Self {
            frame: Frame::new(),
            col_pins,
            row_pins,
            delay,
            config,
            brightness_table: brightness_table(config.gamma, config.max_brightness),
        }
    }

    /// Put every line into output mode at its idle level, clear the frame,
    /// and run one refresh pass.
    pub fn initialize(&mut self) {
        info!("LedMatrix: initializing {}x{} matrix", COLS, ROWS);
        let col_idle = !self.config.col_active;
        let row_idle = !self.config.row_active;
        for pin in &mut self.col_pins {
            prepare_output(pin, col_idle);
        }
        for pin in &mut self.row_pins {
            prepare_output(pin, row_idle);
        }
        self.frame.clear();
        self.update();
    }

    /// Set one pixel. Coordinates outside the matrix are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) {
        self.frame.set_pixel(x, y, value);
    }

    /// Set every pixel to 0. The LEDs change on the next [`update`](Self::update).
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Make the framebuffer an exact copy of `source`, whatever it held before.
    ///
    /// Accepts a [`Frame`] or a plain `[[u8; COLS]; ROWS]` array. The matrix
    /// keeps its own copy, so later changes to `source` do not reach it.
    pub fn clone_frame(&mut self, source: impl Into<Frame<COLS, ROWS>>) {
        self.frame = source.into();
    }

    /// An independent snapshot of the framebuffer.
    #[must_use]
    pub const fn frame(&self) -> Frame<COLS, ROWS> {
        self.frame
    }

    /// Replace every pixel `v` with `255 - v`.
    pub fn invert_frame(&mut self) {
        self.frame.invert();
    }

    /// Gamma-3.0 correction of one value. See [`gamma_correct`].
    #[must_use]
    pub const fn gamma_correct(&self, value: u8) -> u8 {
        gamma_correct(value)
    }

    /// The corrected brightness this matrix actually shows for `value`,
    /// after its configured curve and brightness cap.
    #[must_use]
    pub fn brightness(&self, value: u8) -> u8 {
        self.brightness_table
            .get(usize::from(value))
            .copied()
            .unwrap_or(u8::MAX)
    }

    /// Draw an inclusive line into the framebuffer. See [`Frame::draw_line`].
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: u8) {
        self.frame.draw_line(x0, y0, x1, y1, value);
    }

    /// Draw a circle outline into the framebuffer. See [`Frame::draw_circle`].
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32, value: u8) {
        self.frame.draw_circle(x0, y0, radius, value);
    }

    /// Brightness at `(x, y)`, or `None` outside the matrix.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.frame.get(x, y)
    }

    /// The wiring and brightness settings.
    #[must_use]
    pub const fn config(&self) -> &MatrixConfig {
        &self.config
    }

    /// The column lines, in column order.
    #[must_use]
    pub const fn col_pins(&self) -> &[P; COLS] {
        &self.col_pins
    }

    /// The row lines, in row order.
    #[must_use]
    pub const fn row_pins(&self) -> &[P; ROWS] {
        &self.row_pins
    }

    /// Give back the pins and delay.
    #[must_use]
    pub fn release(self) -> ([P; COLS], [P; ROWS], D) {
        (self.col_pins, self.row_pins, self.delay)
    }

    /// Run one full multiplexed refresh pass. Blocks until it is done.
    ///
    /// Rows are scanned top to bottom. While a row is energized, each column
    /// is energized in turn for its pixel's on-time and then returned to idle.
    /// Pixels whose corrected brightness is 0 are never energized. When the
    /// pass returns, every line is back at its idle level.
    pub fn update(&mut self) {
        let Self {
            frame,
            col_pins,
            row_pins,
            delay,
            config,
            brightness_table,
        } = self;
        let col_idle = !config.col_active;
        let row_idle = !config.row_active;

        for (row, row_pin) in frame.0.iter().zip(row_pins.iter_mut()) {
            row_pin.digital_write(config.row_active);
            for (&value, col_pin) in row.iter().zip(col_pins.iter_mut()) {
                let corrected = brightness_table.get(usize::from(value)).copied().unwrap_or(0);
                let hold_ns = u32::from(corrected).saturating_mul(config.pulse_unit_ns);
                if hold_ns == 0 {
                    continue;
                }
                col_pin.digital_write(config.col_active);
                delay.delay_ns(hold_ns);
                col_pin.digital_write(col_idle);
            }
            row_pin.digital_write(row_idle);
            #[cfg(feature = "display-trace")]
            crate::fmt::trace!(
                "LedMatrix: row done, {} columns lit",
                row.iter().filter(|&&value| value != 0).count()
            );
        }
    }
}

fn prepare_output<P: GpioPin>(pin: &mut P, idle: PinState) {
    pin.init();
    pin.set_mode(PinMode::Output);
    pin.digital_write(idle);
    debug!("LedMatrix: line idle at {}", idle);
}

impl<P, D, const COLS: usize, const ROWS: usize> OriginDimensions for LedMatrix<P, D, COLS, ROWS> {
    fn size(&self) -> Size {
        Frame::<COLS, ROWS>::SIZE
    }
}

impl<P, D, const COLS: usize, const ROWS: usize> DrawTarget for LedMatrix<P, D, COLS, ROWS> {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.frame.set_pixel(x, y, color.luma());
        }
        Ok(())
    }
}
