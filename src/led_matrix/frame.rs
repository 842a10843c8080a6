use core::convert::Infallible;
use core::ops::{Index, IndexMut};
use core::str::FromStr;

use embedded_graphics::{
    pixelcolor::{Gray8, GrayColor},
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};

use crate::{Error, Result};

/// One brightness byte per LED of a `COLS x ROWS` matrix.
///
/// Stored row-major: `frame.0[y][x]` is the pixel in column `x` of row `y`,
/// and `frame[(x, y)]` indexes the same pixel. `(0, 0)` is the top-left LED.
///
/// The signed drawing operations ([`set_pixel`](Self::set_pixel),
/// [`draw_line`](Self::draw_line), [`draw_circle`](Self::draw_circle)) accept
/// any coordinates and silently drop the parts that fall outside the matrix.
///
/// `Frame` also implements the [`embedded-graphics`](https://docs.rs/embedded-graphics)
/// [`DrawTarget`] trait with [`Gray8`] pixels, so text and shapes from that
/// ecosystem can be drawn into it.
///
/// # Example
///
/// ```rust
/// use led_matrix_kit::led_matrix::Frame;
///
/// let mut frame = Frame::<8, 8>::new();
/// frame.draw_line(0, 0, 7, 7, 255);
/// frame.set_pixel(-3, 20, 255); // clipped
///
/// assert_eq!(frame[(3, 3)], 255);
/// assert_eq!(frame.get(4, 3), Some(0));
/// assert_eq!(frame.get(8, 0), None);
/// ```
///
/// Frames can also be written as text, one line per row:
///
/// ```rust
/// use led_matrix_kit::led_matrix::Frame;
///
/// let frame: Frame<3, 2> = "#.5\n..#".parse()?;
/// assert_eq!(frame.0, [[255, 0, 141], [0, 0, 255]]);
/// # Ok::<(), led_matrix_kit::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Frame<const COLS: usize, const ROWS: usize>(pub [[u8; COLS]; ROWS]);

impl<const COLS: usize, const ROWS: usize> Frame<COLS, ROWS> {
    /// Frame width in pixels (columns).
    pub const WIDTH: usize = COLS;
    /// Frame height in pixels (rows).
    pub const HEIGHT: usize = ROWS;
    /// Frame dimensions as a [`Size`].
    #[allow(clippy::cast_possible_truncation, reason = "matrix dimensions fit in u32")]
    pub const SIZE: Size = Size::new(COLS as u32, ROWS as u32);

    /// Create a blank (all off) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[0; COLS]; ROWS])
    }

    /// Create a frame with every pixel at `value`.
    #[must_use]
    pub const fn filled(value: u8) -> Self {
        Self([[value; COLS]; ROWS])
    }

    /// Brightness at `(x, y)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.0.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Set one pixel. Coordinates outside the matrix are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) {
        let (Ok(x_index), Ok(y_index)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if let Some(pixel) = self
            .0
            .get_mut(y_index)
            .and_then(|row| row.get_mut(x_index))
        {
            *pixel = value;
        }
    }

    /// Set every pixel to 0.
    pub fn clear(&mut self) {
        self.0 = [[0; COLS]; ROWS];
    }

    /// Replace every pixel `v` with `255 - v`.
    pub fn invert(&mut self) {
        for pixel in self.0.iter_mut().flatten() {
            *pixel = u8::MAX - *pixel;
        }
    }

    /// Returns `true` when every pixel is 0.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.iter().flatten().all(|&pixel| pixel == 0)
    }

    /// Draw a straight line from `(x0, y0)` to `(x1, y1)`, both ends included.
    ///
    /// Uses Bresenham's integer algorithm, so a line with equal x and y extent
    /// is a perfect diagonal. Points outside the matrix are clipped one by one.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, value: u8) {
        let (x_end, y_end) = (i64::from(x1), i64::from(y1));
        let (mut x, mut y) = (i64::from(x0), i64::from(y0));
        let dx = (x_end - x).abs();
        let dy = (y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.plot(x, y, value);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw the outline of a circle centred on `(x0, y0)`.
    ///
    /// Uses the midpoint algorithm: one octant is walked and mirrored eight
    /// ways, so the result is symmetric about both axes and both diagonals of
    /// the centre. A radius of 0 lights only the centre; a negative radius
    /// draws nothing.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32, value: u8) {
        let (cx, cy) = (i64::from(x0), i64::from(y0));
        let mut x = i64::from(radius);
        let mut y = 0_i64;
        let mut decision = 1 - x;

        while x >= y {
            for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)]
            {
                self.plot(cx + dx, cy + dy, value);
            }
            y += 1;
            if decision <= 0 {
                decision += 2 * y + 1;
            } else {
                x -= 1;
                decision += 2 * (y - x) + 1;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, value: u8) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(x, y, value);
        }
    }
}

impl<const COLS: usize, const ROWS: usize> Default for Frame<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> Index<(usize, usize)> for Frame<COLS, ROWS> {
    type Output = u8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < COLS, "x_index must be within width");
        assert!(y_index < ROWS, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const COLS: usize, const ROWS: usize> IndexMut<(usize, usize)> for Frame<COLS, ROWS> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < COLS, "x_index must be within width");
        assert!(y_index < ROWS, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const COLS: usize, const ROWS: usize> From<[[u8; COLS]; ROWS]> for Frame<COLS, ROWS> {
    fn from(array: [[u8; COLS]; ROWS]) -> Self {
        Self(array)
    }
}

impl<const COLS: usize, const ROWS: usize> From<Frame<COLS, ROWS>> for [[u8; COLS]; ROWS] {
    fn from(frame: Frame<COLS, ROWS>) -> Self {
        frame.0
    }
}

impl<const COLS: usize, const ROWS: usize> OriginDimensions for Frame<COLS, ROWS> {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl<const COLS: usize, const ROWS: usize> DrawTarget for Frame<COLS, ROWS> {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.luma());
        }
        Ok(())
    }
}

impl<const COLS: usize, const ROWS: usize> FromStr for Frame<COLS, ROWS> {
    type Err = Error;

    /// Parse one text line per row.
    ///
    /// `.` and space are off, `#` is full brightness, and a digit `d` is
    /// `d * 255 / 9`. Short lines and missing rows are padded with 0.
    fn from_str(text: &str) -> Result<Self> {
        let mut frame = Self::new();
        for (y_index, line) in text.lines().enumerate() {
            let row = frame.0.get_mut(y_index).ok_or(Error::FrameTooTall)?;
            for (x_index, glyph) in line.chars().enumerate() {
                let pixel = row.get_mut(x_index).ok_or(Error::FrameTooWide)?;
                *pixel = glyph_brightness(glyph)?;
            }
        }
        Ok(frame)
    }
}

fn glyph_brightness(glyph: char) -> Result<u8> {
    match glyph {
        '.' | ' ' => Ok(0),
        '#' => Ok(u8::MAX),
        '0'..='9' => {
            let digit = glyph.to_digit(10).ok_or(Error::UnknownGlyph(glyph))?;
            // digit <= 9, so the result is at most 255.
            u8::try_from(digit * 255 / 9).map_err(|_| Error::UnknownGlyph(glyph))
        }
        _ => Err(Error::UnknownGlyph(glyph)),
    }
}
