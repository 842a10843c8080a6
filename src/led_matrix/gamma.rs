//! Brightness curves applied to frame values before they become on-times.
//!
//! LEDs respond linearly to current but eyes do not, so a raw value of 128
//! looks far brighter than half of 255. Each curve is a 256-entry lookup
//! table computed offline as `round(255 * (v / 255) ^ gamma)`, which keeps
//! the refresh loop free of floating point.

// ============================================================================
// Gamma
// ============================================================================

/// Brightness curve used to turn frame values into on-times.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// No correction. Gamma = 1.0
    Linear,
    /// The sRGB-like curve common for LED strips. Gamma = 2.2
    Gamma2_2,
    /// A steeper curve that suits bare multiplexed matrices. Gamma = 3.0
    #[default]
    Gamma3_0,
}

/// Default curve for [`MatrixConfig`](super::MatrixConfig) (`Gamma::Gamma3_0`).
pub const GAMMA_DEFAULT: Gamma = Gamma::Gamma3_0;

impl Gamma {
    /// The 256-entry lookup table for this curve.
    #[must_use]
    pub const fn table(self) -> &'static [u8; 256] {
        match self {
            Self::Linear => &LINEAR_TABLE,
            Self::Gamma2_2 => &GAMMA_2_2_TABLE,
            Self::Gamma3_0 => &GAMMA_3_0_TABLE,
        }
    }
}

/// Gamma 3.0 lookup table: `round(255 * (v / 255) ^ 3)`.
pub(crate) const GAMMA_3_0_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 4, 4,
    4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 8, 9, 9, 9, 10, 10, 10, 11, 11, 12, 12,
    12, 13, 13, 14, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23, 23, 24,
    25, 25, 26, 27, 27, 28, 29, 29, 30, 31, 32, 32, 33, 34, 35, 35, 36, 37, 38, 39, 40, 40, 41, 42,
    43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 60, 61, 62, 63, 64, 65, 67, 68,
    69, 70, 72, 73, 74, 76, 77, 78, 80, 81, 82, 84, 85, 87, 88, 90, 91, 93, 94, 96, 97, 99, 101,
    102, 104, 105, 107, 109, 111, 112, 114, 116, 118, 119, 121, 123, 125, 127, 129, 131, 132, 134,
    136, 138, 140, 142, 144, 147, 149, 151, 153, 155, 157, 159, 162, 164, 166, 168, 171, 173, 175,
    178, 180, 182, 185, 187, 190, 192, 195, 197, 200, 202, 205, 207, 210, 213, 215, 218, 221, 223,
    226, 229, 232, 235, 237, 240, 243, 246, 249, 252, 255,
];

/// Gamma 2.2 lookup table: `round(255 * (v / 255) ^ 2.2)`.
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

const LINEAR_TABLE: [u8; 256] = identity_table();

const fn identity_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut value = 0_u8;
    loop {
        table[value as usize] = value;
        if value == u8::MAX {
            break table;
        }
        value += 1;
    }
}

/// Maps a raw brightness to its gamma-3.0 corrected value.
///
/// Monotonic non-decreasing, with `0 -> 0` and `255 -> 255`.
///
/// ```rust
/// use led_matrix_kit::led_matrix::gamma_correct;
///
/// assert_eq!(gamma_correct(0), 0);
/// assert_eq!(gamma_correct(128), 32);
/// assert_eq!(gamma_correct(255), 255);
/// ```
#[must_use]
pub const fn gamma_correct(value: u8) -> u8 {
    GAMMA_3_0_TABLE[value as usize]
}

/// Combine a gamma curve and a brightness cap into one lookup table.
///
/// `table[v]` is `gamma(v) * max_brightness / 255`, so the refresh loop does a
/// single lookup per pixel. With `max_brightness = 255` the table is the bare
/// curve.
#[must_use]
#[allow(clippy::cast_possible_truncation, reason = "scaled value never exceeds 255")]
pub const fn brightness_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let curve = gamma.table();
    let mut result = [0_u8; 256];
    let mut index = 0;
    while index < 256 {
        let scaled = (curve[index] as u16 * max_brightness as u16) / 255;
        result[index] = scaled as u8;
        index += 1;
    }
    result
}
