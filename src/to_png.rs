//! Host-side previews of matrix frames as PNG and APNG images.
//!
//! Each LED is drawn as a round dot on a black panel. A dot's shade is the
//! light the LED actually emits on the matrix, so a frame value goes through
//! the same gamma-3.0 curve the refresh loop uses before it is encoded for a
//! screen.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::led_matrix::{Frame, gamma_correct};

/// Screen encoding applied to emitted light so previews look like the LEDs.
const SCREEN_GAMMA: f32 = 2.2;

/// Render `frame` into a grayscale PNG whose larger side is at most
/// `target_max_dimension` pixels.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_frame_png<const COLS: usize, const ROWS: usize>(
    frame: &Frame<COLS, ROWS>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let layout = DotLayout::fit::<COLS, ROWS>(target_max_dimension);
    let pixels = layout.render(frame);

    let mut writer = layout.encoder(output_path)?.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render `frames` into a looping grayscale APNG, `frame_delay_ms` per frame.
///
/// # Errors
///
/// Returns an error if `frames` is empty, the delay does not fit the APNG
/// delay field, or the file cannot be created or encoded.
pub fn write_frames_apng<const COLS: usize, const ROWS: usize>(
    frames: &[Frame<COLS, ROWS>],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    if frames.is_empty() {
        return Err("frames must not be empty".into());
    }
    let output_path = output_path.as_ref();
    let frame_count = u32::try_from(frames.len())?;
    let delay_num = u16::try_from(frame_delay_ms)?;
    let layout = DotLayout::fit::<COLS, ROWS>(target_max_dimension);

    let mut encoder = layout.encoder(output_path)?;
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        writer.set_frame_delay(delay_num, 1000)?;
        writer.write_image_data(&layout.render(frame))?;
    }
    writer.finish()?;
    println!("wrote APNG to {}", output_path.display());
    Ok(())
}

/// Geometry of one preview image.
#[derive(Clone, Copy, Debug)]
struct DotLayout {
    cell_size: u32,
    dot_radius: u32,
    width: u32,
    height: u32,
}

impl DotLayout {
    /// The largest cells whose image still fits in `target_max_dimension`.
    fn fit<const COLS: usize, const ROWS: usize>(target_max_dimension: u32) -> Self {
        let cols = u32::try_from(COLS).unwrap_or(u32::MAX).max(1);
        let rows = u32::try_from(ROWS).unwrap_or(u32::MAX).max(1);
        let mut cell_size = (target_max_dimension / cols.max(rows)).max(2);
        // The border is one dot radius on every side.
        while cell_size > 2
            && Self::with_cell_size(cols, rows, cell_size).max_side() > target_max_dimension
        {
            cell_size -= 1;
        }
        Self::with_cell_size(cols, rows, cell_size)
    }

    fn with_cell_size(cols: u32, rows: u32, cell_size: u32) -> Self {
        let margin = (cell_size / 8).max(1);
        let dot_radius = (cell_size.saturating_sub(margin * 2) / 2).max(1);
        Self {
            cell_size,
            dot_radius,
            width: cols * cell_size + dot_radius * 2,
            height: rows * cell_size + dot_radius * 2,
        }
    }

    const fn max_side(&self) -> u32 {
        if self.width > self.height {
            self.width
        } else {
            self.height
        }
    }

    fn encoder(
        &self,
        output_path: &Path,
    ) -> Result<Encoder<'static, BufWriter<File>>, Box<dyn Error>> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(output_path)?;
        let mut encoder = Encoder::new(BufWriter::new(file), self.width, self.height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        Ok(encoder)
    }

    /// One byte per image pixel, row-major.
    fn render<const COLS: usize, const ROWS: usize>(&self, frame: &Frame<COLS, ROWS>) -> Vec<u8> {
        let mut bytes = vec![0_u8; (self.width * self.height) as usize];
        let radius = i64::from(self.dot_radius);
        let radius_sq = radius * radius;
        let center = i64::from(self.cell_size - 1) / 2;

        for (row_index, row) in frame.0.iter().enumerate() {
            for (column_index, &value) in row.iter().enumerate() {
                let shade = screen_shade(value);
                if shade == 0 {
                    continue;
                }
                let origin_x = self.dot_radius + column_index as u32 * self.cell_size;
                let origin_y = self.dot_radius + row_index as u32 * self.cell_size;
                for local_y in 0..self.cell_size {
                    let delta_y = i64::from(local_y) - center;
                    for local_x in 0..self.cell_size {
                        let delta_x = i64::from(local_x) - center;
                        if delta_x * delta_x + delta_y * delta_y > radius_sq {
                            continue;
                        }
                        let x = origin_x + local_x;
                        let y = origin_y + local_y;
                        if let Some(byte) = bytes.get_mut((y * self.width + x) as usize) {
                            *byte = shade;
                        }
                    }
                }
            }
        }
        bytes
    }
}

/// The 8-bit screen value that looks as bright as the LED driven by `value`.
fn screen_shade(value: u8) -> u8 {
    let emitted = f32::from(gamma_correct(value)) / 255.0;
    (emitted.powf(1.0 / SCREEN_GAMMA) * 255.0).round().clamp(0.0, 255.0) as u8
}
