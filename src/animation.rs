//! Time sources and looping frame sequences for a [`LedMatrix`].
//!
//! A refresh loop is driven by time: [`TickSource`] reports milliseconds,
//! [`phase`] turns a tick into a position inside a repeating pattern, and
//! [`Animation`] holds a bounded list of `(frame, duration)` pairs that loops
//! forever.
//!
//! ```rust
//! use embassy_time::Duration;
//! use led_matrix_kit::animation::{Animation, phase};
//! use led_matrix_kit::led_matrix::Frame;
//!
//! // Advance a moving dot one column every 100 ms across 8 columns.
//! assert_eq!(phase(250, 100, 8), 2);
//! assert_eq!(phase(850, 100, 8), 0);
//!
//! let mut blink = Animation::<2, 2, 2>::new();
//! blink.push(Frame::filled(255), Duration::from_millis(300))?;
//! blink.push(Frame::new(), Duration::from_millis(200))?;
//! assert_eq!(blink.frame_at(Duration::from_millis(350)), Some(&Frame::new()));
//! assert_eq!(blink.frame_at(Duration::from_millis(550)), Some(&Frame::filled(255)));
//! # Ok::<(), led_matrix_kit::Error>(())
//! ```
//!
//! [`LedMatrix`]: crate::led_matrix::LedMatrix

use embassy_time::Duration;
use heapless::Vec;

use crate::led_matrix::Frame;
use crate::{Error, Result};

// ============================================================================
// TickSource
// ============================================================================

/// A monotonic millisecond counter.
///
/// [`SimClock`](crate::sim_clock::SimClock) implements it for host tests. On
/// a Pico, `EmbassyTicks` reads the embassy time driver.
pub trait TickSource {
    /// Milliseconds since an arbitrary fixed start.
    fn now_ms(&self) -> u64;
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// [`TickSource`] backed by `embassy_time::Instant`.
#[cfg(any(feature = "pico1", feature = "pico2"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyTicks;

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl TickSource for EmbassyTicks {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

/// Position inside a repeating pattern of `extent` steps, each `period_ms` long.
///
/// Returns `(tick_ms / period_ms) % extent`, or 0 when either `period_ms` or
/// `extent` is 0.
#[must_use]
pub const fn phase(tick_ms: u64, period_ms: u64, extent: u64) -> u64 {
    if period_ms == 0 || extent == 0 {
        return 0;
    }
    (tick_ms / period_ms) % extent
}

// ============================================================================
// Animation
// ============================================================================

/// A looping sequence of up to `MAX_FRAMES` frames, each with a display duration.
#[derive(Clone, Debug)]
pub struct Animation<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize> {
    frames: Vec<(Frame<COLS, ROWS>, Duration), MAX_FRAMES>,
}

impl<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize>
    Animation<COLS, ROWS, MAX_FRAMES>
{
    /// Duration given to the single frame of [`still`](Self::still).
    pub const STILL_DURATION: Duration = Duration::from_secs(1);

    /// Create an empty animation.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// An animation that shows `frame` forever.
    ///
    /// With `MAX_FRAMES == 0` the result is empty.
    #[must_use]
    pub fn still(frame: Frame<COLS, ROWS>) -> Self {
        let mut animation = Self::new();
        // Only fails when MAX_FRAMES is 0, and then empty is the answer.
        let _ = animation.frames.push((frame, Self::STILL_DURATION));
        animation
    }

    /// Build from any sequence of `(frame, duration)` pairs.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyAnimation`] if `frames` is empty, plus the errors of
    /// [`push`](Self::push).
    pub fn from_frames(
        frames: impl IntoIterator<Item = (Frame<COLS, ROWS>, Duration)>,
    ) -> Result<Self> {
        let mut animation = Self::new();
        for (frame, duration) in frames {
            animation.push(frame, duration)?;
        }
        if animation.is_empty() {
            return Err(Error::EmptyAnimation);
        }
        Ok(animation)
    }

    /// Append a frame shown for `duration`.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroFrameDuration`] if `duration` is zero, and
    /// [`Error::AnimationFull`] if `MAX_FRAMES` frames are already stored.
    pub fn push(&mut self, frame: Frame<COLS, ROWS>, duration: Duration) -> Result<()> {
        if duration.as_ticks() == 0 {
            return Err(Error::ZeroFrameDuration);
        }
        self.frames
            .push((frame, duration))
            .map_err(|_| Error::AnimationFull)
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total time of one loop through every frame.
    #[must_use]
    pub fn cycle(&self) -> Duration {
        let ticks = self
            .frames
            .iter()
            .fold(0_u64, |total, (_, duration)| total.saturating_add(duration.as_ticks()));
        Duration::from_ticks(ticks)
    }

    /// The frame on screen `elapsed` after the animation started, looping.
    ///
    /// `None` only for an empty animation.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> Option<&Frame<COLS, ROWS>> {
        let cycle_ticks = self.cycle().as_ticks();
        if cycle_ticks == 0 {
            return None;
        }
        let mut offset = elapsed.as_ticks() % cycle_ticks;
        for (frame, duration) in &self.frames {
            if offset < duration.as_ticks() {
                return Some(frame);
            }
            offset -= duration.as_ticks();
        }
        self.frames.last().map(|(frame, _)| frame)
    }

    /// Returns `true` when no frame lights any LED.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.frames.iter().all(|(frame, _)| frame.is_blank())
    }

    /// The stored `(frame, duration)` pairs, in order.
    #[must_use]
    pub fn frames(&self) -> &[(Frame<COLS, ROWS>, Duration)] {
        &self.frames
    }
}

impl<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize> Default
    for Animation<COLS, ROWS, MAX_FRAMES>
{
    fn default() -> Self {
        Self::new()
    }
}
