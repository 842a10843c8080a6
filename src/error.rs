use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The display engine itself never fails: out-of-range pixels are clipped and
/// dimension mismatches are rejected by the compiler. These variants cover the
/// surrounding helpers (frame parsing, animation building, task spawning).
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    /// The background matrix task could not be spawned.
    #[cfg(feature = "arm")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// An animation already holds its maximum number of frames.
    #[display("Animation has no room for another frame")]
    AnimationFull,

    /// An animation needs at least one frame.
    #[display("Animation requires at least one frame")]
    EmptyAnimation,

    /// Every animation frame must be shown for a positive duration.
    #[display("Animation frame duration must be positive")]
    ZeroFrameDuration,

    /// A text frame has a line longer than the matrix width.
    #[display("Frame text is wider than the matrix")]
    FrameTooWide,

    /// A text frame has more lines than the matrix height.
    #[display("Frame text is taller than the matrix")]
    FrameTooTall,

    /// A text frame contains a character with no brightness meaning.
    #[display("Unknown frame glyph {_0:?}")]
    UnknownGlyph(#[error(not(source))] char),
}

#[cfg(feature = "arm")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
