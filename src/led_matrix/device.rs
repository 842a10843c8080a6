use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;

use super::{Frame, LedMatrix};
use crate::Result;
use crate::animation::Animation;
use crate::fmt::{debug, info};
use crate::gpio_pin::GpioPin;

#[doc(hidden)]
// Public so macro-generated tasks in downstream crates can name the channel type.
pub type MatrixCommandSignal<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize> =
    Signal<CriticalSectionRawMutex, Animation<COLS, ROWS, MAX_FRAMES>>;

/// Static resources for a [`MatrixDisplay`].
pub struct MatrixStatic<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize> {
    command_signal: MatrixCommandSignal<COLS, ROWS, MAX_FRAMES>,
}

impl<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize>
    MatrixStatic<COLS, ROWS, MAX_FRAMES>
{
    /// Create the resources. Meant for a `static` item.
    #[must_use]
    pub const fn new_static() -> Self {
        Self {
            command_signal: Signal::new(),
        }
    }

    /// The channel the background task listens on.
    #[must_use]
    pub const fn command_signal(
        &'static self,
    ) -> &'static MatrixCommandSignal<COLS, ROWS, MAX_FRAMES> {
        &self.command_signal
    }
}

/// Handle for a [`LedMatrix`] refreshed by a background task.
///
/// The task (generated with [`matrix_device_task!`](crate::matrix_device_task))
/// owns the matrix and calls [`LedMatrix::update`] over and over. This handle
/// only sends it new frames or animations. A dark display parks the task on
/// its signal, so an idle matrix costs no CPU.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embassy_executor::Spawner;
/// use embassy_time::Delay;
/// use led_matrix_kit::{
///     Result,
///     gpio_pin::HardwarePin,
///     led_matrix::{Frame, LedMatrix, MatrixConfig, MatrixDisplay, MatrixStatic},
///     matrix_device_task,
/// };
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// matrix_device_task!(matrix_task, HardwarePin<'static>, Delay, 2, 2, 4);
///
/// async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> Result<()> {
///     static MATRIX_STATIC: MatrixStatic<2, 2, 4> = MatrixStatic::new_static();
///     let matrix = LedMatrix::new(
///         [HardwarePin::new(p.PIN_0), HardwarePin::new(p.PIN_1)],
///         [HardwarePin::new(p.PIN_2), HardwarePin::new(p.PIN_3)],
///         Delay,
///         MatrixConfig::default(),
///     );
///     let token = matrix_task(matrix, MATRIX_STATIC.command_signal());
///     spawner.spawn(token).map_err(led_matrix_kit::Error::TaskSpawn)?;
///
///     let display = MatrixDisplay::new(&MATRIX_STATIC);
///     display.write_frame(Frame::filled(255));
///     Ok(())
/// }
/// ```
pub struct MatrixDisplay<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize> {
    command_signal: &'static MatrixCommandSignal<COLS, ROWS, MAX_FRAMES>,
}

impl<const COLS: usize, const ROWS: usize, const MAX_FRAMES: usize>
    MatrixDisplay<COLS, ROWS, MAX_FRAMES>
{
    /// Create a handle that talks to the task spawned with `matrix_static`.
    #[must_use]
    pub const fn new(matrix_static: &'static MatrixStatic<COLS, ROWS, MAX_FRAMES>) -> Self {
        Self {
            command_signal: &matrix_static.command_signal,
        }
    }

    /// Show `frame` until the next command.
    pub fn write_frame(&self, frame: Frame<COLS, ROWS>) {
        self.command_signal.signal(Animation::still(frame));
    }

    /// Loop through `(frame, duration)` pairs until the next command.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no frames, more than `MAX_FRAMES` frames,
    /// or a zero duration. The running display is left unchanged then.
    pub fn animate(
        &self,
        frames: impl IntoIterator<Item = (Frame<COLS, ROWS>, Duration)>,
    ) -> Result<()> {
        let animation = Animation::from_frames(frames)?;
        info!("MatrixDisplay::animate: sending {} frames", animation.len());
        self.command_signal.signal(animation);
        Ok(())
    }

    /// Turn every LED off.
    pub fn clear(&self) {
        self.write_frame(Frame::new());
    }
}

// Must be `pub` because macro-generated tasks in downstream crates call it.
#[doc(hidden)]
/// Device loop for [`MatrixDisplay`]. Called by [`matrix_device_task!`](crate::matrix_device_task).
pub async fn matrix_device_loop<
    P,
    D,
    const COLS: usize,
    const ROWS: usize,
    const MAX_FRAMES: usize,
>(
    mut matrix: LedMatrix<P, D, COLS, ROWS>,
    command_signal: &'static MatrixCommandSignal<COLS, ROWS, MAX_FRAMES>,
) -> Result<Infallible>
where
    P: GpioPin,
    D: DelayNs,
{
    info!("matrix_device_loop: task started");
    matrix.initialize();
    let mut animation = Animation::<COLS, ROWS, MAX_FRAMES>::new();
    let mut started = Instant::now();
    loop {
        if animation.is_dark() {
            matrix.clear();
            matrix.update();
            debug!("matrix_device_loop: dark, waiting for command");
            animation = command_signal.wait().await;
            started = Instant::now();
            continue;
        }
        if let Some(next) = command_signal.try_take() {
            debug!("matrix_device_loop: new animation with {} frames", next.len());
            animation = next;
            started = Instant::now();
        }
        if let Some(frame) = animation.frame_at(started.elapsed()) {
            matrix.clone_frame(*frame);
        }
        matrix.update();
        // Let other tasks run between passes.
        yield_now().await;
    }
}

/// Define an embassy task that refreshes a [`LedMatrix`] in the background.
///
/// `matrix_device_task!(vis name, PinType, DelayType, COLS, ROWS, MAX_FRAMES)`
/// expands to a task taking the matrix and its
/// [`MatrixStatic::command_signal`]. See [`MatrixDisplay`] for an example.
#[macro_export]
macro_rules! matrix_device_task {
    (
        $vis:vis $task_name:ident,
        $pin_ty:ty,
        $delay_ty:ty,
        $cols:expr,
        $rows:expr,
        $max_frames:expr $(,)?
    ) => {
        #[embassy_executor::task]
        #[allow(non_snake_case, reason = "task names may mirror the display name")]
        $vis async fn $task_name(
            matrix: $crate::led_matrix::LedMatrix<$pin_ty, $delay_ty, $cols, $rows>,
            command_signal: &'static $crate::led_matrix::MatrixCommandSignal<
                $cols,
                $rows,
                $max_frames,
            >,
        ) {
            let err = $crate::led_matrix::matrix_device_loop(matrix, command_signal)
                .await
                .unwrap_err();
            panic!("{err}");
        }
    };
}

pub use crate::matrix_device_task;
