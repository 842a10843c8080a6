#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_time::Delay;
use led_matrix_kit::{
    Result,
    animation::{EmbassyTicks, TickSource, phase},
    gpio_pin::HardwarePin,
    led_matrix::{LedMatrix, MatrixConfig},
};
use {defmt_rtt as _, panic_probe as _};

const SIZE: i32 = 8;
const STEP_MS: u64 = 80;

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let col_pins = [
        HardwarePin::new(p.PIN_0),
        HardwarePin::new(p.PIN_1),
        HardwarePin::new(p.PIN_2),
        HardwarePin::new(p.PIN_3),
        HardwarePin::new(p.PIN_4),
        HardwarePin::new(p.PIN_5),
        HardwarePin::new(p.PIN_6),
        HardwarePin::new(p.PIN_7),
    ];
    let row_pins = [
        HardwarePin::new(p.PIN_8),
        HardwarePin::new(p.PIN_9),
        HardwarePin::new(p.PIN_10),
        HardwarePin::new(p.PIN_11),
        HardwarePin::new(p.PIN_12),
        HardwarePin::new(p.PIN_13),
        HardwarePin::new(p.PIN_14),
        HardwarePin::new(p.PIN_15),
    ];
    let mut matrix: LedMatrix<_, _, 8, 8> =
        LedMatrix::new(col_pins, row_pins, Delay, MatrixConfig::default());
    matrix.initialize();

    // An anti-diagonal bar with a dimmer trail sweeps from the top-left corner.
    let diagonal_count = u64::try_from(2 * SIZE - 1).unwrap_or(1);
    loop {
        let step = phase(EmbassyTicks.now_ms(), STEP_MS, diagonal_count);
        let head = i32::try_from(step).unwrap_or(0);
        matrix.clear();
        for (offset, brightness) in [(0, 255), (1, 96), (2, 24)] {
            let sum = head - offset;
            matrix.draw_line(sum, 0, sum - (SIZE - 1), SIZE - 1, brightness);
        }
        matrix.update();
        yield_now().await;
    }
}
