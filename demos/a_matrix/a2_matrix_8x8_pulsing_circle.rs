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
    gpio_pin::{HardwarePin, PinState},
    led_matrix::{LedMatrix, MatrixConfig},
};
use {defmt_rtt as _, panic_probe as _};

// Common-anode module: rows source current, columns sink it.
const CONFIG: MatrixConfig = MatrixConfig::new(PinState::Low, PinState::High);

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
    let mut matrix: LedMatrix<_, _, 8, 8> = LedMatrix::new(col_pins, row_pins, Delay, CONFIG);
    matrix.initialize();

    loop {
        let now_ms = EmbassyTicks.now_ms();
        // Radius 0..=3 and back, then the image flips to a negative every other pulse.
        let radius = match phase(now_ms, 150, 6) {
            step @ 0..=3 => step,
            step => 6 - step,
        };
        let radius = i32::try_from(radius).unwrap_or(0);
        matrix.clear();
        matrix.draw_circle(3, 3, radius, 255);
        matrix.draw_circle(4, 4, radius, 64);
        if phase(now_ms, 900, 2) == 1 {
            matrix.invert_frame();
        }
        matrix.update();
        yield_now().await;
    }
}
