#![allow(missing_docs)]
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use led_matrix_kit::{
    Result,
    gpio_pin::HardwarePin,
    led_matrix::{Frame, LedMatrix, MatrixConfig, MatrixDisplay, MatrixStatic},
    matrix_device_task,
};
use {defmt_rtt as _, panic_probe as _};

type Frame8x8 = Frame<8, 8>;

matrix_device_task!(matrix_8x8_task, HardwarePin<'static>, Delay, 8, 8, 8);

static MATRIX_STATIC: MatrixStatic<8, 8, 8> = MatrixStatic::new_static();

const HEART: &str = "\
.##..##.
#99##99#
#999999#
#999999#
.#9999#.
..#99#..
...##...
........";

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
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
    let matrix = LedMatrix::new(col_pins, row_pins, Delay, MatrixConfig::default());
    let token = matrix_8x8_task(matrix, MATRIX_STATIC.command_signal());
    spawner.spawn(token)?;
    let display = MatrixDisplay::new(&MATRIX_STATIC);

    let heart: Frame8x8 = HEART.parse()?;
    let mut heart_dim = heart;
    for pixel in heart_dim.0.iter_mut().flatten() {
        *pixel /= 4;
    }
    let mut rings = [Frame8x8::new(); 4];
    for (radius, ring) in (0..).zip(rings.iter_mut()) {
        ring.draw_circle(3, 3, radius, 255);
        ring.draw_circle(4, 4, radius, 255);
    }

    loop {
        // The task keeps refreshing while this task sleeps.
        display.animate([
            (heart, Duration::from_millis(400)),
            (heart_dim, Duration::from_millis(200)),
        ])?;
        Timer::after(Duration::from_secs(4)).await;

        display.animate(rings.map(|ring| (ring, Duration::from_millis(120))))?;
        Timer::after(Duration::from_secs(4)).await;

        display.clear();
        Timer::after(Duration::from_secs(1)).await;
    }
}
