//! Drive multiplexed row/column LED matrices with gamma-corrected grayscale.
//!
//! The crate has two layers:
//!
//! - [`gpio_pin`]: a small capability trait over one digital line, with a
//!   hardware backend for the Pico (`HardwarePin`), an in-memory
//!   backend for tests ([`gpio_pin::FakePin`]), and an adapter for any
//!   `embedded-hal` output pin ([`gpio_pin::HalOutputPin`]).
//! - [`led_matrix`]: the display engine. It owns a [`led_matrix::Frame`] of
//!   brightness bytes plus the column and row pins, scans one row at a time,
//!   and holds each column on for a time proportional to its gamma-corrected
//!   brightness.
//!
//! Around them, [`animation`] provides time sources and looping frame
//! sequences, and [`sim_clock`] a virtual timeline for host tests.
//!
//! # Glossary
//!
//! - **Multiplexing:** only one row is energized at a time; columns are shared
//!   across rows, so the whole image is built from fast successive row slices.
//! - **Active level:** the electrical level ([`gpio_pin::PinState`]) that turns a
//!   row or column on. Source-driven and sink-driven wiring use opposite levels.
//! - **Pulse unit:** nanoseconds of busy-wait per step of corrected brightness.
#![cfg_attr(not(any(test, feature = "host")), no_std)]

// Compile-time checks: at most one board may be selected
#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: the executor-backed device needs an architecture
#[cfg(all(any(feature = "pico1", feature = "pico2"), not(feature = "arm")))]
compile_error!("Board features require the 'arm' architecture feature");

mod fmt;

pub mod animation;
mod error;
pub mod gpio_pin;
pub mod led_matrix;
pub mod sim_clock;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
