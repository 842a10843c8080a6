#![allow(missing_docs)]
//! Host-level tests for brightness curves.

use led_matrix_kit::led_matrix::{GAMMA_DEFAULT, Gamma, brightness_table, gamma_correct};

#[test]
fn gamma_correct_keeps_endpoints() {
    assert_eq!(gamma_correct(0), 0);
    assert_eq!(gamma_correct(255), 255);
}

#[test]
fn gamma_correct_is_monotonic() {
    for value in 0..u8::MAX {
        assert!(
            gamma_correct(value) <= gamma_correct(value + 1),
            "curve drops after {value}"
        );
    }
}

#[test]
fn gamma_correct_follows_cube_curve() {
    assert_eq!(gamma_correct(31), 0);
    assert_eq!(gamma_correct(32), 1);
    assert_eq!(gamma_correct(64), 4);
    assert_eq!(gamma_correct(128), 32);
    assert_eq!(gamma_correct(200), 123);
}

#[test]
fn every_curve_is_monotonic_with_fixed_endpoints() {
    for gamma in [Gamma::Linear, Gamma::Gamma2_2, Gamma::Gamma3_0] {
        let table = gamma.table();
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 255);
        assert!(table.windows(2).all(|pair| pair[0] <= pair[1]), "{gamma:?}");
    }
}

#[test]
fn linear_curve_is_identity() {
    let table = Gamma::Linear.table();
    assert!((0..=u8::MAX).all(|value| table[usize::from(value)] == value));
}

#[test]
fn default_curve_is_gamma_3() {
    assert_eq!(GAMMA_DEFAULT, Gamma::Gamma3_0);
    assert_eq!(Gamma::default(), GAMMA_DEFAULT);
    assert_eq!(Gamma::Gamma3_0.table()[128], gamma_correct(128));
}

#[test]
fn brightness_table_scales_curve() {
    const FULL: [u8; 256] = brightness_table(Gamma::Gamma3_0, 255);
    assert_eq!(&FULL, Gamma::Gamma3_0.table());

    let half = brightness_table(Gamma::Linear, 128);
    assert_eq!(half[0], 0);
    assert_eq!(half[255], 128);
    assert_eq!(half[100], 50);

    let off = brightness_table(Gamma::Gamma2_2, 0);
    assert!(off.iter().all(|&value| value == 0));
}
