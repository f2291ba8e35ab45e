//! Tests for centered normalization.

use rand::{Rng, SeedableRng};
use renderer::{CenteredNorm, NormError};
use test_utils::assert_approx_eq;

fn random_data(rng: &mut impl Rng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-500.0..500.0)).collect()
}

// ============================================================================
// autoscale tests
// ============================================================================

#[test]
fn test_autoscale_limits_are_symmetric() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let vcenter = rng.gen_range(-50.0..50.0);
        let data = random_data(&mut rng, 64);
        let mut norm = CenteredNorm::new(vcenter, None, false);
        norm.autoscale(&data).unwrap();

        let vmin = norm.vmin().unwrap();
        let vmax = norm.vmax().unwrap();
        assert_approx_eq!(vcenter - vmin, vmax - vcenter, 1e-9);

        // Every datum is covered by the range.
        for &d in &data {
            assert!(d >= vmin - 1e-9 && d <= vmax + 1e-9);
        }
    }
}

#[test]
fn test_autoscale_ignores_nan() {
    let mut norm = CenteredNorm::default();
    norm.autoscale(&[f64::NAN, -4.0, 2.0, f64::NAN]).unwrap();
    assert_eq!(norm.halfrange(), Some(4.0));
}

#[test]
fn test_autoscale_empty_fails() {
    let mut norm = CenteredNorm::default();
    assert_eq!(norm.autoscale(&[]), Err(NormError::EmptyData));
    assert_eq!(norm.autoscale(&[f64::NAN]), Err(NormError::EmptyData));
    assert!(!norm.is_scaled());
}

// ============================================================================
// evaluate tests
// ============================================================================

#[test]
fn test_center_maps_to_half() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let vcenter = rng.gen_range(-100.0..100.0);
        let halfrange = rng.gen_range(0.1..1000.0);
        let mut norm = CenteredNorm::new(vcenter, Some(halfrange), false);
        assert_approx_eq!(norm.evaluate(vcenter).unwrap(), 0.5, 1e-12);
        assert_approx_eq!(norm.evaluate(vcenter + halfrange).unwrap(), 1.0, 1e-9);
        assert_approx_eq!(norm.evaluate(vcenter - halfrange).unwrap(), 0.0, 1e-9);
    }
}

#[test]
fn test_equal_distance_gives_equal_color_distance() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(23);
    let data = random_data(&mut rng, 128);
    let mut norm = CenteredNorm::default();
    norm.autoscale(&data).unwrap();

    for _ in 0..100 {
        let d = rng.gen_range(0.0..500.0);
        let up = norm.evaluate(d).unwrap();
        let down = norm.evaluate(-d).unwrap();
        assert_approx_eq!(up - 0.5, 0.5 - down, 1e-12);
    }
}

#[test]
fn test_equal_distance_around_offset_center() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(29);
    for _ in 0..200 {
        let vcenter = rng.gen_range(-200.0..200.0);
        let mut norm = CenteredNorm::new(vcenter, None, false);
        if rng.gen_bool(0.5) {
            norm.set_halfrange(Some(rng.gen_range(0.5..800.0)));
        } else {
            let data = random_data(&mut rng, 32);
            norm.autoscale(&data).unwrap();
        }
        let halfrange = norm.halfrange().unwrap();

        for _ in 0..20 {
            let d = rng.gen_range(0.0..=halfrange);
            let up = norm.evaluate(vcenter + d).unwrap();
            let down = norm.evaluate(vcenter - d).unwrap();
            assert_approx_eq!(up - 0.5, 0.5 - down, 1e-9);
            assert!((0.0..=1.0 + 1e-9).contains(&up));
        }
    }
}

#[test]
fn test_evaluate_is_monotonic() {
    let mut norm = CenteredNorm::new(0.0, Some(10.0), false);
    let values: Vec<f64> = (-30..=30).map(|v| v as f64).collect();
    let out = norm.evaluate_slice(&values).unwrap();
    assert!(out.windows(2).all(|w| w[0] < w[1]));
    // Unclipped values run past [0, 1].
    assert_approx_eq!(out[0], -1.0, 1e-12);
    assert_approx_eq!(out[60], 2.0, 1e-12);
}

#[test]
fn test_clip_bounds_output() {
    let mut norm = CenteredNorm::new(0.0, Some(10.0), true);
    assert_eq!(norm.evaluate(-25.0).unwrap(), 0.0);
    assert_eq!(norm.evaluate(25.0).unwrap(), 1.0);
}

#[test]
fn test_nan_passes_through() {
    let mut norm = CenteredNorm::new(0.0, Some(1.0), true);
    assert!(norm.evaluate(f64::NAN).unwrap().is_nan());
}

#[test]
fn test_unscaled_evaluate_fails() {
    let mut norm = CenteredNorm::default();
    assert_eq!(norm.evaluate(1.0), Err(NormError::Unscaled));
}

#[test]
fn test_evaluate_slice_autoscales_once() {
    let mut norm = CenteredNorm::default();
    let out = norm.evaluate_slice(&[-1.0, 0.0, 4.0]).unwrap();
    assert_eq!(out, vec![0.375, 0.5, 1.0]);

    // A second call keeps the first range.
    let out = norm.evaluate_slice(&[8.0]).unwrap();
    assert_eq!(out, vec![1.5]);
}

// ============================================================================
// limit manipulation tests
// ============================================================================

#[test]
fn test_clearing_halfrange_allows_new_autoscale() {
    let mut norm = CenteredNorm::new(0.0, Some(4.0), false);
    norm.set_halfrange(None);
    assert!(!norm.is_scaled());
    assert_eq!(norm.vmin(), None);

    norm.autoscale_if_unset(&[-9.0, 3.0]);
    assert_eq!(norm.halfrange(), Some(9.0));
}
