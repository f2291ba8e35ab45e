//! Tests for the windowed Lambert Conformal projection.

use projection::LambertConformal;
use rand::{Rng, SeedableRng};
use secs_common::MapWindow;
use test_utils::{assert_approx_eq, assert_coords_approx_eq};

#[test]
fn test_pixel_roundtrip_inside_window() {
    let proj = LambertConformal::north_america();
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    // The top rows straddle the cone apex, where the window wraps past the
    // pole; stay below it.
    for _ in 0..200 {
        let px = rng.gen_range(0.0..800.0);
        let py = rng.gen_range(50.0..800.0);
        let (lat, lon) = proj.pixel_to_geo(px, py, 800, 800).unwrap();
        let (px2, py2) = proj.to_pixel(lat, lon, 800, 800).unwrap();
        assert_coords_approx_eq!((px2, py2), (px, py), 1e-3);
    }
}

#[test]
fn test_rotate_vector_preserves_magnitude() {
    let proj = LambertConformal::north_america();
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let east = rng.gen_range(-500.0..500.0);
        let north = rng.gen_range(-500.0..500.0);
        let lon = rng.gen_range(-180.0..180.0);
        let (u, v) = proj.rotate_vector(east, north, lon);
        assert_approx_eq!((u * u + v * v).sqrt(), (east * east + north * north).sqrt(), 1e-9);
    }
}

#[test]
fn test_rotated_north_follows_meridian() {
    // A northward vector east of the central meridian must point along the
    // projected meridian, i.e. toward the same pixel a step further north.
    let proj = LambertConformal::north_america();
    let (lat, lon) = (55.0, -60.0);

    let (x0, y0) = proj.project(lat, lon).unwrap();
    let (x1, y1) = proj.project(lat + 0.01, lon).unwrap();
    let meridian = ((x1 - x0), (y1 - y0));
    let len = (meridian.0 * meridian.0 + meridian.1 * meridian.1).sqrt();

    let (u, v) = proj.rotate_vector(0.0, 1.0, lon);
    assert_coords_approx_eq!((u, v), (meridian.0 / len, meridian.1 / len), 1e-4);
    assert!(u < 0.0, "north should lean west on the eastern half");
}

#[test]
fn test_custom_window() {
    let window = MapWindow {
        lat_0: 70.0,
        lon_0: 20.0,
        width_m: 4.0e6,
        height_m: 2.0e6,
    };
    let proj = LambertConformal::from_window(&window);
    let (px, py) = proj.to_pixel(70.0, 20.0, 400, 200).unwrap();
    assert_coords_approx_eq!((px, py), (200.0, 100.0), 1e-3);
    assert!(!proj.contains(60.0, -100.0));
}
