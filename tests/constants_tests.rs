// Host-side tests for front-end constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use typeloop_core::constants::{
    NB_TEXT_MAX, RECYCLE_DEPTH, Z_CAMERA_MAX, Z_CAMERA_MIN, Z_SPEED_MAX, Z_SPEED_MIN,
};

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_lens_is_valid() {
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
    assert!(CAMERA_ZNEAR > 0.0);
    assert!(CAMERA_ZFAR > CAMERA_ZNEAR);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn far_plane_covers_the_recycle_depth_from_any_camera_position() {
    // the furthest instance sits at -RECYCLE_DEPTH, the camera at most at Z_CAMERA_MAX
    assert!(CAMERA_ZFAR > Z_CAMERA_MAX + RECYCLE_DEPTH);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_dt_clamp_is_shorter_than_a_full_trip() {
    assert!(MAX_FRAME_DT_SEC > 0.0);
    // at top speed one clamped frame moves less than the whole depth
    assert!(MAX_FRAME_DT_SEC * Z_SPEED_MIN.abs() < RECYCLE_DEPTH);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn instance_buffer_fits_the_largest_layout() {
    assert!(INITIAL_INSTANCE_CAPACITY >= 4 * NB_TEXT_MAX as usize);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lights_are_sane() {
    assert!(POINT_LIGHT_COLOR <= 0xff_ffff);
    assert!(AMBIENT_COLOR <= 0xff_ffff);
    assert!(POINT_LIGHT_INTENSITY >= 0.0);
    assert!(POINT_LIGHT_RANGE > 0.0);
    assert!((0.0..=1.0).contains(&AMBIENT_INTENSITY));
    // light sits between the camera range and the text
    assert!(POINT_LIGHT_POS[2] >= Z_CAMERA_MIN && POINT_LIGHT_POS[2] <= Z_CAMERA_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn slider_steps_divide_their_ranges() {
    for (min, max, step) in [
        (Z_SPEED_MIN, Z_SPEED_MAX, SPEED_STEP),
        (Z_CAMERA_MIN, Z_CAMERA_MAX, CAMERA_STEP),
    ] {
        assert!(step > 0.0);
        let steps = (max - min) / step;
        assert!((steps - steps.round()).abs() < 1e-3, "{} / {}", max - min, step);
    }
}

#[test]
fn dom_ids_are_distinct() {
    assert_ne!(CANVAS_ID, PANEL_ID);
    assert!(FONT_URL.ends_with(".ttf") || FONT_URL.ends_with(".otf"));
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
}

#[test]
fn font_asset_ships_with_the_page() {
    // served next to index.html, so the path is relative to the repo root
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(FONT_URL);
    assert!(path.is_file(), "missing {}", path.display());
}
