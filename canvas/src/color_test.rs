#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// hsv_to_rgb
// =============================================================

#[test]
fn primaries_at_full_saturation() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb8::new(255, 0, 0));
    assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb8::new(0, 255, 0));
    assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb8::new(0, 0, 255));
}

#[test]
fn secondaries_at_sextant_boundaries() {
    assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Rgb8::new(255, 255, 0));
    assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Rgb8::new(0, 255, 255));
    assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), Rgb8::new(255, 0, 255));
}

#[test]
fn zero_saturation_is_rounded_gray_for_any_hue() {
    for v in [0.0_f64, 0.1, 0.25, 0.5, 0.502, 0.75, 1.0] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let expected = (255.0_f64 * v).round() as u8;
        for h in [0.0, 45.0, 90.0, 181.5, 359.9] {
            assert_eq!(hsv_to_rgb(h, 0.0, v), Rgb8::new(expected, expected, expected), "h={h} v={v}");
        }
    }
}

#[test]
fn half_value_gray_rounds_up() {
    // 0.5 * 255 = 127.5 rounds to 128 on the achromatic path.
    assert_eq!(hsv_to_rgb(0.0, 0.0, 0.5), Rgb8::new(128, 128, 128));
}

#[test]
fn chromatic_channels_truncate() {
    // h=30 -> sextant 0, f=0.5, t = 0.5 -> 127.5 truncates to 127.
    assert_eq!(hsv_to_rgb(30.0, 1.0, 1.0), Rgb8::new(255, 127, 0));
}

#[test]
fn hue_wraps_modulo_360() {
    assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(480.0, 1.0, 1.0), hsv_to_rgb(120.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
}

#[test]
fn non_finite_hue_is_treated_as_zero() {
    assert_eq!(hsv_to_rgb(f64::NAN, 1.0, 1.0), Rgb8::new(255, 0, 0));
    assert_eq!(hsv_to_rgb(f64::INFINITY, 1.0, 1.0), Rgb8::new(255, 0, 0));
}

#[test]
fn out_of_range_saturation_and_value_are_clamped() {
    assert_eq!(hsv_to_rgb(0.0, 2.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(0.0, 1.0, 3.0), hsv_to_rgb(0.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(0.0, -1.0, 1.0), Rgb8::WHITE);
    assert_eq!(hsv_to_rgb(90.0, 1.0, -0.5), Rgb8::BLACK);
}

#[test]
fn conversion_is_deterministic() {
    let a = hsv_to_rgb(123.456, 0.789, 0.654);
    let b = hsv_to_rgb(123.456, 0.789, 0.654);
    assert_eq!(a, b);
}

#[test]
fn hsv_to_rgb_method_matches_free_function() {
    let hsv = Hsv::new(210.0, 0.4, 0.9);
    assert_eq!(hsv.to_rgb(), hsv_to_rgb(210.0, 0.4, 0.9));
}

// =============================================================
// rgb_to_hsv
// =============================================================

#[test]
fn rgb_to_hsv_grays_have_no_hue() {
    let white = rgb_to_hsv(Rgb8::WHITE);
    assert_eq!(white, Hsv::new(0.0, 0.0, 1.0));
    let black = rgb_to_hsv(Rgb8::BLACK);
    assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));
}

#[test]
fn rgb_to_hsv_primaries() {
    let red = rgb_to_hsv(Rgb8::new(255, 0, 0));
    assert!(approx_eq(red.h, 0.0) && approx_eq(red.s, 1.0) && approx_eq(red.v, 1.0));
    let green = rgb_to_hsv(Rgb8::new(0, 255, 0));
    assert!(approx_eq(green.h, 120.0));
    let blue = rgb_to_hsv(Rgb8::new(0, 0, 255));
    assert!(approx_eq(blue.h, 240.0));
    let magenta = rgb_to_hsv(Rgb8::new(255, 0, 255));
    assert!(approx_eq(magenta.h, 300.0));
}

#[test]
fn rgb_to_hsv_reprojects_wheel_colors() {
    for h in [0.0, 60.0, 120.0, 180.0, 240.0, 300.0] {
        let rgb = hsv_to_rgb(h, 1.0, 1.0);
        let back = rgb_to_hsv(rgb);
        assert!(approx_eq(back.h, h), "h={h} back={}", back.h);
        assert_eq!(back.to_rgb(), rgb);
    }
}

// =============================================================
// hue_at / pointer_to_hsv
// =============================================================

#[test]
fn hue_at_cardinal_directions() {
    assert!(approx_eq(hue_at(1.0, 0.0), 0.0));
    assert!(approx_eq(hue_at(0.0, 1.0), 90.0));
    assert!(approx_eq(hue_at(-1.0, 0.0), 180.0));
    assert!(approx_eq(hue_at(0.0, -1.0), 270.0));
}

#[test]
fn hue_at_is_always_in_range() {
    for i in 0..64 {
        let a = f64::from(i) * 0.1;
        let h = hue_at(a.cos(), a.sin());
        assert!((0.0..360.0).contains(&h), "h={h}");
    }
}

#[test]
fn pointer_at_three_oclock_edge_is_pure_red() {
    let center = Point::new(100.0, 100.0);
    let hsv = pointer_to_hsv(Point::new(200.0, 100.0), center, 100.0);
    assert!(approx_eq(hsv.h, 0.0));
    assert!(approx_eq(hsv.s, 1.0));
    assert!(approx_eq(hsv.v, 1.0));
    assert_eq!(hsv.to_rgb(), Rgb8::new(255, 0, 0));
}

#[test]
fn pointer_near_center_has_zero_saturation() {
    let center = Point::new(50.0, 50.0);
    assert_eq!(pointer_to_hsv(center, center, 50.0).s, 0.0);
    assert_eq!(pointer_to_hsv(Point::new(51.0, 50.0), center, 50.0).s, 0.0);
    assert_eq!(pointer_to_hsv(Point::new(50.6, 50.6), center, 50.0).s, 0.0);
    assert!(pointer_to_hsv(Point::new(52.0, 50.0), center, 50.0).s > 0.0);
}

#[test]
fn pointer_saturation_grows_with_distance_and_clamps() {
    let center = Point::new(0.0, 0.0);
    let mut last = -1.0;
    for d in [2.0, 10.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
        let s = pointer_to_hsv(Point::new(d * 0.6, d * 0.8), center, 100.0).s;
        assert!(s > last, "d={d} s={s}");
        last = s;
    }
    assert!(approx_eq(last, 1.0));
    assert_eq!(pointer_to_hsv(Point::new(300.0, 0.0), center, 100.0).s, 1.0);
}

#[test]
fn pointer_hue_matches_atan2_angle() {
    let center = Point::new(10.0, 10.0);
    for deg in [15.0_f64, 95.0, 170.0, 225.0, 330.0] {
        let rad = deg.to_radians();
        let p = Point::new(center.x + 40.0 * rad.cos(), center.y + 40.0 * rad.sin());
        let hsv = pointer_to_hsv(p, center, 80.0);
        assert!((hsv.h - deg).abs() < 1e-6, "deg={deg} got={}", hsv.h);
        assert!(approx_eq(hsv.s, 0.5));
    }
}

#[test]
fn pointer_with_degenerate_radius_is_unsaturated() {
    let hsv = pointer_to_hsv(Point::new(10.0, 0.0), Point::new(0.0, 0.0), 0.0);
    assert_eq!(hsv.s, 0.0);
}

// =============================================================
// Rgb8 / Rgba8
// =============================================================

#[test]
fn rgb8_serializes_as_array() {
    let json = serde_json::to_string(&Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(json, "[1,2,3]");
    let back: Rgb8 = serde_json::from_str("[10,20,30]").unwrap();
    assert_eq!(back, Rgb8::new(10, 20, 30));
}

#[test]
fn rgba_conversions() {
    let c = Rgb8::new(9, 8, 7).with_alpha(6);
    assert_eq!(c, Rgba8::new(9, 8, 7, 6));
    assert_eq!(c.rgb(), Rgb8::new(9, 8, 7));
    assert_eq!(Rgba8::from(Rgb8::new(1, 1, 1)).a, 255);
}
