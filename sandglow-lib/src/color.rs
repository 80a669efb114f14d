//! Pure mappings from table coordinates to hue, brightness, and RGB.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Map an angular position (radians) to an HSV hue in `[0, 360)`.
///
/// The angle is normalized into `[0, 2π)` first, so negative input maps the
/// same as its positive equivalent and the result is periodic with period 2π.
pub fn hue_from_theta(theta: f64) -> u16 {
    let normalized = theta.rem_euclid(TAU);
    let hue = (normalized / TAU * 360.0) as u16;
    hue.min(359)
}

/// Map a radial position to a brightness in `[min_b, max_b]`.
///
/// `rho` is clamped to `[0, 1]` before interpolation; 0 maps to the floor and
/// 1 to the ceiling.
pub fn brightness_from_rho(rho: f64, min_b: u8, max_b: u8) -> u8 {
    let rho = rho.clamp(0.0, 1.0);
    let span = max_b.saturating_sub(min_b) as f64;
    min_b + (rho * span) as u8
}

/// Convert HSV (hue in degrees, saturation and value in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(hue_deg: f64, saturation: f64, value: f64) -> Rgb {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb::new(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Discrete pure color for the demo strategy, chosen by 60-degree sextant.
///
/// Deliberately low fidelity: the continuous HSV wheel is collapsed to six
/// high-contrast colors.
pub fn sextant_color(hue_deg: u16) -> Rgb {
    match (hue_deg % 360) / 60 {
        0 => Rgb::new(255, 0, 0),
        1 => Rgb::new(255, 255, 0),
        2 => Rgb::new(0, 255, 0),
        3 => Rgb::new(0, 255, 255),
        4 => Rgb::new(0, 0, 255),
        _ => Rgb::new(255, 0, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn hue_stays_in_range() {
        for i in -100..100 {
            let theta = i as f64 * 0.37;
            let hue = hue_from_theta(theta);
            assert!(hue < 360, "hue {} out of range for theta {}", hue, theta);
        }
    }

    #[test]
    fn hue_is_periodic() {
        for &theta in &[0.0, 0.5, 1.0, 3.0, -2.5] {
            assert_eq!(hue_from_theta(theta), hue_from_theta(theta + TAU));
        }
    }

    #[test]
    fn hue_anchor_points() {
        assert_eq!(hue_from_theta(0.0), 0);
        assert_eq!(hue_from_theta(PI), 180);
        assert_eq!(hue_from_theta(-PI), 180);
    }

    #[test]
    fn brightness_clamps_out_of_range_rho() {
        assert_eq!(brightness_from_rho(-0.5, 30, 255), brightness_from_rho(0.0, 30, 255));
        assert_eq!(brightness_from_rho(1.5, 30, 255), brightness_from_rho(1.0, 30, 255));
        assert_eq!(brightness_from_rho(0.0, 30, 255), 30);
        assert_eq!(brightness_from_rho(1.0, 30, 255), 255);
    }

    #[test]
    fn brightness_is_monotone() {
        let mut previous = 0;
        for i in 0..=100 {
            let brightness = brightness_from_rho(i as f64 / 100.0, 50, 255);
            assert!(brightness >= previous);
            previous = brightness;
        }
    }

    #[test]
    fn primary_hues_convert_to_pure_channels() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn zero_value_is_black() {
        assert_eq!(hsv_to_rgb(200.0, 1.0, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn sextants_cover_the_wheel() {
        assert_eq!(sextant_color(10), Rgb::new(255, 0, 0));
        assert_eq!(sextant_color(70), Rgb::new(255, 255, 0));
        assert_eq!(sextant_color(130), Rgb::new(0, 255, 0));
        assert_eq!(sextant_color(190), Rgb::new(0, 255, 255));
        assert_eq!(sextant_color(250), Rgb::new(0, 0, 255));
        assert_eq!(sextant_color(310), Rgb::new(255, 0, 255));
    }
}
