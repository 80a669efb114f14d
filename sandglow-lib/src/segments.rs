//! Wrap-around segment planning for localized strip tracking.

use std::f64::consts::TAU;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::SOLID_EFFECT;

const OFF: Rgb = Rgb::new(0, 0, 0);

/// A contiguous LED index range assigned one color and effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: u16,
    pub stop: u16,
    pub color: Rgb,
    pub effect_index: u8,
}

/// Error type for degenerate strip configurations.
#[derive(Debug, PartialEq, Eq)]
pub enum PlanError {
    NoLeds,
    ZeroWidth,
    WidthExceedsStrip { segment_width: u16, total_leds: u16 },
}

impl Display for PlanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLeds => write!(f, "strip has no LEDs"),
            Self::ZeroWidth => write!(f, "segment width must be at least 1"),
            Self::WidthExceedsStrip {
                segment_width,
                total_leds,
            } => write!(
                f,
                "segment width {} exceeds strip length {}",
                segment_width, total_leds
            ),
        }
    }
}

impl std::error::Error for PlanError {}

/// Map an angle to the LED index it faces on a strip of `total_leds`.
pub fn led_position(theta: f64, total_leds: u16) -> u16 {
    let normalized = theta.rem_euclid(TAU) / TAU;
    let index = (normalized * total_leds as f64) as u16;
    index.min(total_leds.saturating_sub(1))
}

/// Plan the lit/unlit partition of the strip for a tracked angle.
///
/// The lit arc is exactly `segment_width` LEDs wide, anchored `width / 2`
/// LEDs counter-clockwise of the LED facing `theta`, and may wrap across the
/// 0 index. The returned segments cover `[0, total_leds)` exactly once with
/// no overlaps; zero-length runs are dropped.
pub fn plan(
    theta: f64,
    total_leds: u16,
    segment_width: u16,
    color: Rgb,
) -> Result<Vec<Segment>, PlanError> {
    if total_leds == 0 {
        return Err(PlanError::NoLeds);
    }
    if segment_width == 0 {
        return Err(PlanError::ZeroWidth);
    }
    if segment_width > total_leds {
        return Err(PlanError::WidthExceedsStrip {
            segment_width,
            total_leds,
        });
    }

    let leds = total_leds as i32;
    let position = led_position(theta, total_leds) as i32;
    let half = (segment_width / 2) as i32;
    let start = (position - half).rem_euclid(leds);
    let stop = (start + segment_width as i32 - 1) % leds;

    let mut segments = Vec::with_capacity(3);
    let mut push = |from: i32, to: i32, color: Rgb| {
        if from <= to {
            segments.push(Segment {
                start: from as u16,
                stop: to as u16,
                color,
                effect_index: SOLID_EFFECT,
            });
        }
    };

    if start <= stop {
        push(0, start - 1, OFF);
        push(start, stop, color);
        push(stop + 1, leds - 1, OFF);
    } else {
        // Lit arc wraps across the 0/max boundary.
        push(0, stop, color);
        push(stop + 1, start - 1, OFF);
        push(start, leds - 1, color);
    }

    Ok(segments)
}
