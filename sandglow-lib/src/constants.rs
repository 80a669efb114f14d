//! Shared defaults for sync and strip configuration.

/// Default minimum interval between accepted position samples (ms).
pub const DEFAULT_THROTTLE_MS: u64 = 50;

/// Default number of addressable LEDs on the strip.
pub const DEFAULT_TOTAL_LEDS: u16 = 60;

/// Default lit arc width for localized mode (LEDs).
pub const DEFAULT_SEGMENT_WIDTH: u16 = 8;

/// Default table speed persisted with the session.
pub const DEFAULT_SPEED: u32 = 130;

/// Position delta (radians for theta, normalized units for rho) above which a
/// sample bypasses the time throttle.
pub const MOTION_OVERRIDE_DELTA: f64 = 0.1;

/// Throttle setting at or below which localized mode admits every sample (ms).
pub const LOCALIZED_THROTTLE_FLOOR_MS: u64 = 10;

/// Device effect index for a solid color.
pub const SOLID_EFFECT: u8 = 0;

/// Device effect index for the scanner animation.
pub const SCANNER_EFFECT: u8 = 47;

/// Device effect index for the comet animation.
pub const COMET_EFFECT: u8 = 28;
