//! Admission control for outbound lighting updates.

use crate::constants::{LOCALIZED_THROTTLE_FLOOR_MS, MOTION_OVERRIDE_DELTA};
use crate::sync::{SyncMode, SyncSettings};

/// Decides whether a position sample may produce a device command.
///
/// The gate remembers the last admitted sample so fast motion can bypass the
/// time throttle: a jump larger than [`MOTION_OVERRIDE_DELTA`] on either axis
/// is admitted regardless of elapsed time.
#[derive(Debug, Default)]
pub struct ThrottleGate {
    last_emit_ms: Option<u64>,
    last_theta: f64,
    last_rho: f64,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate a sample against the throttle rules.
    ///
    /// Admission updates the gate's memory; rejected samples leave it
    /// untouched.
    pub fn admit(&mut self, now_ms: u64, theta: f64, rho: f64, settings: &SyncSettings) -> bool {
        let admitted = match self.last_emit_ms {
            // Localized tracking favors responsiveness over device load.
            _ if settings.mode == SyncMode::Localized
                && settings.throttle_ms <= LOCALIZED_THROTTLE_FLOOR_MS =>
            {
                true
            }
            None => true,
            Some(last) if now_ms.saturating_sub(last) >= settings.throttle_ms => true,
            Some(_) => {
                (theta - self.last_theta).abs() > MOTION_OVERRIDE_DELTA
                    || (rho - self.last_rho).abs() > MOTION_OVERRIDE_DELTA
            }
        };

        if admitted {
            self.last_emit_ms = Some(now_ms);
            self.last_theta = theta;
            self.last_rho = rho;
        }

        admitted
    }

    /// Forget the last admitted sample.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
