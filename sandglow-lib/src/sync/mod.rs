//! Strategy dispatch from position samples to lighting commands.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::constants::{
    COMET_EFFECT, DEFAULT_SEGMENT_WIDTH, DEFAULT_THROTTLE_MS, DEFAULT_TOTAL_LEDS, SCANNER_EFFECT,
    SOLID_EFFECT,
};
use crate::device::{
    dispatch, DeviceStatus, EffectCommand, LightCommand, LightingDevice, SegmentCommand,
};
use crate::segments::{self, PlanError};
use crate::throttle::ThrottleGate;

// Brightness floors per strategy; the ceiling is always full output.
const BASE_MIN_BRIGHTNESS: u8 = 30;
const TRACKING_MIN_BRIGHTNESS: u8 = 50;
const DEMO_MIN_BRIGHTNESS: u8 = 100;
const MAX_BRIGHTNESS: u8 = 255;

// Fixed animation parameters for the trail strategy.
const TRAIL_SPEED: u8 = 150;
const TRAIL_INTENSITY: u8 = 200;

// Hue advance over a full pattern in progress mode (degrees).
const PROGRESS_HUE_SWEEP: f64 = 120.0;

/// Lighting strategy selected for position sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Position,
    Speed,
    Progress,
    Trail,
    Demo,
    Localized,
}

impl Default for SyncMode {
    fn default() -> Self {
        SyncMode::Position
    }
}

impl Display for SyncMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SyncMode::Position => "position",
            SyncMode::Speed => "speed",
            SyncMode::Progress => "progress",
            SyncMode::Trail => "trail",
            SyncMode::Demo => "demo",
            SyncMode::Localized => "localized",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "position" => Ok(SyncMode::Position),
            "speed" => Ok(SyncMode::Speed),
            "progress" => Ok(SyncMode::Progress),
            "trail" => Ok(SyncMode::Trail),
            "demo" => Ok(SyncMode::Demo),
            "localized" => Ok(SyncMode::Localized),
            other => Err(format!("unknown sync mode: {}", other)),
        }
    }
}

/// Engine configuration, snapshotted at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub enabled: bool,
    pub mode: SyncMode,
    pub throttle_ms: u64,
    pub total_leds: u16,
    pub segment_width: u16,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: SyncMode::Position,
            throttle_ms: DEFAULT_THROTTLE_MS,
            total_leds: DEFAULT_TOTAL_LEDS,
            segment_width: DEFAULT_SEGMENT_WIDTH,
        }
    }
}

/// One position sample from the table's driving loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Angular position in radians; any real value.
    pub theta: f64,
    /// Radial position; intended domain `[0, 1]` but not guaranteed.
    pub rho: f64,
    /// Pattern completion in `[0, 1]`, when known.
    pub progress: Option<f64>,
    /// Signed movement speed, when known.
    pub speed: Option<f64>,
}

impl PositionSample {
    pub fn new(theta: f64, rho: f64) -> Self {
        Self {
            theta,
            rho,
            progress: None,
            speed: None,
        }
    }
}

/// Result of feeding one sample through the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Sync is switched off; the device was not consulted.
    Disabled,
    /// The sample was dropped by the throttle gate.
    Throttled,
    /// A command was dispatched; the status carries any transport failure.
    Sent(DeviceStatus),
}

/// Position-synchronized lighting engine.
///
/// Holds the throttle memory and configuration behind mutexes so ticks and
/// configuration changes may arrive from different threads; each tick works
/// from a settings snapshot taken at entry, so mutations become visible on
/// the next tick.
pub struct SyncEngine {
    device: Arc<dyn LightingDevice + Send + Sync>,
    settings: Mutex<SyncSettings>,
    gate: Mutex<ThrottleGate>,
    epoch: Instant,
}

impl SyncEngine {
    pub fn new(device: Arc<dyn LightingDevice + Send + Sync>) -> Self {
        Self::with_settings(device, SyncSettings::default())
    }

    pub fn with_settings(
        device: Arc<dyn LightingDevice + Send + Sync>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            device,
            settings: Mutex::new(settings),
            gate: Mutex::new(ThrottleGate::new()),
            epoch: Instant::now(),
        }
    }

    /// Current configuration snapshot.
    pub fn settings(&self) -> SyncSettings {
        *self.settings.lock().unwrap()
    }

    /// Enable or disable sync.
    pub fn set_enabled(&self, enabled: bool) {
        self.settings.lock().unwrap().enabled = enabled;
        info!(
            "position sync {}",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    /// Switch the lighting strategy.
    pub fn set_mode(&self, mode: SyncMode) {
        self.settings.lock().unwrap().mode = mode;
        info!("position sync mode set to {}", mode);
    }

    /// Set the minimum interval between accepted samples (ms).
    pub fn set_throttle_ms(&self, throttle_ms: u64) {
        self.settings.lock().unwrap().throttle_ms = throttle_ms;
    }

    /// Configure the strip geometry used by localized mode.
    pub fn set_strip(&self, total_leds: u16, segment_width: u16) {
        let mut settings = self.settings.lock().unwrap();
        settings.total_leds = total_leds;
        settings.segment_width = segment_width;
    }

    /// Feed one position sample through the engine.
    ///
    /// Never blocks on the device beyond the capability call itself and never
    /// propagates a fault; every outcome is reported in the return value.
    pub fn tick(&self, sample: &PositionSample) -> TickOutcome {
        let settings = *self.settings.lock().unwrap();
        if !settings.enabled {
            return TickOutcome::Disabled;
        }

        let now_ms = self.epoch.elapsed().as_millis() as u64;
        let admitted = self
            .gate
            .lock()
            .unwrap()
            .admit(now_ms, sample.theta, sample.rho, &settings);
        if !admitted {
            return TickOutcome::Throttled;
        }

        let command = build_command(sample, &settings);
        TickOutcome::Sent(dispatch(self.device.as_ref(), &command))
    }
}

/// Build the single command a sample produces under the given settings.
fn build_command(sample: &PositionSample, settings: &SyncSettings) -> LightCommand {
    match settings.mode {
        SyncMode::Position => position_command(sample),
        SyncMode::Speed => speed_command(sample),
        SyncMode::Progress => progress_command(sample),
        SyncMode::Trail => trail_command(sample),
        SyncMode::Demo => demo_command(sample),
        SyncMode::Localized => match localized_command(sample, settings) {
            Ok(command) => command,
            Err(err) => {
                warn!(
                    "segment planning failed ({}), falling back to position color",
                    err
                );
                position_command(sample)
            }
        },
    }
}

/// Solid color: hue from angle, brightness from radius, instant switch.
fn position_command(sample: &PositionSample) -> LightCommand {
    let hue = color::hue_from_theta(sample.theta);
    LightCommand::Effect(EffectCommand {
        effect_index: SOLID_EFFECT,
        primary: color::hsv_to_rgb(hue as f64, 1.0, 1.0),
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            BASE_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        transition_ticks: 0,
        ..EffectCommand::default()
    })
}

/// Scanner animation whose pace and intensity scale with movement speed.
fn speed_command(sample: &PositionSample) -> LightCommand {
    let hue = color::hue_from_theta(sample.theta);
    let speed = sample.speed.unwrap_or(0.0).abs();
    LightCommand::Effect(EffectCommand {
        effect_index: SCANNER_EFFECT,
        primary: color::hsv_to_rgb(hue as f64, 1.0, 1.0),
        speed: Some(scale_to_byte(speed * 50.0)),
        intensity: Some(scale_to_byte(speed * 100.0)),
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            TRACKING_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        ..EffectCommand::default()
    })
}

/// Solid color with the hue advanced by pattern completion.
fn progress_command(sample: &PositionSample) -> LightCommand {
    let progress = sample.progress.unwrap_or(0.0).clamp(0.0, 1.0);
    let base_hue = color::hue_from_theta(sample.theta) as u32;
    let shifted = (base_hue + (progress * PROGRESS_HUE_SWEEP) as u32) % 360;
    LightCommand::Effect(EffectCommand {
        effect_index: SOLID_EFFECT,
        primary: color::hsv_to_rgb(shifted as f64, 1.0, 1.0),
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            BASE_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        ..EffectCommand::default()
    })
}

/// Comet animation trailing the tracked position.
fn trail_command(sample: &PositionSample) -> LightCommand {
    let hue = color::hue_from_theta(sample.theta);
    LightCommand::Effect(EffectCommand {
        effect_index: COMET_EFFECT,
        primary: color::hsv_to_rgb(hue as f64, 1.0, 1.0),
        speed: Some(TRAIL_SPEED),
        intensity: Some(TRAIL_INTENSITY),
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            BASE_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        ..EffectCommand::default()
    })
}

/// High-contrast discrete color, intended for showroom visibility.
fn demo_command(sample: &PositionSample) -> LightCommand {
    let hue = color::hue_from_theta(sample.theta);
    LightCommand::Effect(EffectCommand {
        effect_index: SOLID_EFFECT,
        primary: color::sextant_color(hue),
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            DEMO_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        transition_ticks: 0,
        ..EffectCommand::default()
    })
}

/// Lit arc around the tracked position, rest of the strip dark.
fn localized_command(
    sample: &PositionSample,
    settings: &SyncSettings,
) -> Result<LightCommand, PlanError> {
    let hue = color::hue_from_theta(sample.theta);
    let lit = color::hsv_to_rgb(hue as f64, 1.0, 1.0);
    let segments = segments::plan(sample.theta, settings.total_leds, settings.segment_width, lit)?;

    Ok(LightCommand::Segments(SegmentCommand {
        segments,
        brightness: Some(color::brightness_from_rho(
            sample.rho,
            TRACKING_MIN_BRIGHTNESS,
            MAX_BRIGHTNESS,
        )),
        transition_ticks: 0,
    }))
}

fn scale_to_byte(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::device::dry_run::DryRunDevice;

    fn engine(settings: SyncSettings) -> (Arc<DryRunDevice>, SyncEngine) {
        let device = Arc::new(DryRunDevice::new());
        let engine = SyncEngine::with_settings(device.clone(), settings);
        (device, engine)
    }

    fn enabled(mode: SyncMode) -> SyncSettings {
        SyncSettings {
            enabled: true,
            mode,
            ..SyncSettings::default()
        }
    }

    #[test]
    fn disabled_engine_never_touches_the_device() {
        let (device, engine) = engine(SyncSettings::default());

        let outcome = engine.tick(&PositionSample::new(1.0, 0.5));

        assert_eq!(outcome, TickOutcome::Disabled);
        assert_eq!(device.commands_sent(), 0);
    }

    #[test]
    fn position_mode_sends_red_at_theta_zero() {
        let (device, engine) = engine(enabled(SyncMode::Position));

        let outcome = engine.tick(&PositionSample::new(0.0, 1.0));
        assert!(matches!(outcome, TickOutcome::Sent(status) if status.connected));

        let history = device.history();
        assert_eq!(history.len(), 1);
        match &history[0] {
            LightCommand::Effect(command) => {
                assert_eq!(command.effect_index, SOLID_EFFECT);
                assert_eq!(command.primary, Rgb::new(255, 0, 0));
                assert_eq!(command.brightness, Some(255));
                assert_eq!(command.transition_ticks, 0);
            }
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn position_mode_uses_floor_brightness_at_center() {
        let (device, engine) = engine(enabled(SyncMode::Position));

        engine.tick(&PositionSample::new(std::f64::consts::PI, 0.0));

        match &device.history()[0] {
            LightCommand::Effect(command) => assert_eq!(command.brightness, Some(30)),
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn second_tick_inside_the_window_is_throttled() {
        let (device, engine) = engine(SyncSettings {
            throttle_ms: 10_000,
            ..enabled(SyncMode::Position)
        });

        assert!(matches!(
            engine.tick(&PositionSample::new(1.0, 0.5)),
            TickOutcome::Sent(_)
        ));
        assert_eq!(
            engine.tick(&PositionSample::new(1.01, 0.5)),
            TickOutcome::Throttled
        );
        assert_eq!(device.commands_sent(), 1);
    }

    #[test]
    fn significant_motion_beats_the_window() {
        let (device, engine) = engine(SyncSettings {
            throttle_ms: 10_000,
            ..enabled(SyncMode::Position)
        });

        engine.tick(&PositionSample::new(1.0, 0.5));
        assert!(matches!(
            engine.tick(&PositionSample::new(1.5, 0.5)),
            TickOutcome::Sent(_)
        ));
        assert_eq!(device.commands_sent(), 2);
    }

    #[test]
    fn speed_mode_scales_and_saturates() {
        let (device, engine) = engine(enabled(SyncMode::Speed));

        engine.tick(&PositionSample {
            speed: Some(-2.0),
            ..PositionSample::new(0.0, 1.0)
        });

        match &device.history()[0] {
            LightCommand::Effect(command) => {
                assert_eq!(command.effect_index, SCANNER_EFFECT);
                assert_eq!(command.speed, Some(100));
                assert_eq!(command.intensity, Some(200));
            }
            other => panic!("expected effect command, got {:?}", other),
        }

        // A large speed must clip at full scale, not wrap.
        engine.set_throttle_ms(0);
        engine.tick(&PositionSample {
            speed: Some(40.0),
            ..PositionSample::new(1.0, 1.0)
        });
        match device.history().last().unwrap() {
            LightCommand::Effect(command) => {
                assert_eq!(command.speed, Some(255));
                assert_eq!(command.intensity, Some(255));
            }
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn progress_mode_shifts_the_hue() {
        let (device, engine) = engine(enabled(SyncMode::Progress));

        engine.tick(&PositionSample {
            progress: Some(1.0),
            ..PositionSample::new(0.0, 1.0)
        });

        match &device.history()[0] {
            // Base hue 0 shifted by the full 120 degree sweep lands on green.
            LightCommand::Effect(command) => assert_eq!(command.primary, Rgb::new(0, 255, 0)),
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn trail_mode_uses_fixed_animation_parameters() {
        let (device, engine) = engine(enabled(SyncMode::Trail));

        engine.tick(&PositionSample::new(2.0, 0.5));

        match &device.history()[0] {
            LightCommand::Effect(command) => {
                assert_eq!(command.effect_index, COMET_EFFECT);
                assert_eq!(command.speed, Some(TRAIL_SPEED));
                assert_eq!(command.intensity, Some(TRAIL_INTENSITY));
            }
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn demo_mode_uses_discrete_colors_and_high_floor() {
        let (device, engine) = engine(enabled(SyncMode::Demo));

        engine.tick(&PositionSample::new(0.0, 0.0));

        match &device.history()[0] {
            LightCommand::Effect(command) => {
                assert_eq!(command.primary, Rgb::new(255, 0, 0));
                assert_eq!(command.brightness, Some(100));
            }
            other => panic!("expected effect command, got {:?}", other),
        }
    }

    #[test]
    fn localized_mode_emits_a_segment_plan() {
        let (device, engine) = engine(enabled(SyncMode::Localized));

        engine.tick(&PositionSample::new(0.0, 1.0));

        match &device.history()[0] {
            LightCommand::Segments(command) => {
                assert_eq!(command.brightness, Some(255));
                let covered: u16 = command
                    .segments
                    .iter()
                    .map(|segment| segment.stop - segment.start + 1)
                    .sum();
                assert_eq!(covered, 60);
            }
            other => panic!("expected segment command, got {:?}", other),
        }
    }

    #[test]
    fn localized_planner_failure_falls_back_to_position_color() {
        let (device, engine) = engine(SyncSettings {
            total_leds: 60,
            segment_width: 0,
            ..enabled(SyncMode::Localized)
        });

        let outcome = engine.tick(&PositionSample::new(0.0, 1.0));

        assert!(matches!(outcome, TickOutcome::Sent(status) if status.connected));
        match &device.history()[0] {
            LightCommand::Effect(command) => assert_eq!(command.effect_index, SOLID_EFFECT),
            other => panic!("expected fallback effect command, got {:?}", other),
        }
    }

    #[test]
    fn transport_failure_is_reported_not_raised() {
        let (device, engine) = engine(enabled(SyncMode::Position));
        device.set_offline(true);

        match engine.tick(&PositionSample::new(0.0, 1.0)) {
            TickOutcome::Sent(status) => assert!(!status.connected),
            other => panic!("expected sent outcome, got {:?}", other),
        }
    }

    #[test]
    fn mode_change_applies_on_the_next_tick() {
        let (device, engine) = engine(SyncSettings {
            throttle_ms: 0,
            ..enabled(SyncMode::Position)
        });

        engine.tick(&PositionSample::new(0.0, 1.0));
        engine.set_mode(SyncMode::Trail);
        engine.tick(&PositionSample::new(0.0, 1.0));

        let history = device.history();
        match (&history[0], &history[1]) {
            (LightCommand::Effect(first), LightCommand::Effect(second)) => {
                assert_eq!(first.effect_index, SOLID_EFFECT);
                assert_eq!(second.effect_index, COMET_EFFECT);
            }
            other => panic!("expected two effect commands, got {:?}", other),
        }
    }

    #[test]
    fn mode_parsing_round_trips_and_rejects_unknown() {
        for mode in [
            SyncMode::Position,
            SyncMode::Speed,
            SyncMode::Progress,
            SyncMode::Trail,
            SyncMode::Demo,
            SyncMode::Localized,
        ] {
            assert_eq!(mode.to_string().parse::<SyncMode>(), Ok(mode));
        }
        assert!("rainbow".parse::<SyncMode>().is_err());
    }
}
