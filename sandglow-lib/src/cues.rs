//! Canned device cues for machine lifecycle moments.

use std::thread::sleep;
use std::time::Duration;

use crate::color::Rgb;
use crate::constants::{SCANNER_EFFECT, SOLID_EFFECT};
use crate::device::{dispatch, DeviceStatus, EffectCommand, LightCommand, LightingDevice};

/// Device preset holding the idle animation.
pub const IDLE_PRESET: i32 = 1;

/// Device preset holding the playing animation.
pub const PLAYING_PRESET: i32 = 2;

const AMBER: Rgb = Rgb::new(255, 160, 0);
const GREEN: Rgb = Rgb::new(8, 255, 0);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Amber scanner shown while a pattern is loading.
pub fn loading(device: &dyn LightingDevice) -> DeviceStatus {
    dispatch(
        device,
        &LightCommand::Effect(EffectCommand {
            effect_index: SCANNER_EFFECT,
            primary: AMBER,
            secondary: Some(BLACK),
            palette: Some(0),
            speed: Some(150),
            intensity: Some(150),
            ..EffectCommand::default()
        }),
    )
}

/// Switch to the idle preset.
pub fn idle(device: &dyn LightingDevice) -> DeviceStatus {
    dispatch(
        device,
        &LightCommand::Preset {
            preset_id: IDLE_PRESET,
        },
    )
}

/// Switch to the playing preset.
pub fn playing(device: &dyn LightingDevice) -> DeviceStatus {
    dispatch(
        device,
        &LightCommand::Preset {
            preset_id: PLAYING_PRESET,
        },
    )
}

/// Double green blink acknowledging a fresh connection, ending on the idle
/// preset.
///
/// Blocks for roughly 2.5 seconds while the blinks play out; callers that
/// must not block should run it on a worker thread. Returns the status of
/// the second blink so callers can tell whether the device acknowledged the
/// cue.
pub fn connected(device: &dyn LightingDevice) -> DeviceStatus {
    let blink = LightCommand::Effect(EffectCommand {
        effect_index: SOLID_EFFECT,
        primary: GREEN,
        brightness: Some(100),
        ..EffectCommand::default()
    });
    let dark = LightCommand::Effect(EffectCommand {
        effect_index: SOLID_EFFECT,
        brightness: Some(0),
        ..EffectCommand::default()
    });

    dispatch(device, &blink);
    sleep(Duration::from_secs(1));
    dispatch(device, &dark);
    sleep(Duration::from_millis(500));
    let status = dispatch(device, &blink);
    sleep(Duration::from_secs(1));
    idle(device);
    status
}
