//! Lighting device capability consumed by the sync engine.
//!
//! Transport and validation failures are carried in-band as
//! `connected: false` statuses; calls through this boundary never panic into
//! the driving loop.

mod command;
pub mod dry_run;

pub use command::{
    EffectCommand, LightCommand, SegmentCommand, MAX_EFFECT_INDEX, MAX_PALETTE_INDEX,
};

use serde::{Deserialize, Serialize};

/// Status reported by a lighting device after any operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub connected: bool,
    pub is_on: bool,
    pub brightness: u8,
    pub preset_id: i32,
    pub playlist_id: i32,
    pub message: String,
}

impl DeviceStatus {
    /// Successful status with the device's reported levels.
    pub fn ok(is_on: bool, brightness: u8, preset_id: i32, playlist_id: i32) -> Self {
        Self {
            connected: true,
            is_on,
            brightness,
            preset_id,
            playlist_id,
            message: if is_on {
                "device is on".to_string()
            } else {
                "device is off".to_string()
            },
        }
    }

    /// Failure status carrying a human-readable reason.
    pub fn error<T: Into<String>>(message: T) -> Self {
        Self {
            connected: false,
            is_on: false,
            brightness: 0,
            preset_id: -1,
            playlist_id: -1,
            message: message.into(),
        }
    }
}

/// Capability interface for an addressable lighting controller.
pub trait LightingDevice {
    fn apply_effect(&self, command: &EffectCommand) -> DeviceStatus;
    fn apply_segments(&self, command: &SegmentCommand) -> DeviceStatus;
    fn apply_preset(&self, preset_id: i32) -> DeviceStatus;
    fn query_status(&self) -> DeviceStatus;
}

/// Validate a command, then forward it to a device.
///
/// Out-of-range parameters are rejected before any transport is attempted.
pub fn dispatch(device: &dyn LightingDevice, command: &LightCommand) -> DeviceStatus {
    if let Err(message) = command.validate() {
        return DeviceStatus::error(message);
    }

    match command {
        LightCommand::Effect(effect) => device.apply_effect(effect),
        LightCommand::Segments(segments) => device.apply_segments(segments),
        LightCommand::Preset { preset_id } => device.apply_preset(*preset_id),
    }
}

#[cfg(test)]
mod tests {
    use super::dry_run::DryRunDevice;
    use super::*;

    #[test]
    fn invalid_command_never_reaches_the_device() {
        let device = DryRunDevice::new();
        let command = LightCommand::Effect(EffectCommand {
            effect_index: 200,
            ..EffectCommand::default()
        });

        let status = dispatch(&device, &command);

        assert!(!status.connected);
        assert_eq!(device.commands_sent(), 0);
    }

    #[test]
    fn valid_command_is_recorded() {
        let device = DryRunDevice::new();
        let command = LightCommand::Preset { preset_id: 2 };

        let status = dispatch(&device, &command);

        assert!(status.connected);
        assert_eq!(device.commands_sent(), 1);
    }

    #[test]
    fn offline_device_reports_transport_failure() {
        let device = DryRunDevice::new();
        device.set_offline(true);

        let status = dispatch(&device, &LightCommand::Preset { preset_id: 1 });

        assert!(!status.connected);
        assert_eq!(device.commands_sent(), 0);
    }
}
