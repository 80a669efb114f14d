//! In-process device used by the simulator and tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::debug;

use super::{DeviceStatus, EffectCommand, LightCommand, LightingDevice, SegmentCommand};

/// Records every command instead of talking to hardware.
///
/// Setting the offline flag makes every call report a transport failure,
/// mirroring an unreachable controller.
#[derive(Debug, Default)]
pub struct DryRunDevice {
    history: Mutex<Vec<LightCommand>>,
    brightness: Mutex<u8>,
    offline: AtomicBool,
}

impl DryRunDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable controller.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of commands accepted so far.
    pub fn commands_sent(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    /// Copy of every accepted command, oldest first.
    pub fn history(&self) -> Vec<LightCommand> {
        self.history.lock().unwrap().clone()
    }

    fn record(&self, command: LightCommand) -> DeviceStatus {
        if self.offline.load(Ordering::SeqCst) {
            return DeviceStatus::error("cannot connect to device: simulated offline");
        }

        debug!("dry-run device accepted {:?}", command);
        if let LightCommand::Effect(effect) = &command {
            if let Some(brightness) = effect.brightness {
                *self.brightness.lock().unwrap() = brightness;
            }
        }
        self.history.lock().unwrap().push(command);

        let brightness = *self.brightness.lock().unwrap();
        DeviceStatus::ok(true, brightness, -1, -1)
    }
}

impl LightingDevice for DryRunDevice {
    fn apply_effect(&self, command: &EffectCommand) -> DeviceStatus {
        self.record(LightCommand::Effect(command.clone()))
    }

    fn apply_segments(&self, command: &SegmentCommand) -> DeviceStatus {
        self.record(LightCommand::Segments(command.clone()))
    }

    fn apply_preset(&self, preset_id: i32) -> DeviceStatus {
        self.record(LightCommand::Preset { preset_id })
    }

    fn query_status(&self) -> DeviceStatus {
        if self.offline.load(Ordering::SeqCst) {
            return DeviceStatus::error("cannot connect to device: simulated offline");
        }
        DeviceStatus::ok(true, *self.brightness.lock().unwrap(), -1, -1)
    }
}
