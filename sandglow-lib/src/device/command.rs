//! Command payloads accepted by a lighting device.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::segments::Segment;

/// Highest effect index understood by the device firmware.
pub const MAX_EFFECT_INDEX: u8 = 101;

/// Highest palette index understood by the device firmware.
pub const MAX_PALETTE_INDEX: u8 = 46;

/// Solid-color or animated effect parameters.
///
/// Channel, brightness, speed, and intensity ranges are enforced by the `u8`
/// field types; only the effect and palette indices need explicit validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectCommand {
    pub effect_index: u8,
    pub primary: Rgb,
    pub secondary: Option<Rgb>,
    pub white: Option<u8>,
    pub brightness: Option<u8>,
    pub speed: Option<u8>,
    pub intensity: Option<u8>,
    pub palette: Option<u8>,
    /// Crossfade duration in 100 ms device ticks; 0 switches instantly.
    pub transition_ticks: u8,
}

/// Multi-segment command for localized tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentCommand {
    pub segments: Vec<Segment>,
    pub brightness: Option<u8>,
    pub transition_ticks: u8,
}

/// Logical union of everything the engine can ask a device to do.
///
/// Ephemeral: constructed, dispatched, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightCommand {
    Effect(EffectCommand),
    Preset { preset_id: i32 },
    Segments(SegmentCommand),
}

impl LightCommand {
    /// Check parameter ranges the type system does not already enforce.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            LightCommand::Effect(command) => {
                if command.effect_index > MAX_EFFECT_INDEX {
                    return Err(format!(
                        "effect index must be between 0 and {}",
                        MAX_EFFECT_INDEX
                    ));
                }
                if let Some(palette) = command.palette {
                    if palette > MAX_PALETTE_INDEX {
                        return Err(format!(
                            "palette index must be between 0 and {}",
                            MAX_PALETTE_INDEX
                        ));
                    }
                }
                Ok(())
            }
            LightCommand::Preset { .. } => Ok(()),
            LightCommand::Segments(command) => {
                if command.segments.is_empty() {
                    return Err("segment command must contain at least one segment".to_string());
                }
                for segment in &command.segments {
                    if segment.start > segment.stop {
                        return Err(format!(
                            "segment start {} exceeds stop {}",
                            segment.start, segment.stop
                        ));
                    }
                    if segment.effect_index > MAX_EFFECT_INDEX {
                        return Err(format!(
                            "effect index must be between 0 and {}",
                            MAX_EFFECT_INDEX
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_effect_command_is_valid() {
        let command = LightCommand::Effect(EffectCommand::default());
        assert!(command.validate().is_ok());
    }

    #[test]
    fn effect_index_out_of_range_is_rejected() {
        let command = LightCommand::Effect(EffectCommand {
            effect_index: 102,
            ..EffectCommand::default()
        });
        assert!(command.validate().is_err());
    }

    #[test]
    fn palette_out_of_range_is_rejected() {
        let command = LightCommand::Effect(EffectCommand {
            palette: Some(47),
            ..EffectCommand::default()
        });
        assert!(command.validate().is_err());
    }

    #[test]
    fn inverted_segment_is_rejected() {
        let command = LightCommand::Segments(SegmentCommand {
            segments: vec![Segment {
                start: 5,
                stop: 4,
                color: Rgb::new(255, 0, 0),
                effect_index: 0,
            }],
            ..SegmentCommand::default()
        });
        assert!(command.validate().is_err());
    }

    #[test]
    fn empty_segment_command_is_rejected() {
        let command = LightCommand::Segments(SegmentCommand::default());
        assert!(command.validate().is_err());
    }
}
