//! Game settings and preferences
//!
//! Persisted separately from the profile under their own storage key.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, MAX_TRAIL_LENGTH};
use crate::sim::{BallMaterial, EffectsConfig, LaneCondition, ThrowMode};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 128,
            QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Lane ===
    pub lane_condition: LaneCondition,
    /// Ball coverstock used by human bowlers
    pub ball_material: BallMaterial,
    pub throw_mode: ThrowMode,

    // === Visual Effects ===
    /// Screen shake on pin impacts
    pub screen_shake: bool,
    /// Ball trail
    pub trails: bool,
    /// Impact sparks and strike bursts
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            lane_condition: LaneCondition::Normal,
            ball_material: BallMaterial::Plastic,
            throw_mode: ThrowMode::Simplified,

            screen_shake: true,
            trails: true,
            particles: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key / file name
    pub const STORAGE_KEY: &'static str = "lane_shark_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail length in points
    pub fn trail_length(&self) -> usize {
        if !self.trails {
            0
        } else {
            ((MAX_TRAIL_LENGTH as f32 * self.quality.trail_quality()).round() as usize).max(1)
        }
    }

    /// Effect caps handed to the simulation
    pub fn effects(&self) -> EffectsConfig {
        EffectsConfig {
            max_particles: self.max_particles(),
            trail_length: self.trail_length(),
            screen_shake: self.effective_screen_shake(),
        }
    }

    /// Load settings from storage, or defaults
    pub fn load() -> Self {
        crate::persistence::load(Self::STORAGE_KEY)
    }

    pub fn save(&self) -> Result<(), crate::persistence::PersistError> {
        crate::persistence::save(Self::STORAGE_KEY, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert!(settings.effects().screen_shake);
        settings.reduced_motion = true;
        assert!(!settings.effects().screen_shake);
    }

    #[test]
    fn test_effect_caps_follow_preset() {
        let high = Settings::from_preset(QualityPreset::High).effects();
        let low = Settings::from_preset(QualityPreset::Low).effects();
        assert_eq!(high.max_particles, MAX_PARTICLES);
        assert_eq!(high.trail_length, MAX_TRAIL_LENGTH);
        assert!(low.max_particles < high.max_particles);
        assert!(low.trail_length < high.trail_length);

        let off = Settings {
            particles: false,
            trails: false,
            ..Settings::default()
        };
        assert_eq!(off.effects().max_particles, 0);
        assert_eq!(off.effects().trail_length, 0);
    }

    #[test]
    fn test_partial_settings_json() {
        let settings: Settings = serde_json::from_str(r#"{"lane_condition": "OILY", "quality": "High"}"#).unwrap();
        assert_eq!(settings.lane_condition, LaneCondition::Oily);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.particles);
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }
}
