//! Lane surface and ball material properties
//!
//! Both are pure data tables consulted by the physics step.

use serde::{Deserialize, Serialize};

/// Oil pattern on the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaneCondition {
    #[default]
    Normal,
    Dry,
    Oily,
}

/// Friction and hook response of a lane condition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneProps {
    /// Multiplier on forward speed
    pub friction: f32,
    /// Multiplier on hook
    pub hook_modifier: f32,
}

impl LaneCondition {
    pub const ALL: [LaneCondition; 3] = [LaneCondition::Normal, LaneCondition::Dry, LaneCondition::Oily];

    pub fn props(&self) -> LaneProps {
        match self {
            LaneCondition::Dry => LaneProps {
                friction: 1.05,
                hook_modifier: 1.5,
            },
            LaneCondition::Normal => LaneProps {
                friction: 1.0,
                hook_modifier: 1.0,
            },
            LaneCondition::Oily => LaneProps {
                friction: 0.92,
                hook_modifier: 0.5,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LaneCondition::Normal => "Normal",
            LaneCondition::Dry => "Dry",
            LaneCondition::Oily => "Oily",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(LaneCondition::Normal),
            "dry" => Some(LaneCondition::Dry),
            "oily" | "oil" => Some(LaneCondition::Oily),
            _ => None,
        }
    }
}

/// Ball coverstock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BallMaterial {
    #[default]
    Plastic,
    Urethane,
    Resin,
}

/// How a material grips the lane and transfers energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProps {
    pub hook_potential: f32,
    /// Lower restitution means more energy reaches the pins
    pub restitution: f32,
}

impl BallMaterial {
    pub fn props(&self) -> MaterialProps {
        match self {
            BallMaterial::Plastic => MaterialProps {
                hook_potential: 0.5,
                restitution: 0.8,
            },
            BallMaterial::Urethane => MaterialProps {
                hook_potential: 1.2,
                restitution: 0.6,
            },
            BallMaterial::Resin => MaterialProps {
                hook_potential: 2.0,
                restitution: 0.4,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallMaterial::Plastic => "Plastic",
            BallMaterial::Urethane => "Urethane",
            BallMaterial::Resin => "Resin",
        }
    }
}
