//! CPU opponents
//!
//! A personality is just a few numbers; [`plan_throw`] turns it into a
//! position and launch with jitter that shrinks as difficulty rises.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::throw::LaunchParams;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuPersonality {
    pub id: String,
    pub name: String,
    /// 0 (wild) to 1 (machine-like)
    pub difficulty: f32,
    /// Preferred spin; the start position offsets against it so the hook comes back
    pub spin_preference: f32,
    pub power_preference: f32,
    pub description: String,
}

impl CpuPersonality {
    fn new(id: &str, name: &str, difficulty: f32, spin: f32, power: f32, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            difficulty,
            spin_preference: spin,
            power_preference: power,
            description: description.to_string(),
        }
    }

    /// The built-in opponent roster, easiest first
    pub fn roster() -> Vec<CpuPersonality> {
        vec![
            Self::new("gus", "Gutter Gus", 0.2, 0.0, 0.8, "Just here for the nachos."),
            Self::new("hannah", "Hooking Hannah", 0.6, 0.3, 1.0, "Loves a big curve."),
            Self::new("sid", "Spin Doctor Sid", 0.85, -0.45, 1.2, "Lefty with a wicked hook."),
            Self::new("klaus", "Kingpin Klaus", 0.98, 0.1, 1.4, "The undisputed champion."),
        ]
    }

    pub fn by_id(id: &str) -> Option<CpuPersonality> {
        Self::roster().into_iter().find(|p| p.id == id)
    }
}

/// Everything the CPU decides before a throw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuThrow {
    pub position_x: f32,
    pub launch: LaunchParams,
}

/// Plan a throw for a personality
pub fn plan_throw(personality: &CpuPersonality, rng: &mut impl Rng) -> CpuThrow {
    let jitter = (1.0 - personality.difficulty.clamp(0.0, 1.0)) * 2.0;

    let position_x = (-personality.spin_preference * 100.0 + (rng.random::<f32>() - 0.5) * 40.0 * jitter).clamp(-120.0, 120.0);
    let angle_deg = (rng.random::<f32>() - 0.5) * jitter * 5.0;
    let spin = personality.spin_preference + (rng.random::<f32>() - 0.5) * jitter * 0.2;
    let weight = if personality.power_preference > 1.2 {
        BALL_WEIGHT_HEAVY
    } else {
        BALL_WEIGHT_NORMAL
    };

    CpuThrow {
        position_x,
        launch: LaunchParams {
            angle_deg,
            spin,
            power: personality.power_preference,
            weight,
        }
        .clamped(),
    }
}
