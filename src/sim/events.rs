//! Roll classification, streak tiers and outbound game events

use serde::{Deserialize, Serialize};

use super::state::{GameMode, Pin};
use super::throw::LaunchParams;
use crate::consts::*;

/// What happened on a single roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollEvent {
    Strike,
    Spare { pins: u8 },
    Gutter,
    OpenFrame { pins: u8, remaining: u8 },
    /// Open roll leaving a wide gap with the head pin gone
    Split { pins: u8, standing: Vec<u8> },
}

impl RollEvent {
    pub fn is_strike(&self) -> bool {
        matches!(self, RollEvent::Strike)
    }

    pub fn is_spare(&self) -> bool {
        matches!(self, RollEvent::Spare { .. })
    }

    /// HUD banner
    pub fn banner(&self) -> String {
        match self {
            RollEvent::Strike => String::from("STRIKE!"),
            RollEvent::Spare { .. } => String::from("SPARE!"),
            RollEvent::Gutter => String::from("GUTTER BALL"),
            RollEvent::OpenFrame { pins, .. } => format!("{} PINS", pins),
            RollEvent::Split { .. } => String::from("SPLIT!"),
        }
    }
}

/// Classify a completed roll
///
/// Precedence is strike, spare, gutter, open; a split is an open roll that
/// also satisfies the split heuristic.
pub fn classify_roll(standing_before: u8, knocked: u8, standing_after: &[Pin]) -> RollEvent {
    let remaining = standing_before.saturating_sub(knocked);
    if standing_before == PINS_PER_RACK && knocked >= PINS_PER_RACK {
        RollEvent::Strike
    } else if standing_before < PINS_PER_RACK && remaining == 0 {
        RollEvent::Spare { pins: knocked }
    } else if knocked == 0 {
        RollEvent::Gutter
    } else if is_split(standing_before, standing_after) {
        RollEvent::Split {
            pins: knocked,
            standing: standing_after.iter().map(|p| p.id).collect(),
        }
    } else {
        RollEvent::OpenFrame { pins: knocked, remaining }
    }
}

/// Split heuristic
///
/// Never on a full-rack roll. Needs two or more pins standing, the head pin
/// gone, and the standing pins spread wider than half the lane.
pub fn is_split(standing_before: u8, standing_after: &[Pin]) -> bool {
    if standing_before >= PINS_PER_RACK || standing_after.len() < 2 {
        return false;
    }
    if standing_after.iter().any(|p| p.id == 1) {
        return false;
    }
    let min_x = standing_after.iter().map(|p| p.pos.x).fold(f32::INFINITY, f32::min);
    let max_x = standing_after.iter().map(|p| p.pos.x).fold(f32::NEG_INFINITY, f32::max);
    max_x - min_x > LANE_WIDTH * 0.5
}

/// Consecutive-strike reward tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakTier {
    pub count: u32,
    pub name: &'static str,
    pub multiplier: f32,
}

pub const STREAK_TIERS: [StreakTier; 11] = [
    StreakTier { count: 2, name: "Double!", multiplier: 1.5 },
    StreakTier { count: 3, name: "Turkey!", multiplier: 2.0 },
    StreakTier { count: 4, name: "Four-Bagger!", multiplier: 2.5 },
    StreakTier { count: 5, name: "Five-Bagger!", multiplier: 3.0 },
    StreakTier { count: 6, name: "Six-Pack!", multiplier: 3.5 },
    StreakTier { count: 7, name: "Lucky Seven!", multiplier: 4.0 },
    StreakTier { count: 8, name: "Octuple!", multiplier: 4.5 },
    StreakTier { count: 9, name: "Golden Nine!", multiplier: 5.0 },
    StreakTier { count: 10, name: "PERFECT TEN!", multiplier: 6.0 },
    StreakTier { count: 11, name: "LEGENDARY!", multiplier: 8.0 },
    StreakTier { count: 12, name: "PERFECT GAME!", multiplier: 10.0 },
];

/// Tier for a streak length; anything past twelve stays at the top tier
pub fn streak_tier(count: u32) -> Option<&'static StreakTier> {
    if count < 2 {
        return None;
    }
    let capped = count.min(12);
    STREAK_TIERS.iter().find(|t| t.count == capped)
}

/// Reward multiplier for a streak (1.0 below a double)
pub fn streak_multiplier(count: u32) -> f32 {
    streak_tier(count).map(|t| t.multiplier).unwrap_or(1.0)
}

/// Celebration overlay the presentation layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Celebration {
    Strike,
    Turkey,
    Spare,
    Split,
    Gutter,
    Perfect,
}

/// Everything known about a roll once the pins have settled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Index into the roster
    pub player: usize,
    pub pins_knocked: u8,
    pub event: RollEvent,
    pub streak_count: u32,
    pub frame_number: u8,
    pub total_score: u32,
}

impl RollOutcome {
    pub fn streak_tier(&self) -> Option<&'static StreakTier> {
        streak_tier(self.streak_count)
    }

    pub fn celebration(&self) -> Option<Celebration> {
        match &self.event {
            RollEvent::Strike if self.streak_count >= 12 => Some(Celebration::Perfect),
            RollEvent::Strike if self.streak_count >= 3 => Some(Celebration::Turkey),
            RollEvent::Strike => Some(Celebration::Strike),
            RollEvent::Spare { .. } => Some(Celebration::Spare),
            RollEvent::Split { .. } => Some(Celebration::Split),
            RollEvent::Gutter => Some(Celebration::Gutter),
            RollEvent::OpenFrame { .. } => None,
        }
    }
}

/// Notifications drained by the session owner after each update
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted { mode: GameMode },
    BallReleased { player: usize, launch: LaunchParams },
    /// Ball dropped into a gutter mid-roll
    BallInGutter { player: usize },
    RollCompleted(RollOutcome),
    TurnChanged { player: usize },
    GameOver { scores: Vec<u32> },
    ReturnedToMenu,
}
