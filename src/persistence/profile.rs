//! Profile and inventory record
//!
//! Stored as one JSON blob. Fields this crate does not model (shop,
//! achievements, avatar, daily challenges) are kept in `extra` maps so a
//! load/save round-trip never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::{BALL_WEIGHT_HEAVY, BALL_WEIGHT_NORMAL};
use crate::sim::{BowlerStats, Handedness};

/// Item that unlocks the heaviest ball
pub const HEAVY_BALL_LICENSE: &str = "heavy_ball_license";

/// Equipment that raises impact force
pub const IMPACT_ITEMS: [(&str, f32); 2] = [("magma_ball", 1.15), ("titanium_beast", 1.25)];

fn default_stat() -> f32 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default = "default_stat")]
    pub strength: f32,
    #[serde(default = "default_stat")]
    pub accuracy: f32,
    #[serde(default = "default_stat")]
    pub control: f32,
    #[serde(default = "default_stat")]
    pub endurance: f32,
    /// Bonus percentage on XP and money
    #[serde(default)]
    pub crowd_control: f32,
    #[serde(default)]
    pub specialty: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            strength: 5.0,
            accuracy: 5.0,
            control: 5.0,
            endurance: 5.0,
            crowd_control: 0.0,
            specialty: 0.0,
        }
    }
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default)]
    pub stats: PlayerStats,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub stat_points: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, handedness: Handedness) -> Self {
        Self {
            name: name.into(),
            handedness,
            stats: PlayerStats::default(),
            level: 1,
            xp: 0,
            stat_points: 0,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifetimeStats {
    pub total_strikes: u64,
    pub total_spares: u64,
    pub total_pins_knocked: u64,
    pub games_played: u64,
    pub high_score: u32,
    pub best_streak: u32,
    pub perfect_games: u64,
}

/// Everything persisted for the local player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInventory {
    #[serde(default)]
    pub money: u64,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PlayerProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime_stats: Option<LifetimeStats>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInventory {
    pub const STORAGE_KEY: &'static str = "lane_shark_data";

    pub fn has_item(&self, id: &str) -> bool {
        self.items.iter().any(|i| i == id)
    }

    /// Starting stats for the simulation (defaults when no profile exists)
    pub fn bowler_stats(&self) -> BowlerStats {
        match &self.profile {
            Some(p) => BowlerStats {
                strength: p.stats.strength,
                accuracy: p.stats.accuracy,
                control: p.stats.control,
            },
            None => BowlerStats::default(),
        }
    }

    pub fn handedness(&self) -> Handedness {
        self.profile.as_ref().map(|p| p.handedness).unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| p.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| String::from("PLAYER 1"))
    }

    /// Impact multiplier of the strongest owned ball; bonuses do not stack
    pub fn impact_multiplier(&self) -> f32 {
        IMPACT_ITEMS
            .iter()
            .filter(|(id, _)| self.has_item(id))
            .map(|&(_, mult)| mult)
            .fold(1.0, f32::max)
    }

    pub fn max_ball_weight(&self) -> f32 {
        if self.has_item(HEAVY_BALL_LICENSE) {
            BALL_WEIGHT_HEAVY
        } else {
            BALL_WEIGHT_NORMAL
        }
    }

    /// Load from durable storage, or the default profile
    pub fn load() -> Self {
        let inventory: Self = super::load(Self::STORAGE_KEY);
        log::info!(
            "Loaded inventory: {} items, ${}{}",
            inventory.items.len(),
            inventory.money,
            if inventory.profile.is_some() { ", with profile" } else { "" }
        );
        inventory
    }

    pub fn save(&self) -> Result<(), super::PersistError> {
        super::save(Self::STORAGE_KEY, self)
    }
}
