//! XP, money and level progression
//!
//! Fed one [`RollOutcome`] at a time by the session. Awards go to the profile
//! owner's inventory only; the simulation never writes to it directly.

use crate::persistence::{LifetimeStats, PlayerProfile, UserInventory};
use crate::sim::RollOutcome;
use crate::sim::events::streak_multiplier;

pub const XP_PER_PIN: u64 = 5;
pub const XP_PER_STRIKE: u64 = 50;
pub const XP_PER_SPARE: u64 = 25;

pub const MONEY_PER_PIN: u64 = 2;
pub const MONEY_PER_STRIKE: u64 = 50;
pub const MONEY_PER_SPARE: u64 = 20;

/// Stat points granted per level gained
pub const STAT_POINTS_PER_LEVEL: u32 = 2;

/// Total XP needed to reach level `i + 1`
pub const LEVELS: [u64; 10] = [0, 500, 1500, 3000, 5000, 8000, 12000, 17000, 25000, 50000];

/// Highest reachable level
pub const MAX_LEVEL: u32 = LEVELS.len() as u32;

/// XP needed to leave `level`, if there is a next level
pub fn next_level_xp(level: u32) -> Option<u64> {
    LEVELS.get(level as usize).copied()
}

/// Fraction of the way from the current level to the next (1.0 at max level)
pub fn xp_progress(profile: &PlayerProfile) -> f32 {
    let floor = LEVELS.get(profile.level.saturating_sub(1) as usize).copied().unwrap_or(0);
    match next_level_xp(profile.level) {
        Some(next) if next > floor => ((profile.xp.saturating_sub(floor)) as f32 / (next - floor) as f32).clamp(0.0, 1.0),
        _ => 1.0,
    }
}

/// What a single roll earned
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollAward {
    pub xp: u64,
    pub money: u64,
    pub multiplier: f32,
    /// New level if this roll crossed a threshold
    pub level_up: Option<u32>,
}

/// XP and money for a roll before streak and crowd bonuses
pub fn base_rewards(outcome: &RollOutcome) -> (u64, u64) {
    let pins = u64::from(outcome.pins_knocked);
    let mut xp = pins * XP_PER_PIN;
    let mut money = pins * MONEY_PER_PIN;
    if outcome.event.is_strike() {
        xp += XP_PER_STRIKE;
        money += MONEY_PER_STRIKE;
    } else if outcome.event.is_spare() {
        xp += XP_PER_SPARE;
        money += MONEY_PER_SPARE;
    }
    (xp, money)
}

/// Progression state for the session
#[derive(Debug, Clone, Default)]
pub struct Progression {
    level_up_pending: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award a roll to the profile owner
    ///
    /// Money and lifetime stats always accrue; XP and levels need a profile.
    pub fn award_roll(&mut self, inventory: &mut UserInventory, outcome: &RollOutcome) -> RollAward {
        let (base_xp, base_money) = base_rewards(outcome);
        let multiplier = streak_multiplier(outcome.streak_count);
        let crowd = inventory
            .profile
            .as_ref()
            .map(|p| 1.0 + p.stats.crowd_control.max(0.0) * 0.05)
            .unwrap_or(1.0);

        let xp = (base_xp as f32 * multiplier * crowd).floor() as u64;
        let money = (base_money as f32 * multiplier * crowd).floor() as u64;

        inventory.money += money;
        let lifetime = inventory.lifetime_stats.get_or_insert_with(LifetimeStats::default);
        lifetime.total_pins_knocked += u64::from(outcome.pins_knocked);
        if outcome.event.is_strike() {
            lifetime.total_strikes += 1;
        } else if outcome.event.is_spare() {
            lifetime.total_spares += 1;
        }
        lifetime.best_streak = lifetime.best_streak.max(outcome.streak_count);

        let mut award = RollAward {
            xp: 0,
            money,
            multiplier,
            level_up: None,
        };

        if let Some(profile) = inventory.profile.as_mut() {
            award.xp = xp;
            profile.xp += xp;
            while let Some(next) = next_level_xp(profile.level) {
                if profile.xp < next || profile.level >= MAX_LEVEL {
                    break;
                }
                profile.level += 1;
                profile.stat_points += STAT_POINTS_PER_LEVEL;
                award.level_up = Some(profile.level);
            }
            if let Some(level) = award.level_up {
                log::info!("{} reached level {}", profile.name, level);
                self.level_up_pending = true;
            }
        }

        log::debug!(
            "Roll award: +{} xp, +${} (x{:.1} streak, x{:.2} crowd)",
            award.xp,
            award.money,
            multiplier,
            crowd
        );
        award
    }

    /// Fold a finished game into lifetime stats
    pub fn record_game(&mut self, inventory: &mut UserInventory, final_score: u32) {
        let lifetime = inventory.lifetime_stats.get_or_insert_with(LifetimeStats::default);
        lifetime.games_played += 1;
        lifetime.high_score = lifetime.high_score.max(final_score);
        if final_score == 300 {
            lifetime.perfect_games += 1;
        }
        log::info!(
            "Game recorded: score {}, {} games played, high score {}",
            final_score,
            lifetime.games_played,
            lifetime.high_score
        );
    }

    pub fn level_up_pending(&self) -> bool {
        self.level_up_pending
    }

    /// Read and clear the level-up flag
    pub fn take_level_up(&mut self) -> bool {
        std::mem::take(&mut self.level_up_pending)
    }
}
