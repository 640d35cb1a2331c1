//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pin id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cpu;
pub mod events;
pub mod lane;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod throw;
pub mod tick;

pub use cpu::{CpuPersonality, CpuThrow, plan_throw};
pub use events::{Celebration, GameEvent, RollEvent, RollOutcome, STREAK_TIERS, StreakTier, classify_roll, streak_tier};
pub use lane::{BallMaterial, LaneCondition};
pub use scoring::{BowlingFrame, RollDisposition, RollError, is_game_over, record_roll, score, total_score};
pub use state::{
    Ball, BowlerStats, CpuTurn, EffectsConfig, GameMode, GamePhase, GameState, Handedness, Particle, ParticleKind, Pin,
    Player, RenderSnapshot, TrailPoint,
};
pub use throw::{LaunchParams, Oscillator, SwipeGesture, ThrowMode, ThrowSequence, ThrowStep};
pub use tick::{TickInput, tick};
