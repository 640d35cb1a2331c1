//! LaneShark - a physics-driven bowling simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball/pin physics, scoring, throw input, game phases)
//! - `progression`: XP/money awards, streak multipliers and levels
//! - `persistence`: Profile/inventory save/load with default fallback
//! - `settings`: Player preferences
//! - `platform`: Logging, frame clock and clock seeding
//! - `session`: Owned context tying the simulation to its collaborators

pub mod persistence;
pub mod platform;
pub mod progression;
pub mod session;
pub mod settings;
pub mod sim;

pub use persistence::UserInventory;
pub use progression::Progression;
pub use session::Session;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Lane-plane coordinates: `x` is the lateral offset from the lane centre
/// (positive = right), `y` is the distance travelled from the foul line
/// toward the pins. Velocities are lane pixels per reference frame
/// (1/60 s) and are scaled by `dt * REFERENCE_HZ` when integrated.
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Host frame deltas are clamped to this (tab backgrounding etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Rate the per-frame physics constants were tuned at
    pub const REFERENCE_HZ: f32 = 60.0;

    /// Lane geometry
    pub const LANE_WIDTH: f32 = 260.0;
    pub const LANE_HALF_WIDTH: f32 = LANE_WIDTH / 2.0;
    pub const GUTTER_WIDTH: f32 = 45.0;
    pub const BALL_RETURN_WIDTH: f32 = 30.0;
    /// Ball return track, left of the left gutter
    pub const BALL_RETURN_TRACK_X: f32 = -(LANE_HALF_WIDTH + GUTTER_WIDTH + BALL_RETURN_WIDTH / 2.0);

    /// Ball start (foul line) and head pin distance
    pub const BALL_START_Y: f32 = 0.0;
    pub const HEAD_PIN_Y: f32 = 620.0;
    /// Ball is considered past the pin deck beyond this distance
    pub const PIN_DECK_EXIT_Y: f32 = HEAD_PIN_Y + 270.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    pub const BALL_WEIGHT_LIGHT: f32 = 1.0;
    pub const BALL_WEIGHT_NORMAL: f32 = 1.8;
    pub const BALL_WEIGHT_HEAVY: f32 = 2.5;
    pub const MAX_SPIN: f32 = 0.5;
    /// Start offset toward the bowler's throwing side
    pub const HANDEDNESS_OFFSET: f32 = 40.0;

    /// Ball kinematics
    pub const BASE_THROW_SPEED: f32 = 18.0;
    pub const STRENGTH_SPEED_BONUS: f32 = 0.1;
    pub const HOOK_SCALE: f32 = 0.15;
    pub const OIL_DEPTH_EXPONENT: f32 = 1.5;
    /// Hook can never turn the ball back toward the foul line
    pub const MAX_HEADING_DEG: f32 = 75.0;
    /// A roll that has not cleared the deck by now is settled anyway
    pub const MAX_ROLL_SECS: f32 = 8.0;

    /// Pin geometry
    pub const PIN_RADIUS: f32 = 12.0;
    pub const PIN_SPACING: f32 = 36.0;
    pub const PIN_COLLISION_RADIUS: f32 = PIN_RADIUS + BALL_RADIUS;
    pub const PIN_PIN_COLLISION_RADIUS: f32 = PIN_RADIUS * 2.0;

    /// Pin impact response
    pub const IMPACT_FORCE_K: f32 = 12.0;
    pub const PIN_FORWARD_BIAS: f32 = 8.0;
    pub const PIN_ANGULAR_JITTER: f32 = 15.0;
    pub const PIN_SPIN_KICK: f32 = 20.0;
    pub const IMPACT_FACTOR: f32 = 0.85;
    pub const PIN_DAMPING: f32 = 0.96;
    pub const PIN_ROTATION_DAMPING: f32 = 0.95;
    /// Below this speed a pin is treated as at rest
    pub const PIN_REST_SPEED: f32 = 0.1;
    /// Minimum separation used before normalizing a direction
    pub const MIN_SEPARATION: f32 = 1e-3;

    /// Visual effects
    pub const MAX_TRAIL_LENGTH: usize = 45;
    pub const MAX_PARTICLES: usize = 256;
    pub const MAX_SCREEN_SHAKE: f32 = 15.0;
    pub const SCREEN_SHAKE_DECAY: f32 = 0.9;

    /// Dwell timers (seconds)
    pub const SPLASH_SECS: f32 = 2.5;
    pub const PIN_SETTLE_SECS: f32 = 1.0;
    pub const BALL_RETURN_SECS: f32 = 2.5;
    pub const CPU_THINK_SECS: f32 = 1.5;
    pub const CPU_RELEASE_SECS: f32 = 0.8;

    /// Regulation
    pub const PINS_PER_RACK: u8 = 10;
    pub const FRAMES_PER_GAME: usize = 10;
}

/// Number of reference frames covered by `dt` seconds
#[inline]
pub fn frames_for(dt: f32) -> f32 {
    dt * consts::REFERENCE_HZ
}

/// Apply a per-reference-frame decay factor over `frames` frames
#[inline]
pub fn decay(factor: f32, frames: f32) -> f32 {
    factor.powf(frames)
}

/// Unit travel direction for a heading in degrees (0 = straight down the lane)
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Normalize `delta`, clamping tiny separations so the result is never NaN
#[inline]
pub fn safe_direction(delta: Vec2, fallback: Vec2) -> Vec2 {
    let len = delta.length();
    if !len.is_finite() || len < consts::MIN_SEPARATION {
        fallback
    } else {
        delta / len.max(consts::MIN_SEPARATION)
    }
}
