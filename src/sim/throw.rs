//! Throw Sequence Controller
//!
//! Turns the bowler's timed inputs (or a swipe) into [`LaunchParams`]. Each
//! step of the sequence either takes a direct value or samples an oscillating
//! meter when the bowler confirms.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::BowlerStats;
use crate::consts::*;
use crate::frames_for;

/// One step of the throw sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowStep {
    Weight,
    Spin,
    Position,
    Aim,
    Power,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThrowMode {
    /// Position, aim, power
    #[default]
    Simplified,
    /// All six steps
    Full,
}

impl ThrowMode {
    pub fn steps(&self) -> &'static [ThrowStep] {
        match self {
            ThrowMode::Simplified => &[ThrowStep::Position, ThrowStep::Aim, ThrowStep::Power],
            ThrowMode::Full => &[
                ThrowStep::Weight,
                ThrowStep::Spin,
                ThrowStep::Position,
                ThrowStep::Aim,
                ThrowStep::Power,
                ThrowStep::Release,
            ],
        }
    }
}

/// Ball weights on the rack
pub const WEIGHT_CHOICES: [f32; 3] = [BALL_WEIGHT_LIGHT, BALL_WEIGHT_NORMAL, BALL_WEIGHT_HEAVY];

/// Maximum aim deflection in degrees at full meter
pub const MAX_AIM_DEFLECTION: f32 = 15.0;
/// Clamp applied to every launch, whatever produced it
pub const MAX_LAUNCH_ANGLE: f32 = 20.0;
pub const MAX_LAUNCH_SPIN: f32 = 0.6;
pub const MIN_LAUNCH_POWER: f32 = 0.2;
pub const MAX_LAUNCH_POWER: f32 = 2.5;
/// Slider granularity for spin
pub const SPIN_STEP: f32 = 0.05;

/// Nearest rack weight not heavier than `max_weight`
pub fn snap_weight(weight: f32, max_weight: f32) -> f32 {
    WEIGHT_CHOICES
        .iter()
        .copied()
        .filter(|w| *w <= max_weight + f32::EPSILON)
        .min_by(|a, b| (a - weight).abs().total_cmp(&(b - weight).abs()))
        .unwrap_or(BALL_WEIGHT_LIGHT)
}

/// Spin slider value, quantized to its step
pub fn snap_spin(spin: f32) -> f32 {
    ((spin / SPIN_STEP).round() * SPIN_STEP).clamp(-MAX_SPIN, MAX_SPIN)
}

/// A meter that sweeps back and forth between two bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub value: f32,
    /// +1.0 or -1.0
    pub direction: f32,
    pub min: f32,
    pub max: f32,
    /// Travel per reference frame
    pub step: f32,
}

impl Oscillator {
    pub fn new(min: f32, max: f32, step: f32, value: f32) -> Self {
        Self {
            value: value.clamp(min, max),
            direction: 1.0,
            min,
            max,
            step,
        }
    }

    /// Aim meter, -1 (far left) to 1 (far right)
    pub fn aim() -> Self {
        Self::new(-1.0, 1.0, 0.02, 0.0)
    }

    /// Power meter
    pub fn power() -> Self {
        Self::new(MIN_LAUNCH_POWER, 1.5, 0.03, MIN_LAUNCH_POWER)
    }

    /// Lane-position slider sweeping across the approach
    pub fn position(start_x: f32) -> Self {
        let limit = LANE_HALF_WIDTH - BALL_RADIUS;
        Self::new(-limit, limit, 3.0, start_x)
    }

    /// Advance by `frames` reference frames, reversing at either bound
    pub fn tick(&mut self, frames: f32) {
        let next = self.value + self.direction * self.step * frames;
        if next >= self.max {
            self.value = self.max;
            self.direction = -1.0;
        } else if next <= self.min {
            self.value = self.min;
            self.direction = 1.0;
        } else {
            self.value = next;
        }
    }
}

/// Final parameters handed to the ball at release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Heading in degrees, 0 = straight
    pub angle_deg: f32,
    pub spin: f32,
    /// Multiplier on impact weight
    pub power: f32,
    /// Chosen ball weight
    pub weight: f32,
}

impl LaunchParams {
    /// Clamp to legal ranges; non-finite inputs fall back to a neutral value
    pub fn clamped(self) -> Self {
        fn finite_or(v: f32, fallback: f32) -> f32 {
            if v.is_finite() { v } else { fallback }
        }
        Self {
            angle_deg: finite_or(self.angle_deg, 0.0).clamp(-MAX_LAUNCH_ANGLE, MAX_LAUNCH_ANGLE),
            spin: finite_or(self.spin, 0.0).clamp(-MAX_LAUNCH_SPIN, MAX_LAUNCH_SPIN),
            power: finite_or(self.power, 1.0).clamp(MIN_LAUNCH_POWER, MAX_LAUNCH_POWER),
            weight: finite_or(self.weight, BALL_WEIGHT_NORMAL).clamp(BALL_WEIGHT_LIGHT, BALL_WEIGHT_HEAVY),
        }
    }
}

/// Random aim error for a bowler, wider for low accuracy
fn accuracy_bias(spread: f32, accuracy: f32, rng: &mut impl Rng) -> f32 {
    let width = ((12.0 - accuracy) * spread).max(0.0);
    (rng.random::<f32>() - 0.5) * width
}

/// Compose launch parameters from the sampled meters
pub fn compose_launch(
    aim: f32,
    power_meter: f32,
    weight: f32,
    spin: f32,
    stats: &BowlerStats,
    rng: &mut impl Rng,
) -> LaunchParams {
    let bias = accuracy_bias(0.4, stats.accuracy, rng);
    LaunchParams {
        angle_deg: aim * MAX_AIM_DEFLECTION + bias,
        spin: spin * (1.0 + stats.control / 10.0 * 0.2),
        power: power_meter + stats.strength / 10.0 * 0.3,
        weight,
    }
    .clamped()
}

/// Raw swipe measured by the input layer
///
/// `dy` is negative when the finger moves up the screen, i.e. toward the pins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeGesture {
    pub distance: f32,
    pub duration_ms: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Speed, direction and spin read from an accepted swipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThrow {
    pub speed: f32,
    pub angle_deg: f32,
    pub spin: f32,
}

impl SwipeGesture {
    /// Interpret the swipe, or `None` if it is too short, too fast or not toward the pins
    pub fn interpret(&self) -> Option<SwipeThrow> {
        let values_ok = self.distance.is_finite() && self.duration_ms.is_finite() && self.dx.is_finite() && self.dy.is_finite();
        if !values_ok || self.dy >= -20.0 || self.distance <= 50.0 || self.duration_ms < 16.0 {
            return None;
        }
        let seconds = self.duration_ms / 1000.0;
        Some(SwipeThrow {
            speed: (self.distance / (seconds * 100.0)).clamp(5.0, 25.0),
            angle_deg: (self.dx / self.dy.abs() * 30.0).clamp(-MAX_LAUNCH_ANGLE, MAX_LAUNCH_ANGLE),
            spin: self.dx / self.distance * 0.5,
        })
    }
}

/// Launch parameters for a swipe, blending in the bowler's chosen spin
pub fn swipe_launch(swipe: &SwipeThrow, weight: f32, chosen_spin: f32, stats: &BowlerStats, rng: &mut impl Rng) -> LaunchParams {
    let bias = accuracy_bias(0.3, stats.accuracy, rng);
    LaunchParams {
        angle_deg: swipe.angle_deg + bias,
        spin: swipe.spin * 0.7 + chosen_spin * 0.3,
        power: swipe.speed / 15.0 + stats.strength / 20.0,
        weight,
    }
    .clamped()
}

/// Result of confirming the current step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceStep {
    Next(ThrowStep),
    Launch(LaunchParams),
}

/// An in-progress human throw
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowSequence {
    steps: &'static [ThrowStep],
    index: usize,
    pub weight: f32,
    pub spin: f32,
    max_weight: f32,
    pub position: Oscillator,
    /// Set once the bowler drags the position slider
    position_locked: bool,
    pub aim: Oscillator,
    pub power: Oscillator,
}

impl ThrowSequence {
    pub fn new(mode: ThrowMode, start_x: f32, weight: f32, spin: f32, max_weight: f32) -> Self {
        let mut seq = Self {
            steps: mode.steps(),
            index: 0,
            weight: BALL_WEIGHT_NORMAL,
            spin: 0.0,
            max_weight,
            position: Oscillator::position(start_x),
            position_locked: false,
            aim: Oscillator::aim(),
            power: Oscillator::power(),
        };
        seq.set_weight(weight);
        seq.set_spin(spin);
        seq
    }

    pub fn current_step(&self) -> ThrowStep {
        self.steps[self.index.min(self.steps.len() - 1)]
    }

    /// Sweep the meter belonging to the current step
    pub fn tick(&mut self, dt: f32) {
        let frames = frames_for(dt);
        match self.current_step() {
            ThrowStep::Position if !self.position_locked => self.position.tick(frames),
            ThrowStep::Aim => self.aim.tick(frames),
            ThrowStep::Power => self.power.tick(frames),
            _ => {}
        }
    }

    /// Pick a ball; snaps to the nearest allowed rack weight
    pub fn set_weight(&mut self, weight: f32) {
        if weight.is_finite() {
            self.weight = snap_weight(weight, self.max_weight);
        }
    }

    pub fn set_spin(&mut self, spin: f32) {
        if spin.is_finite() {
            self.spin = snap_spin(spin);
        }
    }

    /// Position slider; freezes the sweep at the chosen spot
    ///
    /// Ignored once the position has been confirmed.
    pub fn set_position(&mut self, x: f32) {
        let confirmed = self.steps[..self.index].contains(&ThrowStep::Position);
        if confirmed || !x.is_finite() {
            return;
        }
        self.position.value = x.clamp(self.position.min, self.position.max);
        self.position_locked = true;
    }

    pub fn ball_x(&self) -> f32 {
        self.position.value
    }

    /// Heading preview for the aim arrow
    pub fn preview_angle(&self) -> f32 {
        self.aim.value * MAX_AIM_DEFLECTION
    }

    /// Confirm the current step
    pub fn advance(&mut self, stats: &BowlerStats, rng: &mut impl Rng) -> SequenceStep {
        if self.index + 1 < self.steps.len() {
            self.index += 1;
            return SequenceStep::Next(self.current_step());
        }
        SequenceStep::Launch(compose_launch(
            self.aim.value,
            self.power.value,
            self.weight,
            self.spin,
            stats,
            rng,
        ))
    }
}
