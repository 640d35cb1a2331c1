//! Game state and core simulation types
//!
//! Everything the tick handler mutates lives in [`GameState`]. Renderers get
//! read-only access through [`GameState::snapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cpu::CpuPersonality;
use super::events::{GameEvent, RollEvent};
use super::lane::{BallMaterial, LaneCondition};
use super::scoring::{self, BowlingFrame};
use super::throw::{LaunchParams, ThrowMode, ThrowSequence};
use crate::consts::*;

/// Top-level session phase, exactly one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Splash,
    Menu,
    PlayerCreator,
    Tutorial,
    /// Waiting for the bowler (or the CPU timer) to start a throw
    ReadyToBowl,
    /// Throw Sequence Controller is active
    ThrowSequence,
    /// Ball physics running
    Rolling,
    /// Fixed dwell while pins damp out
    PinSettlement,
    /// Non-interactive return animation, then rack/turn resolution
    BallReturn,
    GameOver,
}

impl GamePhase {
    /// Phases in which a game is in progress
    pub fn in_game(&self) -> bool {
        matches!(
            self,
            GamePhase::Tutorial
                | GamePhase::ReadyToBowl
                | GamePhase::ThrowSequence
                | GamePhase::Rolling
                | GamePhase::PinSettlement
                | GamePhase::BallReturn
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    Solo,
    TwoPlayer,
    VsCpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    /// Lateral start offset toward the throwing side
    pub fn start_offset(&self) -> f32 {
        match self {
            Handedness::Left => HANDEDNESS_OFFSET,
            Handedness::Right => -HANDEDNESS_OFFSET,
        }
    }
}

/// The bowling ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Last integrated velocity (lane px per reference frame)
    pub vel: Vec2,
    pub radius: f32,
    /// Chosen ball weight, 1.0 (light) to 2.5 (heavy)
    pub weight: f32,
    /// Launch power multiplier applied to impact weight
    pub power: f32,
    /// -0.5 (left hook) to 0.5 (right hook)
    pub spin: f32,
    pub material: BallMaterial,
    /// Heading in degrees, 0 = straight down the lane
    pub angle: f32,
    /// Irreversible for the current throw
    pub in_gutter: bool,
}

impl Ball {
    pub fn at_start(x: f32, weight: f32, spin: f32, material: BallMaterial) -> Self {
        Self {
            pos: Vec2::new(x, BALL_START_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            weight,
            power: 1.0,
            spin,
            material,
            angle: 0.0,
            in_gutter: false,
        }
    }

    /// Effective weight used for pin impact
    pub fn impact_weight(&self) -> f32 {
        self.weight * self.power
    }

    /// Apply final launch parameters
    pub fn launch(&mut self, params: &LaunchParams) {
        self.angle = params.angle_deg;
        self.spin = params.spin;
        self.power = params.power;
        self.weight = params.weight;
        self.in_gutter = false;
        self.vel = Vec2::ZERO;
    }

    /// Animate toward the return track, then back up to the foul line
    pub fn step_return(&mut self, frames: f32) {
        if (self.pos.x - BALL_RETURN_TRACK_X).abs() > 5.0 {
            let blend = 1.0 - crate::decay(0.9, frames);
            self.pos.x += (BALL_RETURN_TRACK_X - self.pos.x) * blend;
        } else {
            self.pos.x = BALL_RETURN_TRACK_X;
            let blend = 1.0 - crate::decay(0.92, frames);
            let toward = (BALL_START_Y - self.pos.y) * blend;
            let creep = 2.0 * frames * (BALL_START_Y - self.pos.y).signum();
            let delta = toward + creep;
            // Never overshoot the foul line
            if delta.abs() >= (BALL_START_Y - self.pos.y).abs() {
                self.pos.y = BALL_START_Y;
            } else {
                self.pos.y += delta;
            }
        }
        self.vel = Vec2::ZERO;
    }
}

/// A single pin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Standard pin number 1..=10
    pub id: u8,
    pub pos: Vec2,
    /// Lane px per reference frame
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    /// Decorative wobble (0-1), decays over time
    pub wobble: f32,
    /// Displaced/scored as fallen; only cleared by a full rack reset
    pub is_down: bool,
}

impl Pin {
    pub fn standing(id: u8) -> Self {
        Self {
            id,
            pos: rack_position(id),
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            wobble: 0.0,
            is_down: false,
        }
    }

    /// True while the pin still needs integration
    pub fn is_moving(&self) -> bool {
        self.vel.x.abs() > PIN_REST_SPEED || self.vel.y.abs() > PIN_REST_SPEED
    }

    /// Knock the pin down with the given velocity; standing -> struck is one-way
    pub fn knock(&mut self, vel: Vec2, angular_vel: f32) {
        self.is_down = true;
        self.vel = vel;
        self.angular_vel = angular_vel;
    }
}

/// Rack position of a pin by its standard number (head pin at the apex)
pub fn rack_position(id: u8) -> Vec2 {
    let spacing_x = PIN_SPACING / 2.0;
    let row_depth = PIN_SPACING * (std::f32::consts::PI / 3.0).sin();
    let (row, slot): (u8, u8) = match id {
        1 => (0, 0),
        2 | 3 => (1, id - 2),
        4..=6 => (2, id - 4),
        _ => (3, id.clamp(7, 10) - 7),
    };
    let x = (f32::from(slot) * 2.0 - f32::from(row)) * spacing_x;
    Vec2::new(x, HEAD_PIN_Y + f32::from(row) * row_depth)
}

/// Ten fresh pins in standard numbering
pub fn full_rack() -> Vec<Pin> {
    (1..=PINS_PER_RACK).map(Pin::standing).collect()
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Ball-on-pin spark
    Impact,
    /// Pin-on-pin spark
    Chain,
    Strike,
    Spare,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// 0-1, decreases over time
    pub life: f32,
}

/// Effect caps taken from the player's settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectsConfig {
    pub max_particles: usize,
    pub trail_length: usize,
    pub screen_shake: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            trail_length: MAX_TRAIL_LENGTH,
            screen_shake: true,
        }
    }
}

/// Bowler attributes read from the profile at game start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub strength: f32,
    pub accuracy: f32,
    pub control: f32,
}

impl Default for BowlerStats {
    fn default() -> Self {
        Self {
            strength: 5.0,
            accuracy: 5.0,
            control: 5.0,
        }
    }
}

/// A bowler in the current game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub cpu: Option<CpuPersonality>,
    pub stats: BowlerStats,
    pub handedness: Handedness,
    /// Ball the bowler has picked
    pub weight: f32,
    pub spin: f32,
    pub material: BallMaterial,
    /// Heaviest ball the bowler may pick
    pub max_weight: f32,
    /// Impact force multiplier from equipment
    pub impact_multiplier: f32,
    /// Flat roll history
    pub rolls: Vec<u8>,
    /// Derived from `rolls` after every roll
    pub frames: Vec<BowlingFrame>,
    pub score: u32,
    pub consecutive_strikes: u32,
    /// Owns the persisted profile (receives progression awards)
    pub is_profile_owner: bool,
}

impl Player {
    pub fn human(id: u32, name: impl Into<String>, stats: BowlerStats, handedness: Handedness) -> Self {
        Self {
            id,
            name: name.into(),
            cpu: None,
            stats,
            handedness,
            weight: BALL_WEIGHT_NORMAL,
            spin: 0.0,
            material: BallMaterial::Plastic,
            max_weight: BALL_WEIGHT_NORMAL,
            impact_multiplier: 1.0,
            rolls: Vec::new(),
            frames: scoring::score(&[]),
            score: 0,
            consecutive_strikes: 0,
            is_profile_owner: false,
        }
    }

    pub fn cpu(id: u32, personality: CpuPersonality) -> Self {
        let mut player = Self::human(
            id,
            personality.name.to_uppercase(),
            BowlerStats::default(),
            Handedness::default(),
        );
        player.max_weight = BALL_WEIGHT_HEAVY;
        player.cpu = Some(personality);
        player
    }

    pub fn is_cpu(&self) -> bool {
        self.cpu.is_some()
    }

    pub fn is_finished(&self) -> bool {
        scoring::is_game_over(&self.frames)
    }

    /// Frame the next roll goes into (11 once finished)
    pub fn current_frame_number(&self) -> u8 {
        scoring::current_frame(&self.frames)
            .map(|f| f.frame_number)
            .unwrap_or(FRAMES_PER_GAME as u8 + 1)
    }
}

/// CPU turn progress while its bowler is up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CpuTurn {
    Idle,
    Thinking { remaining: f32 },
    Releasing { remaining: f32, launch: LaunchParams },
}

/// Tutorial cards shown before a solo game
pub const TUTORIAL_STEPS: [(&str, &str); 4] = [
    ("Welcome to LaneShark!", "Follow the throw sequence to master your roll."),
    ("The 6-Step Throw", "1. Weight, 2. Spin, 3. Position, 4. Aim, 5. Power, 6. Release!"),
    ("Aiming", "Wait for the arrow to align with your target, then confirm. Timing is everything!"),
    ("Spin", "Apply spin to 'hook' the ball into the pocket for more strikes."),
];

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub ball: &'a Ball,
    pub pins: &'a [Pin],
    pub trail: &'a [TrailPoint],
    pub particles: &'a [Particle],
    pub screen_shake: f32,
    pub message: &'a str,
}

/// Complete simulation state, owned and mutated only by the tick handler
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (pin kicks, accuracy bias, CPU jitter)
    pub rng: Pcg32,
    /// Effects RNG, kept separate so effect caps never change gameplay
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub lane: LaneCondition,
    pub throw_mode: ThrowMode,
    pub effects: EffectsConfig,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub ball: Ball,
    pub pins: Vec<Pin>,
    /// Pins standing when the current throw started
    pub standing_before: u8,
    /// Active human throw sequence
    pub throw: Option<ThrowSequence>,
    pub cpu_turn: CpuTurn,
    /// Seconds left in the current dwell (splash, settlement, ball return)
    pub phase_timer: f32,
    /// Seconds the current ball has been rolling
    pub roll_time: f32,
    pub tutorial_step: usize,
    /// Trail history for rendering (oldest first)
    pub trail: Vec<TrailPoint>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub screen_shake: f32,
    /// HUD banner text
    pub message: String,
    pub last_event: Option<RollEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session state in the splash phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            phase: GamePhase::Splash,
            mode: GameMode::Solo,
            lane: LaneCondition::Normal,
            throw_mode: ThrowMode::Simplified,
            effects: EffectsConfig::default(),
            players: Vec::new(),
            current_player: 0,
            ball: Ball::at_start(0.0, BALL_WEIGHT_NORMAL, 0.0, BallMaterial::Plastic),
            pins: full_rack(),
            standing_before: PINS_PER_RACK,
            throw: None,
            cpu_turn: CpuTurn::Idle,
            phase_timer: SPLASH_SECS,
            roll_time: 0.0,
            tutorial_step: 0,
            trail: Vec::with_capacity(MAX_TRAIL_LENGTH),
            particles: Vec::new(),
            screen_shake: 0.0,
            message: String::from("Loading..."),
            last_event: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a game with the given roster (must not be empty)
    pub fn start_game(&mut self, mode: GameMode, players: Vec<Player>) {
        if players.is_empty() {
            log::warn!("Refusing to start a {:?} game with no players", mode);
            return;
        }
        log::info!("Starting {:?} game with {} players on a {} lane", mode, players.len(), self.lane.as_str());

        self.mode = mode;
        self.players = players;
        self.current_player = 0;
        self.reset_pins();
        self.reset_ball();
        self.tutorial_step = 0;
        self.last_event = None;
        self.phase = if mode == GameMode::Solo {
            GamePhase::Tutorial
        } else {
            GamePhase::ReadyToBowl
        };
        self.message = format!("{} TO BOWL", self.players[0].name);
        self.push_event(GameEvent::GameStarted { mode });
    }

    /// Cancel whatever is in flight and go back to the menu
    pub fn return_to_menu(&mut self) {
        if self.phase.in_game() || self.phase == GamePhase::GameOver {
            log::info!("Returning to menu from {:?}", self.phase);
            self.push_event(GameEvent::ReturnedToMenu);
        }
        self.phase = GamePhase::Menu;
        self.throw = None;
        self.cpu_turn = CpuTurn::Idle;
        self.players.clear();
        self.current_player = 0;
        self.trail.clear();
        self.particles.clear();
        self.screen_shake = 0.0;
        self.roll_time = 0.0;
        self.reset_pins();
        self.ball = Ball::at_start(0.0, BALL_WEIGHT_NORMAL, 0.0, BallMaterial::Plastic);
        self.message = String::from("MAIN MENU");
    }

    pub fn open_player_creator(&mut self) {
        if self.phase == GamePhase::Menu {
            self.phase = GamePhase::PlayerCreator;
        }
    }

    pub fn close_player_creator(&mut self) {
        if self.phase == GamePhase::PlayerCreator {
            self.phase = GamePhase::Menu;
        }
    }

    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Put up a full rack of ten pins
    pub fn reset_pins(&mut self) {
        self.pins = full_rack();
        self.standing_before = PINS_PER_RACK;
    }

    /// Clear fallen pins, leaving the standing ones for the next throw
    pub fn sweep_fallen(&mut self) {
        self.pins.retain(|p| !p.is_down);
        for pin in &mut self.pins {
            pin.vel = Vec2::ZERO;
            pin.angular_vel = 0.0;
            pin.wobble = 0.0;
        }
        self.standing_before = self.pins.len() as u8;
    }

    /// Return the ball to the foul line with the current bowler's setup
    pub fn reset_ball(&mut self) {
        let ball = match self.current() {
            Some(p) => Ball::at_start(p.handedness.start_offset(), p.weight, p.spin, p.material),
            None => Ball::at_start(0.0, BALL_WEIGHT_NORMAL, 0.0, BallMaterial::Plastic),
        };
        self.ball = ball;
        self.trail.clear();
        self.roll_time = 0.0;
    }

    /// Record current ball position to the trail
    pub fn record_trail(&mut self) {
        let speed = self.ball.vel.length();
        self.trail.push(TrailPoint {
            pos: self.ball.pos,
            speed,
        });
        let cap = self.effects.trail_length;
        if self.trail.len() > cap {
            let excess = self.trail.len() - cap;
            self.trail.drain(..excess);
        }
    }

    /// Spawn effect particles around a point (capped by settings)
    pub fn spawn_particles(&mut self, pos: Vec2, count: usize, kind: ParticleKind) {
        let room = self.effects.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * 16.0,
                (self.fx_rng.random::<f32>() - 0.5) * 16.0 + 5.0,
            );
            let life = 0.8 + self.fx_rng.random::<f32>() * 0.4;
            self.particles.push(Particle { pos, vel, kind, life });
        }
    }

    /// Add screen shake from an impact
    pub fn add_shake(&mut self, force: f32) {
        if self.effects.screen_shake {
            self.screen_shake = (self.screen_shake + force * 0.5).min(MAX_SCREEN_SHAKE);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            phase: self.phase,
            ball: &self.ball,
            pins: &self.pins,
            trail: &self.trail,
            particles: &self.particles,
            screen_shake: self.screen_shake,
            message: &self.message,
        }
    }
}
