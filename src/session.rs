//! Session context
//!
//! Owns the simulation together with its collaborators (inventory,
//! progression, settings, frame clock) so nothing lives in globals. Hosts
//! feed it frame deltas and input; it runs fixed ticks, routes roll outcomes
//! to progression and hands the drained events back.

use crate::consts::SIM_DT;
use crate::persistence::UserInventory;
use crate::platform::{FrameClock, clock_seed};
use crate::progression::Progression;
use crate::settings::Settings;
use crate::sim::{CpuPersonality, GameEvent, GameMode, GameState, Player, TickInput, tick};

pub struct Session {
    pub game: GameState,
    pub inventory: UserInventory,
    pub settings: Settings,
    progression: Progression,
    clock: FrameClock,
    /// Input collected since the last tick
    pending: TickInput,
    /// Write the inventory back to storage after awards
    autosave: bool,
}

impl Session {
    /// In-memory session (nothing is written to storage)
    pub fn new(seed: u64, inventory: UserInventory, settings: Settings) -> Self {
        let mut game = GameState::new(seed);
        apply_settings(&mut game, &settings);
        Self {
            game,
            inventory,
            settings,
            progression: Progression::new(),
            clock: FrameClock::new(),
            pending: TickInput::default(),
            autosave: false,
        }
    }

    /// Session backed by durable storage, seeded from the clock
    pub fn load() -> Self {
        let seed = clock_seed();
        log::info!("Session starting with seed {}", seed);
        let mut session = Self::new(seed, UserInventory::load(), Settings::load());
        session.autosave = true;
        session
    }

    pub fn set_settings(&mut self, settings: Settings) {
        apply_settings(&mut self.game, &settings);
        self.settings = settings;
        if self.autosave {
            if let Err(e) = self.settings.save() {
                log::warn!("Failed to save settings: {}", e);
            }
        }
    }

    /// The local profile owner as a bowler
    fn local_player(&self, id: u32) -> Player {
        let inv = &self.inventory;
        let mut player = Player::human(id, inv.display_name(), inv.bowler_stats(), inv.handedness());
        player.max_weight = inv.max_ball_weight();
        player.impact_multiplier = inv.impact_multiplier();
        player.material = self.settings.ball_material;
        player.is_profile_owner = true;
        player
    }

    /// Roster for a mode; VS_CPU falls back to the second roster opponent
    pub fn roster(&self, mode: GameMode, opponent: Option<CpuPersonality>) -> Vec<Player> {
        let mut players = vec![self.local_player(1)];
        match mode {
            GameMode::Solo => {}
            GameMode::TwoPlayer => {
                let mut p2 = Player::human(2, "PLAYER 2", Default::default(), Default::default());
                p2.material = self.settings.ball_material;
                players.push(p2);
            }
            GameMode::VsCpu => {
                let personality = opponent.or_else(|| CpuPersonality::roster().into_iter().nth(1));
                if let Some(personality) = personality {
                    players.push(Player::cpu(2, personality));
                }
            }
        }
        players
    }

    pub fn start(&mut self, mode: GameMode, opponent: Option<CpuPersonality>) {
        let players = self.roster(mode, opponent);
        self.start_with_roster(mode, players);
    }

    /// Start with an explicit roster (exhibitions, tests)
    pub fn start_with_roster(&mut self, mode: GameMode, players: Vec<Player>) {
        self.pending = TickInput::default();
        self.clock.reset();
        self.game.start_game(mode, players);
    }

    /// Queue input for the next tick; flags accumulate, values overwrite
    pub fn queue_input(&mut self, input: TickInput) {
        let pending = &mut self.pending;
        pending.advance |= input.advance;
        pending.exit_to_menu |= input.exit_to_menu;
        pending.swipe = input.swipe.or(pending.swipe);
        pending.weight = input.weight.or(pending.weight);
        pending.spin = input.spin.or(pending.spin);
        pending.position = input.position.or(pending.position);
    }

    /// Advance by a host frame delta; returns the events produced
    pub fn update(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        let steps = self.clock.advance(frame_dt);
        for _ in 0..steps {
            self.step_once();
        }
        self.dispatch_events()
    }

    /// Run exactly one fixed tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        self.step_once();
        self.dispatch_events()
    }

    fn step_once(&mut self) {
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.game, &input, SIM_DT);
    }

    /// Route drained events to progression
    fn dispatch_events(&mut self) -> Vec<GameEvent> {
        let events = self.game.drain_events();
        let mut dirty = false;

        for event in &events {
            match event {
                GameEvent::RollCompleted(outcome) => {
                    let owner = self.game.players.get(outcome.player).is_some_and(|p| p.is_profile_owner);
                    if owner {
                        self.progression.award_roll(&mut self.inventory, outcome);
                        dirty = true;
                    }
                }
                GameEvent::GameOver { scores } => {
                    let owner_score = self
                        .game
                        .players
                        .iter()
                        .zip(scores)
                        .find(|(p, _)| p.is_profile_owner)
                        .map(|(_, s)| *s);
                    if let Some(score) = owner_score {
                        self.progression.record_game(&mut self.inventory, score);
                        dirty = true;
                    }
                }
                _ => {}
            }
        }

        if dirty && self.autosave {
            if let Err(e) = self.inventory.save() {
                log::warn!("Failed to save progress: {}", e);
            }
        }
        events
    }

    /// Consume the level-up flag (for a one-shot overlay)
    pub fn take_level_up(&mut self) -> bool {
        self.progression.take_level_up()
    }

    pub fn level_up_pending(&self) -> bool {
        self.progression.level_up_pending()
    }

    /// Abandon the current game
    pub fn exit_to_menu(&mut self) {
        self.pending = TickInput::default();
        self.game.return_to_menu();
    }
}

fn apply_settings(game: &mut GameState, settings: &Settings) {
    game.lane = settings.lane_condition;
    game.throw_mode = settings.throw_mode;
    game.effects = settings.effects();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PlayerProfile;
    use crate::sim::{GamePhase, Handedness, LaneCondition};

    fn session() -> Session {
        let inventory = UserInventory {
            items: vec![String::from("heavy_ball_license")],
            profile: Some(PlayerProfile::new("Shark", Handedness::Left)),
            ..Default::default()
        };
        Session::new(42, inventory, Settings::default())
    }

    #[test]
    fn test_roster_per_mode() {
        let s = session();
        assert_eq!(s.roster(GameMode::Solo, None).len(), 1);
        let two = s.roster(GameMode::TwoPlayer, None);
        assert_eq!(two.len(), 2);
        assert!(!two[1].is_cpu());
        let vs = s.roster(GameMode::VsCpu, CpuPersonality::by_id("gus"));
        assert_eq!(vs[1].cpu.as_ref().map(|c| c.id.as_str()), Some("gus"));

        let me = &two[0];
        assert_eq!(me.name, "Shark");
        assert_eq!(me.handedness, Handedness::Left);
        assert!(me.is_profile_owner);
        assert_eq!(me.max_weight, crate::consts::BALL_WEIGHT_HEAVY);
    }

    #[test]
    fn test_settings_reach_simulation() {
        let mut s = session();
        let settings = Settings {
            lane_condition: LaneCondition::Dry,
            particles: false,
            ..Settings::default()
        };
        s.set_settings(settings);
        assert_eq!(s.game.lane, LaneCondition::Dry);
        assert_eq!(s.game.effects.max_particles, 0);
    }

    #[test]
    fn test_queued_input_is_consumed_once() {
        let mut s = session();
        s.start(GameMode::TwoPlayer, None);
        assert_eq!(s.game.phase, GamePhase::ReadyToBowl);

        s.queue_input(TickInput {
            advance: true,
            ..Default::default()
        });
        // Less than one tick of time: input waits
        s.update(crate::consts::SIM_DT * 0.25);
        assert_eq!(s.game.phase, GamePhase::ReadyToBowl);
        s.update(1.0 / 60.0);
        assert_eq!(s.game.phase, GamePhase::ThrowSequence);
        // The advance did not leak into the second substep
        assert_eq!(s.game.throw.as_ref().map(|t| t.current_step()), Some(crate::sim::ThrowStep::Position));
    }

    #[test]
    fn test_weight_and_spin_reach_full_sequence() {
        let mut s = session();
        s.set_settings(Settings {
            throw_mode: crate::sim::ThrowMode::Full,
            ..Settings::default()
        });
        s.start(GameMode::TwoPlayer, None);
        s.queue_input(TickInput {
            advance: true,
            ..Default::default()
        });
        s.step();
        assert_eq!(s.game.throw.as_ref().map(|t| t.current_step()), Some(crate::sim::ThrowStep::Weight));

        // Separate calls merge into one tick
        s.queue_input(TickInput {
            weight: Some(crate::consts::BALL_WEIGHT_LIGHT),
            ..Default::default()
        });
        s.queue_input(TickInput {
            spin: Some(0.4),
            ..Default::default()
        });
        s.step();
        let seq = s.game.throw.as_ref();
        assert_eq!(seq.map(|t| t.weight), Some(crate::consts::BALL_WEIGHT_LIGHT));
        assert!(seq.is_some_and(|t| (t.spin - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_rolls_award_profile_owner() {
        let mut s = session();
        s.start(GameMode::TwoPlayer, None);
        s.queue_input(TickInput {
            swipe: Some(crate::sim::SwipeGesture {
                distance: 400.0,
                duration_ms: 250.0,
                dx: 0.0,
                dy: -400.0,
            }),
            ..Default::default()
        });
        let mut completed = false;
        for _ in 0..2000 {
            let events = s.step();
            if events.iter().any(|e| matches!(e, GameEvent::RollCompleted(_))) {
                completed = true;
                break;
            }
        }
        assert!(completed);
        assert!(s.inventory.lifetime_stats.is_some());
    }

    #[test]
    fn test_exit_to_menu() {
        let mut s = session();
        s.start(GameMode::VsCpu, None);
        s.exit_to_menu();
        assert_eq!(s.game.phase, GamePhase::Menu);
        assert!(s.game.players.is_empty());
    }
}
