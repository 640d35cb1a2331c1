//! Fixed timestep simulation tick
//!
//! One call advances whichever phase is active. All randomness comes from the
//! state's seeded RNG, so the same seed and input sequence replay exactly.

use glam::Vec2;

use super::collision;
use super::cpu::{CpuPersonality, plan_throw};
use super::events::{GameEvent, RollOutcome, classify_roll};
use super::physics;
use super::scoring;
use super::state::{CpuTurn, GamePhase, GameState, ParticleKind, Pin, TUTORIAL_STEPS};
use super::throw::{LaunchParams, SequenceStep, SwipeGesture, ThrowSequence, ThrowStep, snap_spin, snap_weight, swipe_launch};
use crate::consts::*;
use crate::{decay, frames_for};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Confirm / continue (click, tap, space)
    pub advance: bool,
    /// Completed swipe gesture
    pub swipe: Option<SwipeGesture>,
    /// Ball weight pick
    pub weight: Option<f32>,
    /// Spin slider
    pub spin: Option<f32>,
    /// Lane position slider
    pub position: Option<f32>,
    /// Abandon the game from anywhere
    pub exit_to_menu: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        *self == TickInput::default()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

    if input.exit_to_menu && state.phase != GamePhase::Menu {
        state.return_to_menu();
        return;
    }

    state.time_ticks += 1;
    update_effects(state, dt);

    match state.phase {
        GamePhase::Splash => {
            state.phase_timer -= dt;
            if input.advance || state.phase_timer <= 0.0 {
                state.phase = GamePhase::Menu;
                state.message = String::from("MAIN MENU");
            }
        }
        GamePhase::Menu | GamePhase::PlayerCreator | GamePhase::GameOver => {}
        GamePhase::Tutorial => {
            if input.advance {
                advance_tutorial(state);
            }
        }
        GamePhase::ReadyToBowl => tick_ready(state, input, dt),
        GamePhase::ThrowSequence => tick_throw_sequence(state, input, dt),
        GamePhase::Rolling => tick_rolling(state, dt),
        GamePhase::PinSettlement => {
            step_pins(state, dt);
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                complete_roll(state);
            }
        }
        GamePhase::BallReturn => {
            step_pins(state, dt);
            state.ball.step_return(frames_for(dt));
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                finish_ball_return(state);
            }
        }
    }
}

/// Decay screen shake and move particles
fn update_effects(state: &mut GameState, dt: f32) {
    let frames = frames_for(dt);

    state.screen_shake *= decay(SCREEN_SHAKE_DECAY, frames);
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    for particle in &mut state.particles {
        particle.pos += particle.vel * frames;
        particle.vel.y -= 0.5 * frames;
        particle.life -= 0.02 * frames;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn advance_tutorial(state: &mut GameState) {
    state.tutorial_step += 1;
    if state.tutorial_step >= TUTORIAL_STEPS.len() {
        log::debug!("Tutorial finished");
        state.phase = GamePhase::ReadyToBowl;
    }
}

fn tick_ready(state: &mut GameState, input: &TickInput, dt: f32) {
    let Some(player) = state.current() else {
        log::warn!("No bowler up in ReadyToBowl, returning to menu");
        state.return_to_menu();
        return;
    };

    if let Some(personality) = player.cpu.clone() {
        tick_cpu_ready(state, &personality, dt);
        return;
    }

    let idx = state.current_player;
    if let Some(player) = state.players.get_mut(idx) {
        if let Some(weight) = input.weight.filter(|w| w.is_finite()) {
            player.weight = snap_weight(weight, player.max_weight);
        }
        if let Some(spin) = input.spin.filter(|s| s.is_finite()) {
            player.spin = snap_spin(spin);
        }
        state.ball.weight = player.weight;
        state.ball.spin = player.spin;
    }

    if let Some(gesture) = input.swipe {
        let (weight, spin) = (state.ball.weight, state.ball.spin);
        if release_swipe(state, &gesture, weight, spin) {
            return;
        }
    }

    if input.advance {
        begin_throw_sequence(state);
    }
}

fn begin_throw_sequence(state: &mut GameState) {
    let Some(player) = state.current() else {
        return;
    };
    let seq = ThrowSequence::new(state.throw_mode, state.ball.pos.x, player.weight, player.spin, player.max_weight);
    state.ball.pos.x = seq.ball_x();
    state.message = step_prompt(seq.current_step()).to_string();
    state.throw = Some(seq);
    state.phase = GamePhase::ThrowSequence;
}

fn step_prompt(step: ThrowStep) -> &'static str {
    match step {
        ThrowStep::Weight => "PICK YOUR BALL",
        ThrowStep::Spin => "SET YOUR SPIN",
        ThrowStep::Position => "SET POSITION",
        ThrowStep::Aim => "AIM!",
        ThrowStep::Power => "POWER!",
        ThrowStep::Release => "RELEASE!",
    }
}

fn tick_cpu_ready(state: &mut GameState, personality: &CpuPersonality, dt: f32) {
    match state.cpu_turn {
        CpuTurn::Idle => {
            state.cpu_turn = CpuTurn::Thinking {
                remaining: CPU_THINK_SECS,
            };
            state.message = format!("{} IS THINKING...", personality.name.to_uppercase());
        }
        CpuTurn::Thinking { remaining } if remaining - dt > 0.0 => {
            state.cpu_turn = CpuTurn::Thinking {
                remaining: remaining - dt,
            };
        }
        CpuTurn::Thinking { .. } => {
            let plan = plan_throw(personality, &mut state.rng);
            log::debug!(
                "{} lines up at x={:.1} angle={:.2} spin={:.2}",
                personality.name,
                plan.position_x,
                plan.launch.angle_deg,
                plan.launch.spin
            );
            state.ball.pos.x = plan.position_x;
            state.ball.angle = plan.launch.angle_deg;
            state.ball.spin = plan.launch.spin;
            state.ball.weight = plan.launch.weight;
            state.cpu_turn = CpuTurn::Releasing {
                remaining: CPU_RELEASE_SECS,
                launch: plan.launch,
            };
            state.phase = GamePhase::ThrowSequence;
        }
        CpuTurn::Releasing { .. } => state.phase = GamePhase::ThrowSequence,
    }
}

fn tick_throw_sequence(state: &mut GameState, input: &TickInput, dt: f32) {
    let Some((is_cpu, stats)) = state.current().map(|p| (p.is_cpu(), p.stats)) else {
        state.return_to_menu();
        return;
    };

    if is_cpu {
        match state.cpu_turn {
            CpuTurn::Releasing { remaining, launch } if remaining - dt > 0.0 => {
                state.cpu_turn = CpuTurn::Releasing {
                    remaining: remaining - dt,
                    launch,
                };
            }
            CpuTurn::Releasing { launch, .. } => {
                state.cpu_turn = CpuTurn::Idle;
                release(state, launch);
            }
            _ => {
                log::warn!("CPU in throw sequence without a plan, rethinking");
                state.cpu_turn = CpuTurn::Idle;
                state.phase = GamePhase::ReadyToBowl;
            }
        }
        return;
    }

    let Some(mut seq) = state.throw.take() else {
        log::warn!("Throw sequence phase without a sequence, back to ready");
        state.phase = GamePhase::ReadyToBowl;
        return;
    };

    if let Some(weight) = input.weight {
        seq.set_weight(weight);
    }
    if let Some(spin) = input.spin {
        seq.set_spin(spin);
    }
    if let Some(x) = input.position {
        seq.set_position(x);
    }
    remember_ball_choice(state, &seq);

    if let Some(gesture) = input.swipe {
        if release_swipe(state, &gesture, seq.weight, seq.spin) {
            return;
        }
    }

    seq.tick(dt);
    state.ball.pos.x = seq.ball_x();
    state.ball.angle = seq.preview_angle();
    state.ball.weight = seq.weight;
    state.ball.spin = seq.spin;

    if input.advance {
        match seq.advance(&stats, &mut state.rng) {
            SequenceStep::Next(step) => state.message = step_prompt(step).to_string(),
            SequenceStep::Launch(launch) => {
                release(state, launch);
                return;
            }
        }
    }

    state.throw = Some(seq);
}

/// Keep the bowler's ball pick for their next throw
fn remember_ball_choice(state: &mut GameState, seq: &ThrowSequence) {
    let idx = state.current_player;
    if let Some(player) = state.players.get_mut(idx) {
        player.weight = seq.weight;
        player.spin = seq.spin;
    }
}

/// Launch from a swipe if it is a valid throw
fn release_swipe(state: &mut GameState, gesture: &SwipeGesture, weight: f32, spin: f32) -> bool {
    let Some(swipe) = gesture.interpret() else {
        log::debug!("Ignoring swipe {:?}", gesture);
        return false;
    };
    let stats = state.current().map(|p| p.stats).unwrap_or_default();
    let launch = swipe_launch(&swipe, weight, spin, &stats, &mut state.rng);
    state.throw = None;
    release(state, launch);
    true
}

fn release(state: &mut GameState, launch: LaunchParams) {
    let launch = launch.clamped();
    log::debug!(
        "Release: angle={:.2} spin={:.2} power={:.2} weight={:.1}",
        launch.angle_deg,
        launch.spin,
        launch.power,
        launch.weight
    );
    state.ball.launch(&launch);
    state.trail.clear();
    state.roll_time = 0.0;
    state.throw = None;
    state.phase = GamePhase::Rolling;
    state.message.clear();
    let player = state.current_player;
    state.push_event(GameEvent::BallReleased { player, launch });
}

fn tick_rolling(state: &mut GameState, dt: f32) {
    let (strength, impact_multiplier) = state
        .current()
        .map(|p| (p.stats.strength, p.impact_multiplier))
        .unwrap_or((5.0, 1.0));

    let was_in_gutter = state.ball.in_gutter;
    state.ball = physics::step_ball(&state.ball, strength, state.lane, dt);
    if state.ball.in_gutter && !was_in_gutter {
        state.message = String::from("GUTTER!");
        let player = state.current_player;
        state.push_event(GameEvent::BallInGutter { player });
    }
    state.record_trail();

    let knocks = collision::resolve_ball_pins(&state.ball, &mut state.pins, impact_multiplier, &mut state.rng);
    for knock in &knocks {
        state.add_shake(knock.force);
        state.spawn_particles(knock.pos, 15, ParticleKind::Impact);
    }
    step_pins(state, dt);

    state.roll_time += dt;
    let past_deck = state.ball.pos.y > PIN_DECK_EXIT_Y;
    if past_deck || state.roll_time >= MAX_ROLL_SECS {
        if !past_deck {
            log::warn!("Ball stalled at y={:.1}, settling anyway", state.ball.pos.y);
        }
        state.phase = GamePhase::PinSettlement;
        state.phase_timer = PIN_SETTLE_SECS;
    }
}

fn step_pins(state: &mut GameState, dt: f32) {
    let knocks = collision::step_pins(&mut state.pins, dt, &mut state.rng);
    for knock in &knocks {
        state.spawn_particles(knock.pos, 8, ParticleKind::Chain);
    }
}

/// Score the roll once the pins have settled
fn complete_roll(state: &mut GameState) {
    let knocked = state.pins.iter().filter(|p| p.is_down).count() as u8;
    let standing: Vec<Pin> = state.pins.iter().filter(|p| !p.is_down).copied().collect();
    let standing_before = state.standing_before;
    let event = classify_roll(standing_before, knocked, &standing);

    let idx = state.current_player;
    let Some(player) = state.players.get_mut(idx) else {
        log::warn!("Roll finished with no bowler up");
        state.return_to_menu();
        return;
    };

    if let Err(err) = scoring::record_roll(&mut player.rolls, knocked) {
        log::warn!("{} roll not recorded: {}", player.name, err);
    }
    player.frames = scoring::score(&player.rolls);
    player.score = scoring::total_score(&player.frames);
    player.consecutive_strikes = if event.is_strike() {
        player.consecutive_strikes + 1
    } else {
        0
    };

    let outcome = RollOutcome {
        player: idx,
        pins_knocked: knocked,
        event: event.clone(),
        streak_count: player.consecutive_strikes,
        frame_number: scoring::disposition(&player.rolls).frame_number,
        total_score: player.score,
    };
    log::info!(
        "{} frame {}: {} pins ({:?}), total {}",
        player.name,
        outcome.frame_number,
        knocked,
        event,
        outcome.total_score
    );

    state.message = match outcome.streak_tier() {
        Some(tier) if event.is_strike() => tier.name.to_uppercase(),
        _ => event.banner(),
    };
    if event.is_strike() || event.is_spare() {
        let kind = if event.is_strike() {
            ParticleKind::Strike
        } else {
            ParticleKind::Spare
        };
        state.spawn_particles(Vec2::new(0.0, HEAD_PIN_Y), 40, kind);
    }

    state.standing_before = standing_before.saturating_sub(knocked);
    state.last_event = Some(event);
    state.push_event(GameEvent::RollCompleted(outcome));
    state.phase = GamePhase::BallReturn;
    state.phase_timer = BALL_RETURN_SECS;
}

/// Decide the rack and the next bowler once the ball is back
fn finish_ball_return(state: &mut GameState) {
    if state.players.iter().all(|p| p.is_finished()) {
        let scores: Vec<u32> = state.players.iter().map(|p| p.score).collect();
        log::info!("Game over, final scores {:?}", scores);
        state.message = String::from("GAME OVER");
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { scores });
        return;
    }

    let disposition = state
        .current()
        .map(|p| scoring::disposition(&p.rolls))
        .unwrap_or(scoring::RollDisposition {
            frame_number: 0,
            frame_complete: true,
            reset_rack: true,
        });

    if disposition.reset_rack {
        state.reset_pins();
    } else {
        state.sweep_fallen();
    }

    if disposition.frame_complete {
        let count = state.players.len();
        let next = (1..=count)
            .map(|offset| (state.current_player + offset) % count)
            .find(|&i| !state.players[i].is_finished());
        if let Some(next) = next.filter(|&n| n != state.current_player) {
            state.current_player = next;
            state.push_event(GameEvent::TurnChanged { player: next });
        }
    }

    state.reset_ball();
    state.cpu_turn = CpuTurn::Idle;
    state.throw = None;
    if let Some(player) = state.current() {
        state.message = format!("{} TO BOWL", player.name);
    }
    state.phase = GamePhase::ReadyToBowl;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cpu::CpuPersonality;
    use crate::sim::events::RollEvent;
    use crate::sim::state::{BowlerStats, GameMode, Handedness, Player};

    fn solo_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let player = Player::human(1, "P1", BowlerStats::default(), Handedness::Right);
        state.start_game(GameMode::TwoPlayer, vec![player]);
        state
    }

    fn advance() -> TickInput {
        TickInput {
            advance: true,
            ..Default::default()
        }
    }

    fn straight_swipe() -> TickInput {
        TickInput {
            swipe: Some(SwipeGesture {
                distance: 400.0,
                duration_ms: 250.0,
                dx: 0.0,
                dy: -400.0,
            }),
            ..Default::default()
        }
    }

    /// Run idle ticks until the phase changes or `max_ticks` pass
    fn run_until_phase_changes(state: &mut GameState, max_ticks: usize) {
        let start = state.phase;
        for _ in 0..max_ticks {
            tick(state, &TickInput::default(), SIM_DT);
            if state.phase != start {
                return;
            }
        }
    }

    #[test]
    fn test_splash_to_menu() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Splash);
        run_until_phase_changes(&mut state, 1000);
        assert_eq!(state.phase, GamePhase::Menu);

        let mut state = GameState::new(1);
        tick(&mut state, &advance(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_solo_starts_with_tutorial() {
        let mut state = GameState::new(1);
        let player = Player::human(1, "P1", BowlerStats::default(), Handedness::Right);
        state.start_game(GameMode::Solo, vec![player]);
        assert_eq!(state.phase, GamePhase::Tutorial);
        for _ in 0..TUTORIAL_STEPS.len() - 1 {
            tick(&mut state, &advance(), SIM_DT);
            assert_eq!(state.phase, GamePhase::Tutorial);
        }
        tick(&mut state, &advance(), SIM_DT);
        assert_eq!(state.phase, GamePhase::ReadyToBowl);
    }

    #[test]
    fn test_sequence_launches_ball() {
        let mut state = solo_state(5);
        tick(&mut state, &advance(), SIM_DT);
        assert_eq!(state.phase, GamePhase::ThrowSequence);
        assert!(state.throw.is_some());

        // Position, aim, power
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            tick(&mut state, &advance(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Rolling);
        assert!(state.throw.is_none());
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::BallReleased { .. })));
    }

    #[test]
    fn test_swipe_ignored_outside_bowling_phases() {
        let mut state = solo_state(5);
        tick(&mut state, &straight_swipe(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Rolling);

        // Mid-roll swipes do nothing
        let y = state.ball.pos.y;
        tick(&mut state, &straight_swipe(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Rolling);
        assert!(state.ball.pos.y > y);

        let mut menu = GameState::new(5);
        menu.return_to_menu();
        tick(&mut menu, &straight_swipe(), SIM_DT);
        assert_eq!(menu.phase, GamePhase::Menu);
    }

    #[test]
    fn test_short_swipe_is_not_a_throw() {
        let mut state = solo_state(5);
        let input = TickInput {
            swipe: Some(SwipeGesture {
                distance: 30.0,
                duration_ms: 100.0,
                dx: 0.0,
                dy: -30.0,
            }),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::ReadyToBowl);
    }

    #[test]
    fn test_full_roll_cycle() {
        let mut state = solo_state(9);
        tick(&mut state, &straight_swipe(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Rolling);

        run_until_phase_changes(&mut state, 2000);
        assert_eq!(state.phase, GamePhase::PinSettlement);
        run_until_phase_changes(&mut state, 2000);
        assert_eq!(state.phase, GamePhase::BallReturn);
        assert_eq!(state.players[0].rolls.len(), 1);

        let events = state.drain_events();
        let outcome = events.iter().find_map(|e| match e {
            GameEvent::RollCompleted(o) => Some(o.clone()),
            _ => None,
        });
        assert!(outcome.is_some());
        if let Some(outcome) = outcome {
            assert_eq!(outcome.frame_number, 1);
            assert_eq!(outcome.pins_knocked, state.players[0].rolls[0]);
        }

        run_until_phase_changes(&mut state, 2000);
        assert_eq!(state.phase, GamePhase::ReadyToBowl);
        assert_eq!(state.ball.pos.y, BALL_START_Y);
    }

    #[test]
    fn test_gutter_ball_knocks_nothing() {
        let mut state = solo_state(3);
        state.ball.pos.x = 100.0;
        let launch = LaunchParams {
            angle_deg: 20.0,
            spin: 0.0,
            power: 1.0,
            weight: BALL_WEIGHT_NORMAL,
        };
        release(&mut state, launch);
        run_until_phase_changes(&mut state, 2000);
        assert!(state.ball.in_gutter);
        run_until_phase_changes(&mut state, 2000);
        assert_eq!(state.players[0].rolls, vec![0]);
        assert_eq!(state.last_event, Some(RollEvent::Gutter));
        assert_eq!(state.standing_before, 10);
    }

    #[test]
    fn test_second_ball_keeps_standing_pins() {
        let mut state = solo_state(3);
        for id in [1u8, 2, 3] {
            if let Some(pin) = state.pins.iter_mut().find(|p| p.id == id) {
                pin.is_down = true;
            }
        }
        state.phase = GamePhase::PinSettlement;
        state.phase_timer = 0.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::BallReturn);
        assert_eq!(state.players[0].rolls, vec![3]);

        run_until_phase_changes(&mut state, 2000);
        assert_eq!(state.phase, GamePhase::ReadyToBowl);
        assert_eq!(state.pins.len(), 7);
        assert_eq!(state.standing_before, 7);
    }

    /// Settle the current roll with the given pin ids knocked down
    fn settle_with_down(state: &mut GameState, ids: &[u8]) {
        for pin in state.pins.iter_mut().filter(|p| ids.contains(&p.id)) {
            pin.is_down = true;
        }
        state.phase = GamePhase::PinSettlement;
        state.phase_timer = 0.0;
        tick(state, &TickInput::default(), SIM_DT);
        run_until_phase_changes(state, 2000);
        assert_eq!(state.phase, GamePhase::ReadyToBowl);
    }

    #[test]
    fn test_turn_rotates_after_frame() {
        let mut state = GameState::new(13);
        let players = vec![
            Player::human(1, "A", BowlerStats::default(), Handedness::Right),
            Player::human(2, "B", BowlerStats::default(), Handedness::Right),
        ];
        state.start_game(GameMode::TwoPlayer, players);
        state.drain_events();

        // A strikes: B is up
        settle_with_down(&mut state, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(state.current_player, 1);
        assert!(state.drain_events().contains(&GameEvent::TurnChanged { player: 1 }));

        // B leaves pins standing: still B for the second ball
        settle_with_down(&mut state, &[1, 2]);
        assert_eq!(state.current_player, 1);
        assert!(!state.drain_events().iter().any(|e| matches!(e, GameEvent::TurnChanged { .. })));

        // B closes an open frame: back to A
        settle_with_down(&mut state, &[3]);
        assert_eq!(state.current_player, 0);
        assert_eq!(state.players[1].rolls, vec![2, 1]);
        assert!(state.drain_events().contains(&GameEvent::TurnChanged { player: 0 }));
    }

    #[test]
    fn test_cpu_takes_its_turn() {
        let mut state = GameState::new(21);
        let cpu = CpuPersonality::by_id("klaus").map(|p| Player::cpu(1, p));
        assert!(cpu.is_some());
        state.start_game(GameMode::VsCpu, cpu.into_iter().collect());

        run_until_phase_changes(&mut state, 1000);
        assert_eq!(state.phase, GamePhase::ThrowSequence);
        // About 1.5 s of thinking
        assert!(state.time_ticks >= 170);
        run_until_phase_changes(&mut state, 1000);
        assert_eq!(state.phase, GamePhase::Rolling);
    }

    #[test]
    fn test_exit_to_menu_from_anywhere() {
        let mut state = solo_state(4);
        tick(&mut state, &straight_swipe(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Rolling);
        let exit = TickInput {
            exit_to_menu: true,
            ..Default::default()
        };
        tick(&mut state, &exit, SIM_DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.players.is_empty());
        assert!(state.throw.is_none());
        assert_eq!(state.cpu_turn, CpuTurn::Idle);
    }

    #[test]
    fn test_determinism() {
        let mut a = solo_state(99999);
        let mut b = solo_state(99999);
        let inputs = [advance(), TickInput::default(), advance(), advance(), advance()];
        for _ in 0..3 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
            for _ in 0..900 {
                tick(&mut a, &TickInput::default(), SIM_DT);
                tick(&mut b, &TickInput::default(), SIM_DT);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.players[0].rolls, b.players[0].rolls);
        assert_eq!(a.pins, b.pins);
        assert_eq!(a.ball, b.ball);
    }

    #[test]
    fn test_bad_dt_is_clamped() {
        let mut state = solo_state(8);
        tick(&mut state, &straight_swipe(), SIM_DT);
        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), 50.0);
        assert!(state.ball.pos.is_finite());
        assert!(state.ball.pos.y < PIN_DECK_EXIT_Y);
    }
}
