//! Whole-game flows driven through the public session API

use lane_shark::sim::scoring;
use lane_shark::sim::{CpuPersonality, GameEvent, GameMode, GamePhase, Player, SwipeGesture, TickInput};
use lane_shark::{Session, Settings, UserInventory};

/// Enough fixed ticks for a full two-bowler game several times over
const MAX_TICKS: usize = 250_000;

fn session(seed: u64) -> Session {
    Session::new(seed, UserInventory::default(), Settings::default())
}

fn cpu_roster() -> Vec<Player> {
    ["hannah", "klaus"]
        .iter()
        .filter_map(|id| CpuPersonality::by_id(id))
        .enumerate()
        .map(|(i, p)| Player::cpu(i as u32 + 1, p))
        .collect()
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

/// Step until game over, bowling for humans with a straight swipe
fn play_out(session: &mut Session) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..MAX_TICKS {
        let human_up = session.game.phase == GamePhase::ReadyToBowl && session.game.current().is_some_and(|p| !p.is_cpu());
        if human_up {
            session.queue_input(straight_swipe());
        }
        events.extend(session.step());
        if session.game.phase == GamePhase::GameOver {
            break;
        }
    }
    events
}

fn completed_rolls(events: &[GameEvent]) -> Vec<(usize, u8)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::RollCompleted(o) => Some((o.player, o.frame_number)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_cpu_game_runs_to_completion() {
    let mut s = session(2024);
    s.start_with_roster(GameMode::VsCpu, cpu_roster());
    let events = play_out(&mut s);

    assert_eq!(s.game.phase, GamePhase::GameOver);
    for player in &s.game.players {
        assert_eq!(player.frames.len(), 10);
        assert!(player.is_finished());
        assert!((11..=21).contains(&player.rolls.len()));
        assert!(player.score <= 300);
        // Stored frames always agree with a fresh scoring pass
        assert_eq!(player.frames, scoring::score(&player.rolls));
        assert_eq!(player.score, scoring::total_score(&player.frames));
    }

    let final_scores: Vec<u32> = s.game.players.iter().map(|p| p.score).collect();
    let reported = events.iter().find_map(|e| match e {
        GameEvent::GameOver { scores } => Some(scores.clone()),
        _ => None,
    });
    assert_eq!(reported, Some(final_scores));
}

#[test]
fn test_two_players_alternate_frames() {
    let mut s = session(7);
    s.start(GameMode::TwoPlayer, None);
    let events = play_out(&mut s);
    assert_eq!(s.game.phase, GamePhase::GameOver);

    // Every roll of frame N by player 1 precedes player 2's, which precede frame N + 1
    let rolls = completed_rolls(&events);
    let mut ordered = rolls.clone();
    ordered.sort_by_key(|&(player, frame)| (frame, player));
    assert_eq!(rolls, ordered);

    let turns = events.iter().filter(|e| matches!(e, GameEvent::TurnChanged { .. })).count();
    // Nineteen hand-overs for two bowlers over ten frames
    assert_eq!(turns, 19);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = session(99);
    let mut b = session(99);
    a.start_with_roster(GameMode::VsCpu, cpu_roster());
    b.start_with_roster(GameMode::VsCpu, cpu_roster());
    play_out(&mut a);
    play_out(&mut b);

    let rolls = |s: &Session| s.game.players.iter().map(|p| p.rolls.clone()).collect::<Vec<_>>();
    assert_eq!(rolls(&a), rolls(&b));
}

#[test]
fn test_exit_mid_roll_and_restart() {
    let mut s = session(5);
    s.start(GameMode::VsCpu, CpuPersonality::by_id("sid"));
    s.queue_input(straight_swipe());
    for _ in 0..30 {
        s.step();
    }
    assert_eq!(s.game.phase, GamePhase::Rolling);

    s.queue_input(TickInput {
        exit_to_menu: true,
        ..Default::default()
    });
    let events = s.step();
    assert!(events.contains(&GameEvent::ReturnedToMenu));
    assert_eq!(s.game.phase, GamePhase::Menu);
    assert!(s.game.players.is_empty());

    s.start(GameMode::TwoPlayer, None);
    assert_eq!(s.game.phase, GamePhase::ReadyToBowl);
    assert!(s.game.players.iter().all(|p| p.rolls.is_empty()));
    assert_eq!(s.game.pins.iter().filter(|p| !p.is_down).count(), 10);
}

#[test]
fn test_profile_owner_collects_game_record() {
    let mut s = session(11);
    s.start(GameMode::TwoPlayer, None);
    play_out(&mut s);

    let owner_score = s.game.players[0].score;
    let stats = s.inventory.lifetime_stats.clone().unwrap_or_default();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.high_score, owner_score);
    // Only the first bowler's pins count toward the saved record
    let owner_pins: u64 = s.game.players[0].rolls.iter().map(|&p| u64::from(p)).sum();
    assert_eq!(stats.total_pins_knocked, owner_pins);
}
