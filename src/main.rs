//! LaneShark entry point
//!
//! On the web this exports a small handle the page drives from its
//! animation loop. On native it bowls a headless exhibition and prints the
//! scorecard.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use lane_shark::Session;
    use lane_shark::sim::{CpuPersonality, GameEvent, GameMode, SwipeGesture, TickInput};

    /// Game handle owned by the page
    #[wasm_bindgen]
    pub struct WebGame {
        session: Session,
        /// Banner for the most recent roll, shown until the next one
        banner: String,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebGame {
            lane_shark::platform::init_logging();
            log::info!("LaneShark starting...");
            WebGame {
                session: Session::load(),
                banner: String::new(),
            }
        }

        /// Start a game: "SOLO", "TWO_PLAYER" or "VS_CPU" (optionally with an opponent id)
        pub fn start(&mut self, mode: &str, opponent: Option<String>) {
            let mode = match mode {
                "TWO_PLAYER" => GameMode::TwoPlayer,
                "VS_CPU" => GameMode::VsCpu,
                _ => GameMode::Solo,
            };
            let opponent = opponent.as_deref().and_then(CpuPersonality::by_id);
            self.session.start(mode, opponent);
        }

        /// Tap / click / space
        pub fn advance(&mut self) {
            self.session.queue_input(TickInput {
                advance: true,
                ..Default::default()
            });
        }

        pub fn swipe(&mut self, distance: f32, duration_ms: f32, dx: f32, dy: f32) {
            self.session.queue_input(TickInput {
                swipe: Some(SwipeGesture {
                    distance,
                    duration_ms,
                    dx,
                    dy,
                }),
                ..Default::default()
            });
        }

        pub fn set_position(&mut self, x: f32) {
            self.session.queue_input(TickInput {
                position: Some(x),
                ..Default::default()
            });
        }

        /// Ball weight pick for the WEIGHT step
        pub fn set_weight(&mut self, weight: f32) {
            self.session.queue_input(TickInput {
                weight: Some(weight),
                ..Default::default()
            });
        }

        /// Spin slider value for the SPIN step
        pub fn set_spin(&mut self, spin: f32) {
            self.session.queue_input(TickInput {
                spin: Some(spin),
                ..Default::default()
            });
        }

        pub fn exit_to_menu(&mut self) {
            self.session.exit_to_menu();
        }

        /// Advance by the frame delta in seconds
        pub fn update(&mut self, dt: f32) {
            for event in self.session.update(dt) {
                if let GameEvent::RollCompleted(outcome) = event {
                    self.banner = outcome.event.banner();
                }
            }
        }

        pub fn phase(&self) -> String {
            format!("{:?}", self.session.game.phase)
        }

        pub fn message(&self) -> String {
            self.session.game.message.clone()
        }

        pub fn banner(&self) -> String {
            self.banner.clone()
        }

        pub fn take_level_up(&mut self) -> bool {
            self.session.take_level_up()
        }
    }

    impl Default for WebGame {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page constructs `WebGame` itself
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_shark::platform::{clock_seed, init_logging};
    use lane_shark::sim::{CpuPersonality, GameEvent, GameMode, GamePhase, Player};
    use lane_shark::{Session, Settings, UserInventory};

    init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    log::info!("LaneShark (native) exhibition, seed {}", seed);

    // Exhibitions never touch the saved profile
    let mut session = Session::new(seed, UserInventory::default(), Settings::load());
    let players: Vec<Player> = CpuPersonality::roster()
        .into_iter()
        .take(2)
        .enumerate()
        .map(|(i, personality)| Player::cpu(i as u32 + 1, personality))
        .collect();
    session.start_with_roster(GameMode::VsCpu, players);

    // Ten simulated minutes is far more than any game needs
    let max_frames = 60 * 60 * 10;
    for _ in 0..max_frames {
        for event in session.update(1.0 / 60.0) {
            match event {
                GameEvent::RollCompleted(outcome) => {
                    let name = session.game.players.get(outcome.player).map(|p| p.name.as_str()).unwrap_or("?");
                    log::info!(
                        "Frame {}: {} {} ({} pins, total {})",
                        outcome.frame_number,
                        name,
                        outcome.event.banner(),
                        outcome.pins_knocked,
                        outcome.total_score
                    );
                }
                GameEvent::GameOver { scores } => log::info!("Game over: {:?}", scores),
                _ => {}
            }
        }
        if session.game.phase == GamePhase::GameOver {
            break;
        }
    }

    if session.game.phase != GamePhase::GameOver {
        log::warn!("Exhibition did not finish, stopped in {:?}", session.game.phase);
    }

    for player in &session.game.players {
        let marks: Vec<String> = player.frames.iter().map(|f| format!("{:<3}", f.marks())).collect();
        println!("{:<8} |{}| {}", player.name, marks.join("|"), player.score);
    }
}
