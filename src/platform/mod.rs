//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Wall-clock seeding
//! - Fixed-step frame pacing

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Install the log backend (console on web, env_logger on native)
///
/// Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

/// Seed derived from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Converts host frame deltas into whole fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host frame delta and return how many `SIM_DT` steps to run
    ///
    /// Deltas are clamped to `MAX_FRAME_DT`; at most `MAX_SUBSTEPS` steps run
    /// per frame and any backlog beyond that is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= SIM_DT;
        }
        steps
    }

    /// Forget any partial step (after pausing or a tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_frames() {
        let mut clock = FrameClock::new();
        let total: u32 = (0..60).map(|_| clock.advance(1.0 / 60.0)).sum();
        // 120 Hz sim under a 60 Hz host, give or take float drift
        assert!((119..=120).contains(&total));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_bad_deltas() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
        assert_eq!(clock.advance(SIM_DT * 0.5), 1);
    }
}
