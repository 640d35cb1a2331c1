//! Regulation ten-pin scoring
//!
//! Frames are always recomputed from the flat roll history. The scorer is a
//! pure function of the roll list, so calling it after every roll is both
//! cheap at this scale (at most 21 rolls) and trivially idempotent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{FRAMES_PER_GAME, PINS_PER_RACK};

const ALL_PINS: u32 = PINS_PER_RACK as u32;

/// One of the ten scoring units of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingFrame {
    /// 1-based frame number
    pub frame_number: u8,
    /// Pins knocked per roll in this frame (1-3 entries once started)
    pub rolls: Vec<u8>,
    /// Frame score, `None` until its bonus rolls exist
    pub score: Option<u32>,
    pub is_strike: bool,
    pub is_spare: bool,
    /// Running total, `None` unless this and every earlier frame resolved
    pub cumulative_score: Option<u32>,
}

impl BowlingFrame {
    fn empty(frame_number: u8) -> Self {
        Self {
            frame_number,
            rolls: Vec::with_capacity(3),
            score: None,
            is_strike: false,
            is_spare: false,
            cumulative_score: None,
        }
    }

    pub fn is_tenth(&self) -> bool {
        self.frame_number as usize == FRAMES_PER_GAME
    }

    /// No more rolls will be added to this frame
    pub fn is_complete(&self) -> bool {
        let r = &self.rolls;
        if !self.is_tenth() {
            return self.is_strike || r.len() == 2;
        }
        match r.len() {
            3 => true,
            2 => r[0] != PINS_PER_RACK && u32::from(r[0]) + u32::from(r[1]) < ALL_PINS,
            _ => false,
        }
    }

    /// Pins standing for the next roll of this frame, `None` if complete
    pub fn pins_available(&self) -> Option<u8> {
        if self.is_complete() {
            return None;
        }
        let r = &self.rolls;
        let available = match r.len() {
            0 => PINS_PER_RACK,
            1 if r[0] == PINS_PER_RACK => PINS_PER_RACK,
            1 => PINS_PER_RACK - r[0],
            // Only the tenth frame reaches a third roll
            _ => {
                if r[0] == PINS_PER_RACK {
                    if r[1] == PINS_PER_RACK {
                        PINS_PER_RACK
                    } else {
                        PINS_PER_RACK - r[1]
                    }
                } else {
                    PINS_PER_RACK
                }
            }
        };
        Some(available)
    }

    /// Scorecard notation: `X` strike, `/` spare, `-` miss
    pub fn marks(&self) -> String {
        let mut standing = PINS_PER_RACK;
        let mut out = String::with_capacity(3);
        for &pins in &self.rolls {
            let pins = pins.min(standing);
            let mark = if pins == standing {
                if standing == PINS_PER_RACK { 'X' } else { '/' }
            } else if pins == 0 {
                '-'
            } else {
                char::from(b'0' + pins)
            };
            out.push(mark);
            standing -= pins;
            if standing == 0 {
                standing = PINS_PER_RACK;
            }
        }
        out
    }
}

/// Score a roll sequence into exactly ten frames
///
/// Pin counts above 10 are treated as 10. Trailing incomplete frames are
/// returned partially populated with `score = None`.
pub fn score(rolls: &[u8]) -> Vec<BowlingFrame> {
    let roll = |k: usize| rolls.get(k).map(|&p| u32::from(p.min(PINS_PER_RACK)));

    let mut frames = Vec::with_capacity(FRAMES_PER_GAME);
    let mut idx = 0;
    let mut running = Some(0u32);

    for number in 1..=FRAMES_PER_GAME {
        let mut frame = BowlingFrame::empty(number as u8);

        if let Some(r1) = roll(idx) {
            frame.rolls.push(r1 as u8);

            if number < FRAMES_PER_GAME {
                if r1 == ALL_PINS {
                    frame.is_strike = true;
                    frame.score = roll(idx + 1)
                        .zip(roll(idx + 2))
                        .map(|(b1, b2)| ALL_PINS + b1 + b2);
                    idx += 1;
                } else if let Some(r2) = roll(idx + 1) {
                    frame.rolls.push(r2 as u8);
                    if r1 + r2 == ALL_PINS {
                        frame.is_spare = true;
                        frame.score = roll(idx + 2).map(|b| ALL_PINS + b);
                    } else {
                        frame.score = Some(r1 + r2);
                    }
                    idx += 2;
                } else {
                    idx += 1;
                }
            } else if let Some(r2) = roll(idx + 1) {
                frame.rolls.push(r2 as u8);
                frame.is_strike = r1 == ALL_PINS;
                frame.is_spare = !frame.is_strike && r1 + r2 == ALL_PINS;
                if frame.is_strike || frame.is_spare {
                    if let Some(r3) = roll(idx + 2) {
                        frame.rolls.push(r3 as u8);
                        frame.score = Some(r1 + r2 + r3);
                    }
                } else {
                    frame.score = Some(r1 + r2);
                }
            } else {
                frame.is_strike = r1 == ALL_PINS;
            }
        }

        running = running.zip(frame.score).map(|(total, s)| total + s);
        frame.cumulative_score = running;
        frames.push(frame);
    }

    frames
}

/// The game is over once the tenth frame has a running total
pub fn is_game_over(frames: &[BowlingFrame]) -> bool {
    frames
        .get(FRAMES_PER_GAME - 1)
        .is_some_and(|f| f.cumulative_score.is_some())
}

/// Latest resolved running total (0 before anything resolves)
pub fn total_score(frames: &[BowlingFrame]) -> u32 {
    frames
        .iter()
        .rev()
        .find_map(|f| f.cumulative_score)
        .unwrap_or(0)
}

/// The frame the next roll belongs to, `None` once the game is complete
pub fn current_frame(frames: &[BowlingFrame]) -> Option<&BowlingFrame> {
    frames.iter().find(|f| !f.is_complete())
}

/// Pins the next roll may knock down, `None` once the game is complete
pub fn pins_available(rolls: &[u8]) -> Option<u8> {
    let frames = score(rolls);
    current_frame(&frames).and_then(BowlingFrame::pins_available)
}

/// Rejected roll recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollError {
    /// All ten frames are already complete
    GameComplete,
}

impl fmt::Display for RollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollError::GameComplete => write!(f, "game is complete, no further rolls accepted"),
        }
    }
}

impl std::error::Error for RollError {}

/// Append a roll, clamping it to the pins actually available
///
/// Returns the pin count that was recorded.
pub fn record_roll(rolls: &mut Vec<u8>, pins: u8) -> Result<u8, RollError> {
    let available = pins_available(rolls).ok_or(RollError::GameComplete)?;
    let recorded = pins.min(available);
    if recorded != pins {
        log::warn!(
            "Roll of {} pins exceeds the {} standing, clamped",
            pins,
            available
        );
    }
    rolls.push(recorded);
    Ok(recorded)
}

/// What the latest roll means for the lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollDisposition {
    /// Frame number the latest roll was scored in (0 before any roll)
    pub frame_number: u8,
    /// The bowler's frame is finished, rotate to the next player
    pub frame_complete: bool,
    /// Set a full rack before the next roll
    pub reset_rack: bool,
}

/// Derive turn rotation and rack policy from the roll history
pub fn disposition(rolls: &[u8]) -> RollDisposition {
    let frames = score(rolls);
    let Some(latest) = frames.iter().rev().find(|f| !f.rolls.is_empty()) else {
        return RollDisposition {
            frame_number: 0,
            frame_complete: false,
            reset_rack: true,
        };
    };

    let frame_complete = latest.is_complete();
    let reset_rack = frame_complete
        || match latest.rolls.as_slice() {
            [r1] if latest.is_tenth() => *r1 == PINS_PER_RACK,
            [r1, r2] if latest.is_tenth() => {
                (*r1 == PINS_PER_RACK && *r2 == PINS_PER_RACK)
                    || (*r1 != PINS_PER_RACK && u32::from(*r1) + u32::from(*r2) == ALL_PINS)
            }
            _ => false,
        };

    RollDisposition {
        frame_number: latest.frame_number,
        frame_complete,
        reset_rack,
    }
}
