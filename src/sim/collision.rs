//! Ball-to-pin and pin-to-pin collision response
//!
//! Both passes use circle-overlap tests on the lane plane. Pins are processed
//! in ascending id order so a seeded run always resolves chain reactions the
//! same way.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Pin};
use crate::consts::*;
use crate::{decay, frames_for, safe_direction};

/// Record of a pin being knocked down this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knock {
    pub pin_id: u8,
    pub pos: Vec2,
    pub force: f32,
}

/// Impact force the ball delivers to a pin
///
/// Heavier balls hit harder and low-restitution coverstocks put more of that
/// energy into the pin. `item_multiplier` comes from equipped gear.
pub fn impact_force(ball: &Ball, item_multiplier: f32) -> f32 {
    let restitution = ball.material.props().restitution.max(0.05);
    IMPACT_FORCE_K * ball.impact_weight() * (1.0 / restitution) * item_multiplier
}

/// Resolve ball contact with the rack
///
/// A gutter ball touches nothing. Pins already down and still sliding are
/// skipped; a pin that is down but at rest can still be struck again, which
/// moves it but never changes its scored state.
pub fn resolve_ball_pins(ball: &Ball, pins: &mut [Pin], item_multiplier: f32, rng: &mut impl Rng) -> Vec<Knock> {
    let mut knocks = Vec::new();
    if ball.in_gutter {
        return knocks;
    }

    let force = impact_force(ball, item_multiplier);
    let radius_sq = PIN_COLLISION_RADIUS * PIN_COLLISION_RADIUS;

    for pin in pins.iter_mut() {
        if pin.is_down && pin.is_moving() {
            continue;
        }
        if pin.pos.distance_squared(ball.pos) >= radius_sq {
            continue;
        }

        let dir = safe_direction(pin.pos - ball.pos, Vec2::Y);
        let vel = dir * force + Vec2::new(0.0, PIN_FORWARD_BIAS);
        let angular = (rng.random::<f32>() - 0.5) * PIN_ANGULAR_JITTER + ball.spin * PIN_SPIN_KICK;
        pin.knock(vel, angular);

        knocks.push(Knock {
            pin_id: pin.id,
            pos: pin.pos,
            force,
        });
    }

    if !knocks.is_empty() {
        wobble_neighbours(pins, &knocks);
    }
    knocks
}

/// Integrate moving pins and resolve pin-on-pin knocks
///
/// Only a pin that is moving or already down can act as the striker, and only
/// standing pins can be struck.
pub fn step_pins(pins: &mut [Pin], dt: f32, rng: &mut impl Rng) -> Vec<Knock> {
    let frames = frames_for(dt);
    let radius_sq = PIN_PIN_COLLISION_RADIUS * PIN_PIN_COLLISION_RADIUS;
    let mut knocks = Vec::new();

    for i in 0..pins.len() {
        let pin = &mut pins[i];
        if pin.wobble > 0.0 {
            pin.wobble = (pin.wobble - dt * 2.0).max(0.0);
        }
        if !(pin.is_down || pin.is_moving()) {
            continue;
        }

        pin.pos += pin.vel * frames;
        pin.angle += pin.angular_vel * frames;
        pin.vel *= decay(PIN_DAMPING, frames);
        pin.angular_vel *= decay(PIN_ROTATION_DAMPING, frames);
        if !pin.is_moving() {
            pin.vel = Vec2::ZERO;
        }

        let striker = *pin;
        if !striker.is_moving() {
            continue;
        }

        for target in pins.iter_mut() {
            if target.id == striker.id || target.is_down {
                continue;
            }
            if target.pos.distance_squared(striker.pos) >= radius_sq {
                continue;
            }

            let vel = Vec2::new(
                striker.vel.x * IMPACT_FACTOR + (rng.random::<f32>() - 0.5),
                striker.vel.y * IMPACT_FACTOR + 1.0,
            );
            let angular = -striker.angular_vel * 0.5 + (rng.random::<f32>() - 0.5);
            target.knock(vel, angular);

            knocks.push(Knock {
                pin_id: target.id,
                pos: target.pos,
                force: striker.vel.length(),
            });
        }
    }

    if !knocks.is_empty() {
        wobble_neighbours(pins, &knocks);
    }
    knocks
}

/// Standing pins near a knock start wobbling (purely visual)
fn wobble_neighbours(pins: &mut [Pin], knocks: &[Knock]) {
    let reach_sq = (PIN_SPACING * 1.5) * (PIN_SPACING * 1.5);
    for pin in pins.iter_mut().filter(|p| !p.is_down) {
        if knocks.iter().any(|k| k.pos.distance_squared(pin.pos) < reach_sq) {
            pin.wobble = 1.0;
        }
    }
}

/// True once no pin is still sliding
pub fn pins_at_rest(pins: &[Pin]) -> bool {
    pins.iter().all(|p| !p.is_moving())
}
