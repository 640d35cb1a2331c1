//! Ball kinematics on the lane
//!
//! Forward speed comes from the bowler's strength and the lane friction.
//! Hook accumulates into the heading and grows with distance travelled, so
//! the ball skids straight through the oil and breaks late on the back end.

use super::lane::LaneCondition;
use super::state::Ball;
use crate::consts::*;
use crate::{frames_for, heading_vector};

/// Base forward speed for a bowler (lane px per reference frame)
#[inline]
pub fn ball_speed(strength: f32) -> f32 {
    BASE_THROW_SPEED + strength * STRENGTH_SPEED_BONUS
}

/// How far into the dry back end the ball is, 0 at the foul line to 1 at the head pin
///
/// Monotonic non-decreasing in `y` and continuous.
pub fn oil_depth_factor(y: f32) -> f32 {
    let progress = ((y - BALL_START_Y) / (HEAD_PIN_Y - BALL_START_Y)).clamp(0.0, 1.0);
    progress.powf(OIL_DEPTH_EXPONENT)
}

/// Heading change in degrees per reference frame
pub fn hook_per_frame(ball: &Ball, lane: LaneCondition) -> f32 {
    ball.spin
        * ball.material.props().hook_potential
        * lane.props().hook_modifier
        * HOOK_SCALE
        * oil_depth_factor(ball.pos.y)
}

/// Ball x at which it drops into a gutter
pub const GUTTER_EDGE: f32 = LANE_HALF_WIDTH - BALL_RADIUS / 2.0;

/// Centre of the gutter channel the ball rides in
pub const GUTTER_CHANNEL_X: f32 = LANE_HALF_WIDTH + GUTTER_WIDTH / 2.0;

/// Advance the ball by `dt` seconds
///
/// A ball that has entered the gutter keeps rolling straight in the channel
/// with no further hook; it can never leave the gutter during the throw.
pub fn step_ball(ball: &Ball, strength: f32, lane: LaneCondition, dt: f32) -> Ball {
    let mut next = *ball;
    let frames = frames_for(dt);
    let speed = ball_speed(strength);
    let friction = lane.props().friction;

    if next.in_gutter {
        next.angle = 0.0;
        next.vel = glam::Vec2::new(0.0, speed * friction);
        next.pos.y += next.vel.y * frames;
        return next;
    }

    next.angle = (next.angle + hook_per_frame(&next, lane) * frames).clamp(-MAX_HEADING_DEG, MAX_HEADING_DEG);

    let dir = heading_vector(next.angle);
    next.vel = glam::Vec2::new(dir.x * speed, dir.y * speed * friction);
    next.pos += next.vel * frames;

    if next.pos.x.abs() > GUTTER_EDGE {
        log::debug!("Ball entered gutter at ({:.1}, {:.1})", next.pos.x, next.pos.y);
        next.in_gutter = true;
        next.pos.x = GUTTER_CHANNEL_X.copysign(next.pos.x);
        next.angle = 0.0;
        next.vel.x = 0.0;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::lane::BallMaterial;
    use proptest::prelude::*;

    fn ball(x: f32, spin: f32, material: BallMaterial) -> Ball {
        Ball::at_start(x, BALL_WEIGHT_NORMAL, spin, material)
    }

    #[test]
    fn test_straight_ball_stays_straight() {
        for lane in LaneCondition::ALL {
            let mut b = ball(0.0, 0.0, BallMaterial::Resin);
            while b.pos.y < PIN_DECK_EXIT_Y {
                b = step_ball(&b, 5.0, lane, SIM_DT);
                assert_eq!(b.angle, 0.0);
                assert_eq!(b.pos.x, 0.0);
            }
        }
    }

    #[test]
    fn test_forward_speed_uses_friction_once() {
        let b = ball(0.0, 0.0, BallMaterial::Plastic);
        let normal = step_ball(&b, 5.0, LaneCondition::Normal, SIM_DT);
        let oily = step_ball(&b, 5.0, LaneCondition::Oily, SIM_DT);
        let step = ball_speed(5.0) * frames_for(SIM_DT);
        assert!((normal.pos.y - step).abs() < 1e-4);
        assert!((oily.pos.y - step * 0.92).abs() < 1e-4);

        // Next step moves by the same amount: friction does not compound
        let oily2 = step_ball(&oily, 5.0, LaneCondition::Oily, SIM_DT);
        assert!(((oily2.pos.y - oily.pos.y) - step * 0.92).abs() < 1e-3);
    }

    #[test]
    fn test_hook_breaks_late() {
        let mut b = ball(-60.0, 0.4, BallMaterial::Resin);
        let mut angle_at_mid = 0.0;
        while b.pos.y < HEAD_PIN_Y {
            b = step_ball(&b, 5.0, LaneCondition::Dry, SIM_DT);
            if b.pos.y < HEAD_PIN_Y / 2.0 {
                angle_at_mid = b.angle;
            }
        }
        assert!(angle_at_mid > 0.0);
        // Most of the hook happens on the back half
        assert!(b.angle - angle_at_mid > angle_at_mid);
    }

    #[test]
    fn test_hook_direction_follows_spin() {
        let left = step_ball(&ball(0.0, -0.5, BallMaterial::Urethane).with_y(300.0), 5.0, LaneCondition::Normal, SIM_DT);
        let right = step_ball(&ball(0.0, 0.5, BallMaterial::Urethane).with_y(300.0), 5.0, LaneCondition::Normal, SIM_DT);
        assert!(left.angle < 0.0);
        assert!(right.angle > 0.0);
    }

    #[test]
    fn test_gutter_is_irreversible() {
        let mut b = ball(GUTTER_EDGE - 1.0, 0.0, BallMaterial::Plastic);
        b.angle = 10.0;
        b = step_ball(&b, 5.0, LaneCondition::Normal, SIM_DT);
        assert!(b.in_gutter);
        assert_eq!(b.pos.x, GUTTER_CHANNEL_X);
        assert_eq!(b.angle, 0.0);

        // Heavy reverse spin cannot pull it back out
        b.spin = -0.5;
        for _ in 0..200 {
            b = step_ball(&b, 5.0, LaneCondition::Dry, SIM_DT);
            assert!(b.in_gutter);
            assert_eq!(b.pos.x, GUTTER_CHANNEL_X);
        }
    }

    #[test]
    fn test_left_gutter() {
        let mut b = ball(-GUTTER_EDGE + 0.5, 0.0, BallMaterial::Plastic);
        b.angle = -5.0;
        let b = step_ball(&b, 5.0, LaneCondition::Normal, SIM_DT);
        assert!(b.in_gutter);
        assert_eq!(b.pos.x, -GUTTER_CHANNEL_X);
    }

    #[test]
    fn test_heading_never_turns_back() {
        let mut b = ball(0.0, 0.5, BallMaterial::Resin);
        b.pos.y = HEAD_PIN_Y;
        b.angle = MAX_HEADING_DEG - 0.1;
        let b = step_ball(&b, 5.0, LaneCondition::Dry, 0.1);
        assert!(b.angle <= MAX_HEADING_DEG);
        assert!(b.vel.y > 0.0);
    }

    impl Ball {
        fn with_y(mut self, y: f32) -> Self {
            self.pos.y = y;
            self
        }
    }

    proptest! {
        #[test]
        fn prop_depth_factor_monotonic(a in -100.0f32..1000.0, b in -100.0f32..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(oil_depth_factor(lo) <= oil_depth_factor(hi));
            prop_assert!((0.0..=1.0).contains(&oil_depth_factor(a)));
        }

        #[test]
        fn prop_depth_factor_continuous(y in 0.0f32..HEAD_PIN_Y) {
            let d = (oil_depth_factor(y + 0.01) - oil_depth_factor(y)).abs();
            prop_assert!(d < 1e-3);
        }

        #[test]
        fn prop_zero_spin_keeps_heading(
            angle in -20.0f32..20.0,
            y in 0.0f32..800.0,
            strength in 0.0f32..10.0,
        ) {
            for lane in LaneCondition::ALL {
                let mut b = ball(0.0, 0.0, BallMaterial::Resin);
                b.angle = angle;
                b.pos.y = y;
                let next = step_ball(&b, strength, lane, SIM_DT);
                prop_assert_eq!(next.angle, angle);
            }
        }
    }
}
