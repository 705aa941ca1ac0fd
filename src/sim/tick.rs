//! Fixed timestep simulation tick
//!
//! The whole collision model lives here: integrate one velocity's worth of
//! travel, then resolve wall contact by clamping the position to the wall and
//! reflecting the velocity. Collisions are detected by position comparison at
//! tick boundaries only - there is no sub-tick sweep.

use crate::sim::state::{Ball, Enclosure, SimState};

/// Advance one ball by one tick against the enclosure walls
///
/// Check order matters and is fixed: floor, ceiling, then horizontal. Later
/// checks see the corrected state of earlier ones, so when both vertical
/// checks fire in a single tick (radius at least half the box height) the
/// ceiling clamp's position write wins.
///
/// The damping is asymmetric on purpose: only the floor shaves
/// `restitution_loss` off the rebound speed. Repeated floor bounces can damp
/// the rebound to zero or below, after which the ball stops leaving the
/// floor; a ball with `vel.x == 0` is never checked against the side walls.
/// Both quirks are inherited behavior - `enforce_containment` is the opt-in
/// hardening for callers that want none of it.
pub fn step(ball: &mut Ball, bounds: &Enclosure) {
    ball.pos.y += ball.vel.y;
    ball.pos.x += ball.vel.x;

    // Floor: reflect, then shave off restitution_loss. After negation the
    // rebound is upward (negative), so adding the loss shrinks its magnitude.
    if ball.pos.y >= bounds.bottom - ball.radius && ball.vel.y > 0 {
        ball.pos.y = bounds.bottom - ball.radius;
        ball.vel.y = -ball.vel.y + ball.restitution_loss;
    }

    // Ceiling: lossless. Independent `if`, not `else if` - both vertical
    // checks may fire in one tick.
    if ball.pos.y <= bounds.top + ball.radius {
        ball.pos.y = bounds.top + ball.radius;
        ball.vel.y = -ball.vel.y;
    }

    // Side walls: lossless, gated on the sign of the velocity.
    if ball.vel.x > 0 {
        if ball.pos.x >= bounds.right - ball.radius {
            ball.pos.x = bounds.right - ball.radius;
            ball.vel.x = -ball.vel.x;
        }
    } else if ball.vel.x < 0 && ball.pos.x <= bounds.left + ball.radius {
        ball.pos.x = bounds.left + ball.radius;
        ball.vel.x = -ball.vel.x;
    }
}

/// Clamp a ball's center so its bounding circle lies inside the enclosure
///
/// Position only; velocity is left alone. Applied after `step` when
/// `strict_containment` is set, covering the degenerate cases `step`
/// inherits (stationary-horizontal balls, floor rebounds damped to a
/// standstill). `SimState::add_ball` guarantees the clamp range is non-empty.
pub fn enforce_containment(ball: &mut Ball, bounds: &Enclosure) {
    ball.pos.x = ball
        .pos
        .x
        .clamp(bounds.left + ball.radius, bounds.right - ball.radius);
    ball.pos.y = ball
        .pos
        .y
        .clamp(bounds.top + ball.radius, bounds.bottom - ball.radius);
}

/// Advance the whole world by one tick
///
/// Balls never interact, so per-ball order cannot affect the result; the
/// fixed id order is kept for reproducible logs.
pub fn tick(state: &mut SimState) {
    state.time_ticks += 1;
    for ball in &mut state.balls {
        step(ball, &state.enclosure);
        if state.strict_containment {
            enforce_containment(ball, &state.enclosure);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Color;
    use glam::IVec2;
    use proptest::prelude::*;

    fn demo_box() -> Enclosure {
        Enclosure::new(50, 550, 400, 700).unwrap()
    }

    fn ball(x: i32, y: i32, vx: i32, vy: i32) -> Ball {
        Ball::new(1, IVec2::new(x, y), IVec2::new(vx, vy), 10, 2, Color::Blue)
    }

    #[test]
    fn test_free_flight_is_pure_integration() {
        let bounds = demo_box();
        let mut b = ball(300, 550, 5, -3);
        step(&mut b, &bounds);
        assert_eq!(b.pos, IVec2::new(305, 547));
        assert_eq!(b.vel, IVec2::new(5, -3));
    }

    #[test]
    fn test_floor_bounce_clamps_and_damps() {
        // Worked scenario: ball at (500, 690), v = (5, 8), radius 10, loss 2.
        // Integrates to (505, 698), floor fires (698 >= 690, vy > 0):
        // clamp y to 690, vy becomes -8 + 2 = -6. x stays clear of the wall.
        let bounds = demo_box();
        let mut b = ball(500, 690, 5, 8);
        step(&mut b, &bounds);
        assert_eq!(b.pos, IVec2::new(505, 690));
        assert_eq!(b.vel, IVec2::new(5, -6));
    }

    #[test]
    fn test_floor_damping_decreases_each_rebound() {
        let bounds = demo_box();
        let floor_y = bounds.bottom - 10;
        let mut downward = 9;

        for expected_rebound in [-7, -5, -3, -1] {
            let mut b = ball(300, floor_y - 1, 0, downward);
            step(&mut b, &bounds);
            assert_eq!(b.pos.y, floor_y);
            assert_eq!(b.vel.y, expected_rebound);
            downward = -expected_rebound;
        }
    }

    #[test]
    fn test_exhausted_rebound_rests_on_floor() {
        // Downward speed 1 with loss 2: the "rebound" comes out at +1, still
        // downward, so the ball is re-clamped to the floor every tick.
        let bounds = demo_box();
        let floor_y = bounds.bottom - 10;
        let mut b = ball(300, floor_y, 0, 1);
        for _ in 0..5 {
            step(&mut b, &bounds);
            assert_eq!(b.pos.y, floor_y);
            assert_eq!(b.vel.y, 1);
        }
    }

    #[test]
    fn test_ceiling_bounce_is_lossless() {
        let bounds = demo_box();
        let mut b = ball(300, 412, 0, -5);
        step(&mut b, &bounds);
        assert_eq!(b.pos.y, bounds.top + 10);
        assert_eq!(b.vel.y, 5);
    }

    #[test]
    fn test_right_wall_bounce_is_lossless() {
        let bounds = demo_box();
        let mut b = ball(538, 550, 6, 0);
        step(&mut b, &bounds);
        assert_eq!(b.pos.x, bounds.right - 10);
        assert_eq!(b.vel.x, -6);
        assert_eq!(b.vel.y, 0);
    }

    #[test]
    fn test_left_wall_bounce_is_lossless() {
        let bounds = demo_box();
        let mut b = ball(62, 550, -6, 0);
        step(&mut b, &bounds);
        assert_eq!(b.pos.x, bounds.left + 10);
        assert_eq!(b.vel.x, 6);
    }

    #[test]
    fn test_corner_bounce_resolves_both_axes() {
        // Heading into the bottom-right corner: floor and right wall both
        // fire in the same tick.
        let bounds = demo_box();
        let mut b = ball(538, 688, 6, 8);
        step(&mut b, &bounds);
        assert_eq!(b.pos, IVec2::new(bounds.right - 10, bounds.bottom - 10));
        assert_eq!(b.vel, IVec2::new(-6, -6));
    }

    #[test]
    fn test_ceiling_clamp_wins_when_radius_spans_box() {
        // Radius 160 in a 300-tall box: floor clamp puts the center at 540,
        // which is above top + radius = 560, so the ceiling check also fires
        // and its position write wins.
        let bounds = demo_box();
        let mut b = Ball::new(1, IVec2::new(300, 545), IVec2::new(0, 1), 160, 2, Color::Red);
        step(&mut b, &bounds);
        assert_eq!(b.pos.y, bounds.top + 160);
    }

    #[test]
    fn test_stationary_horizontal_ball_is_not_corrected() {
        // vx == 0 skips the side-wall checks entirely; a ball embedded past
        // the right wall just stays there.
        let bounds = demo_box();
        let mut b = ball(560, 550, 0, 3);
        step(&mut b, &bounds);
        assert_eq!(b.pos.x, 560);
        assert_eq!(b.pos.y, 553);
    }

    #[test]
    fn test_enforce_containment_reclamps_both_axes() {
        let bounds = demo_box();
        let mut b = ball(560, 395, 0, 0);
        enforce_containment(&mut b, &bounds);
        assert_eq!(b.pos, IVec2::new(bounds.right - 10, bounds.top + 10));
        assert_eq!(b.vel, IVec2::new(0, 0));
    }

    #[test]
    fn test_strict_mode_keeps_embedded_ball_contained() {
        let settings = Settings {
            strict_containment: true,
            ..Default::default()
        };
        let mut state = SimState::new(&settings).unwrap();
        // Force a degenerate ball: embedded past the right wall, vx == 0.
        state
            .add_ball(IVec2::new(560, 550), IVec2::new(0, 3), 10, 2, Color::Red)
            .unwrap();

        for _ in 0..200 {
            tick(&mut state);
            for b in &state.balls {
                assert!(b.pos.x >= state.enclosure.left + b.radius);
                assert!(b.pos.x <= state.enclosure.right - b.radius);
                assert!(b.pos.y >= state.enclosure.top + b.radius);
                assert!(b.pos.y <= state.enclosure.bottom - b.radius);
            }
        }
    }

    #[test]
    fn test_tick_advances_every_ball_once() {
        let settings = Settings {
            ball_count: 3,
            strict_containment: true,
            ..Default::default()
        };
        let mut state = SimState::new(&settings).unwrap();
        let before = state.clone();

        tick(&mut state);
        assert_eq!(state.time_ticks, 1);

        for (old, new) in before.balls.iter().zip(&state.balls) {
            let mut expected = old.clone();
            step(&mut expected, &before.enclosure);
            enforce_containment(&mut expected, &before.enclosure);
            assert_eq!(new, &expected);
        }
    }

    #[test]
    fn test_trajectories_are_deterministic() {
        let settings = Settings {
            ball_count: 5,
            seed: 99999,
            ..Default::default()
        };
        let mut a = SimState::new(&settings).unwrap();
        let mut b = SimState::new(&settings).unwrap();

        for _ in 0..400 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a, b);
    }

    proptest! {
        /// Starting inside the legal region with per-tick speeds well under
        /// the box half-extents, one step never leaves the ball outside on
        /// either axis.
        #[test]
        fn prop_step_contains_ball(
            radius in 5i32..25,
            x0 in 0i32..1000,
            y0 in 0i32..1000,
            vx in -50i32..=50,
            vy in -50i32..=50,
        ) {
            let bounds = demo_box();
            // Map the raw coordinates into the legal region for this radius.
            let x = bounds.left + radius + x0 % (bounds.width() - 2 * radius + 1);
            let y = bounds.top + radius + y0 % (bounds.height() - 2 * radius + 1);
            let mut b = Ball::new(1, IVec2::new(x, y), IVec2::new(vx, vy), radius, 2, Color::Cyan);

            step(&mut b, &bounds);

            prop_assert!(b.pos.y >= bounds.top + radius);
            prop_assert!(b.pos.y <= bounds.bottom - radius);
            prop_assert!(b.pos.x >= bounds.left + radius);
            prop_assert!(b.pos.x <= bounds.right - radius);
        }

        /// Horizontal reflection never changes speed, and vertical speed only
        /// shrinks (by exactly the restitution loss) on a floor contact.
        #[test]
        fn prop_only_floor_bounces_lose_speed(
            radius in 5i32..25,
            x0 in 0i32..1000,
            y0 in 0i32..1000,
            vx in -50i32..=50,
            vy in -50i32..=50,
        ) {
            let bounds = demo_box();
            let x = bounds.left + radius + x0 % (bounds.width() - 2 * radius + 1);
            let y = bounds.top + radius + y0 % (bounds.height() - 2 * radius + 1);
            let mut b = Ball::new(1, IVec2::new(x, y), IVec2::new(vx, vy), radius, 2, Color::Cyan);

            step(&mut b, &bounds);

            prop_assert_eq!(b.vel.x.abs(), vx.abs());
            let hit_floor = b.pos.y == bounds.bottom - radius && vy > 0;
            if hit_floor {
                prop_assert_eq!(b.vel.y, -vy + b.restitution_loss);
            } else {
                prop_assert_eq!(b.vel.y.abs(), vy.abs());
            }
        }
    }
}
