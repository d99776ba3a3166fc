//! Ball physics stepper
//!
//! Advances one ball by one fixed tick: gravity, pin and wall collisions,
//! centering bias, jitter, and the settlement check. Collisions are tested
//! against the intended next position rather than the current one, which
//! keeps fast balls from tunneling through pins.
//!
//! The random terms here are gameplay, not noise: the deflection on pin
//! impact is what makes the outcome distribution stochastic. Every draw
//! goes through the caller's RNG so a seeded run replays identically.

use glam::Vec2;
use rand::Rng;

use super::board::Board;
use super::state::{Ball, PIN_FLASH_TICKS, SettlementEvent, WALL_FLASH_TICKS};
use crate::round_to_cents;
use crate::settings::PhysicsParams;

/// Advance `ball` by one tick against the static board geometry
///
/// Returns a settlement event the tick the ball first enters a payout
/// slot. The ball is marked inactive at that point but keeps falling;
/// removal is the session's job.
pub fn step(
    ball: &mut Ball,
    board: &Board,
    params: &PhysicsParams,
    rng: &mut impl Rng,
) -> Option<SettlementEvent> {
    let mut collided = false;

    // Gravity, with a touch of jitter standing in for air resistance.
    let jitter = params.gravity_jitter;
    ball.vel.y += params.gravity + rng.random_range(-jitter..=jitter);
    if ball.vel.y > params.max_fall_speed {
        ball.vel.y = params.max_fall_speed;
    }

    // Horizontal drag, only above a small threshold so settled drift
    // near zero is left alone.
    if ball.vel.x.abs() > params.drag_threshold {
        ball.vel.x *= params.horizontal_drag;
    }

    // Collisions are resolved against where the ball is heading.
    let mut intended = ball.pos + ball.vel;

    // Pin collisions. One collision per tick; first pin in scan order
    // wins. Strict < keeps an exact tangency from counting as a hit.
    if ball.ticks_since_collision > params.collision_cooldown_ticks {
        for pin in &board.pins {
            let delta = intended - *pin;
            let distance = delta.length();
            let min_distance = ball.radius + board.pin_radius;
            if distance < min_distance {
                collided = true;
                ball.ticks_since_collision = 0;
                ball.flash_ticks = PIN_FLASH_TICKS;

                // Normal from pin center to ball center. The separation
                // floor guards the coincident-centers case; at that point
                // the bounce degrades to pure deflection, never a NaN.
                let normal = delta / distance.max(params.min_separation);
                let impact_speed = ball.vel.length();

                // Push out past the surface so the ball does not re-stick.
                let overlap = min_distance - distance;
                intended += normal * overlap * params.push_out;

                // Inelastic reflection.
                let along_normal = ball.vel.dot(normal);
                ball.vel -= 2.0 * along_normal * normal * params.bounce_damping;

                // Harder impacts deflect more, up to the cap.
                let deflection = (impact_speed * params.deflection_per_speed)
                    .min(params.max_deflection);
                ball.vel.x += rng.random_range(-deflection..=deflection);

                // A ball must never come to rest on a pin.
                let speed = ball.vel.length();
                if speed > 0.0 && speed < params.min_bounce_speed {
                    ball.vel *= params.min_bounce_speed / speed;
                }
                break;
            }
        }
    }

    ball.pos = intended;

    // Centering bias: a deliberate fairness tuning, not physics. The pull
    // scales with distance from center and with the ball's risk level.
    let offset = ball.pos.x - board.center_x();
    let distance_factor = (offset.abs() / params.center_bias_range).min(1.0);
    ball.vel.x -= offset * ball.risk.center_bias(params) * distance_factor;

    // Walls sit at the outermost slot edges. Clamp and reflect only the
    // outward-going component.
    if ball.pos.x - ball.radius < board.left_wall {
        ball.pos.x = board.left_wall + ball.radius;
        ball.vel.x = ball.vel.x.abs() * params.wall_elasticity;
        collided = true;
        ball.flash_ticks = WALL_FLASH_TICKS;
    } else if ball.pos.x + ball.radius > board.right_wall {
        ball.pos.x = board.right_wall - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * params.wall_elasticity;
        collided = true;
        ball.flash_ticks = WALL_FLASH_TICKS;
    }

    // Tiny per-tick nudge for natural-looking motion.
    let tick_jitter = params.tick_jitter;
    ball.vel.x += rng.random_range(-tick_jitter..=tick_jitter);

    if !collided {
        ball.ticks_since_collision += 1;
    }
    // Flash decays every tick, including the tick that set it.
    if ball.flash_ticks > 0 {
        ball.flash_ticks -= 1;
    }

    // Settlement: first slot containing the ball center wins. Already
    // settled balls are inert here and just keep falling.
    if ball.active {
        if let Some(slot_index) = board.slot_at(ball.pos) {
            ball.active = false;
            let multiplier = board.multipliers.get(slot_index).unwrap_or(0.0);
            let amount = round_to_cents(ball.bet * multiplier);
            return Some(SettlementEvent {
                ball_id: ball.id,
                slot_index,
                bet: ball.bet,
                amount,
            });
        }
    }

    None
}

/// Upper bound on ticks a ball can stay on the board
///
/// Shape: board height over a minimum sustained downward speed, with a
/// generous slack factor. The post-bounce speed floor guarantees the ball
/// keeps moving, and gravity turns that motion downward between pin
/// contacts; bounces cost progress, which is what the slack absorbs. Used
/// by fairness harnesses and the termination tests; deliberately loose,
/// never tight.
pub fn max_ticks_bound(board: &Board, params: &PhysicsParams) -> u32 {
    let min_downward_speed = params.min_bounce_speed.min(params.max_fall_speed);
    let ticks = (board.height / min_downward_speed).ceil() as u32;
    ticks * 32
}
