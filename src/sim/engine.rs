//! Physics step
//!
//! Advances the ball and pins by an arbitrary elapsed time. All per-step
//! quantities are tuned for the reference interval and scaled by
//! `elapsed / reference`, so uneven host frame times give the same motion.

use glam::Vec2;

use super::collision::resolve;
use super::motion::PinMotion;
use super::state::{Ball, Lane, Pin};
use crate::consts::*;
use crate::truncate_to;

/// Elapsed time expressed in reference intervals
#[inline]
pub fn tick_ratio(elapsed_ms: f32) -> f32 {
    elapsed_ms / REFERENCE_INTERVAL_MS
}

/// Advance ball and pins by `elapsed_ms`.
///
/// Safe to call in any game phase: a parked ball and resting pins do not move.
pub fn advance(
    ball: &mut Ball,
    pins: &mut [Pin],
    lane: &Lane,
    motion: &mut dyn PinMotion,
    elapsed_ms: f32,
) {
    debug_assert!(pins.len() <= PIN_COUNT, "rack holds {} pins", pins.len());
    debug_assert!(
        pins.iter()
            .enumerate()
            .all(|(i, a)| pins[i + 1..].iter().all(|b| b.id != a.id)),
        "duplicate pin ids in rack"
    );

    let ratio = tick_ratio(elapsed_ms);

    // Ball only travels up the lane; sideways aim happens before release
    if ball.rolling {
        ball.body.pos.y -= ball.body.vel.y.abs() * ratio;
    }

    for pin in pins.iter_mut().filter(|p| p.active) {
        if resolve(&mut ball.body, &mut pin.body, ratio).is_hit() {
            pin.hit = true;
        }
    }

    for i in 0..pins.len() {
        let (head, tail) = pins.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.active {
            continue;
        }
        for b in tail.iter_mut().filter(|p| p.active) {
            if resolve(&mut a.body, &mut b.body, ratio).is_hit() {
                a.hit = true;
                b.hit = true;
            }
        }
    }

    motion.steer(pins, lane, ratio);
    integrate_pins(pins, lane, motion.deceleration(), ratio);
}

/// Move active pins, decay their velocity and drop any that left the lane
fn integrate_pins(pins: &mut [Pin], lane: &Lane, deceleration: f32, ratio: f32) {
    // A long host stall stops pins rather than reversing them
    let damping = (1.0 - deceleration * ratio).max(0.0);

    for pin in pins.iter_mut().filter(|p| p.active) {
        pin.body.pos += pin.body.vel * ratio;
        pin.body.vel = settle(pin.body.vel * damping);

        if !lane.contains(pin.body.pos) {
            log::debug!("Pin {} left the lane", pin.id);
            pin.deactivate();
        }
    }
}

/// Truncate a velocity to fixed precision so decaying motion reaches exactly zero
#[inline]
pub fn settle(vel: Vec2) -> Vec2 {
    Vec2::new(
        truncate_to(vel.x, VELOCITY_PRECISION),
        truncate_to(vel.y, VELOCITY_PRECISION),
    )
}
