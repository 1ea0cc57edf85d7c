//! Circle-circle collision detection and response
//!
//! Every body on the lane is a circle, so a single pairwise resolver
//! handles ball-pin and pin-pin contacts alike.

use glam::Vec2;

use super::state::Body;
use crate::consts::RESTITUTION;

/// Outcome of resolving one pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Not touching (or coincident centers, which are skipped)
    None,
    /// Overlap corrected, but the bodies were already moving apart
    Separating,
    /// Overlap corrected and an impulse of this magnitude exchanged
    Impulse(f32),
}

impl Contact {
    /// Whether the pair actually struck each other
    pub fn is_hit(&self) -> bool {
        matches!(self, Contact::Impulse(_))
    }
}

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < combined * combined
}

/// Separate two overlapping bodies and exchange an inelastic impulse.
///
/// Positional correction and impulse are both scaled by `ratio`, the
/// elapsed time in units of the reference interval. Bodies already moving
/// apart along the contact normal keep their velocities.
pub fn resolve(a: &mut Body, b: &mut Body, ratio: f32) -> Contact {
    if !circles_overlap(a.pos, a.radius, b.pos, b.radius) {
        return Contact::None;
    }

    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance == 0.0 {
        return Contact::None;
    }

    let overlap = a.radius + b.radius - distance;

    let normal = delta / distance;
    let correction = normal * (overlap / 2.0) * ratio;
    a.pos -= correction;
    b.pos += correction;

    let vel_along_normal = (b.vel - a.vel).dot(normal);
    if vel_along_normal > 0.0 {
        return Contact::Separating;
    }

    let inv_mass_a = a.inv_mass();
    let inv_mass_b = b.inv_mass();
    let j = -(1.0 + RESTITUTION) * vel_along_normal / (inv_mass_a + inv_mass_b) * ratio;
    let impulse = normal * j;
    a.vel -= impulse * inv_mass_a;
    b.vel += impulse * inv_mass_b;

    Contact::Impulse(j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, vx: f32, vy: f32, radius: f32, mass: f32) -> Body {
        Body {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius,
            mass,
        }
    }

    #[test]
    fn test_circles_overlap_excludes_touching() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(19.0, 0.0), 10.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(15.0, 15.0), 10.0));
    }

    #[test]
    fn test_overlap_is_corrected() {
        let mut a = body(100.0, 100.0, 0.0, 0.0, 10.0, 5.0);
        let mut b = body(105.0, 100.0, 0.0, 0.0, 10.0, 1.0);

        let contact = resolve(&mut a, &mut b, 1.0);

        assert!(contact.is_hit());
        assert!(a.pos.distance(b.pos) >= 20.0 - 1e-4);
    }

    #[test]
    fn test_separating_pair_keeps_velocities() {
        let mut a = body(100.0, 100.0, -5.0, 0.0, 10.0, 1.0);
        let mut b = body(115.0, 100.0, 5.0, 0.0, 10.0, 1.0);

        let contact = resolve(&mut a, &mut b, 1.0);

        assert_eq!(contact, Contact::Separating);
        assert_eq!(a.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(b.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let mut a = body(100.0, 100.0, 1.0, 0.0, 10.0, 1.0);
        let mut b = body(100.0, 100.0, 0.0, 0.0, 10.0, 1.0);

        assert_eq!(resolve(&mut a, &mut b, 1.0), Contact::None);
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_apart_bodies_untouched() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0, 1.0);
        let mut b = body(50.0, 0.0, -1.0, 0.0, 10.0, 1.0);

        assert_eq!(resolve(&mut a, &mut b, 1.0), Contact::None);
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_ratio_scales_response() {
        let mut a1 = body(100.0, 100.0, 5.0, 0.0, 10.0, 1.0);
        let mut b1 = body(115.0, 100.0, -5.0, 0.0, 10.0, 1.0);
        let mut a2 = a1;
        let mut b2 = b1;

        let j1 = resolve(&mut a1, &mut b1, 1.0);
        let j2 = resolve(&mut a2, &mut b2, 2.0);

        match (j1, j2) {
            (Contact::Impulse(j1), Contact::Impulse(j2)) => assert!((j2 - 2.0 * j1).abs() < 1e-4),
            other => panic!("expected impulses, got {:?}", other),
        }
        assert!(a2.pos.x < a1.pos.x);
        assert!(b2.pos.x > b1.pos.x);
    }

    #[test]
    fn test_head_on_ball_pushes_pin_forward() {
        // Ball rolling up the lane (negative y) into a resting pin
        let mut ball = body(175.0, 60.0, 0.0, -8.5, 25.0, 7.5);
        let mut pin = body(175.0, 30.0, 0.0, 0.0, 14.5, 1.0);

        assert!(resolve(&mut ball, &mut pin, 1.0).is_hit());
        assert!(pin.vel.y < 0.0);
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.y > -8.5);
    }

    proptest! {
        #[test]
        fn prop_momentum_exchange_is_balanced(
            dx in -20.0f32..20.0,
            dy in -20.0f32..20.0,
            vax in -10.0f32..10.0,
            vay in -10.0f32..10.0,
            vbx in -10.0f32..10.0,
            vby in -10.0f32..10.0,
            mass_a in 0.5f32..10.0,
            mass_b in 0.5f32..10.0,
            ratio in 0.25f32..3.0,
        ) {
            prop_assume!(dx * dx + dy * dy > 0.01);
            let mut a = body(0.0, 0.0, vax, vay, 14.5, mass_a);
            let mut b = body(dx, dy, vbx, vby, 14.5, mass_b);
            let before_a = a.vel;
            let before_b = b.vel;

            resolve(&mut a, &mut b, ratio);

            let dp_a = (a.vel - before_a) * mass_a;
            let dp_b = (b.vel - before_b) * mass_b;
            prop_assert!((dp_a + dp_b).length() < 1e-2);
        }

        #[test]
        fn prop_no_residual_overlap_at_reference_rate(
            dx in -20.0f32..20.0,
            dy in -20.0f32..20.0,
        ) {
            prop_assume!(dx * dx + dy * dy > 0.01);
            let mut a = body(0.0, 0.0, 0.0, 0.0, 14.5, 1.0);
            let mut b = body(dx, dy, 0.0, 0.0, 14.5, 1.0);

            resolve(&mut a, &mut b, 1.0);

            prop_assert!(a.pos.distance(b.pos) >= 29.0 - 1e-3);
        }
    }
}
