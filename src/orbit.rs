//! Circular orbital motion as a pure function of simulated time.
//!
//! Nothing here integrates velocities: a body's phase is recomputed from
//! scratch every frame, `θ = 2π·t / P (mod 2π)`, so the same elapsed time
//! always lands every body on the same spot no matter how many frames it took
//! to get there.
//!
//! Coordinates are world space: origin at the fixed centre, x right, y up.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::body::{BodyId, CelestialBody};

/// Orbital phase in `[0, 2π)` after `elapsed` simulated seconds.
///
/// Stationary bodies (`None`, or a period that is not positive and finite)
/// stay at phase 0.
pub fn angle_at(period_s: Option<f64>, elapsed: f64) -> f64 {
    match period_s {
        Some(period) if period > 0.0 && period.is_finite() => {
            (TAU * elapsed / period).rem_euclid(TAU)
        }
        _ => 0.0,
    }
}

/// Offset from the anchor after `elapsed` simulated seconds.
pub fn orbital_offset(orbit_radius_px: f64, period_s: Option<f64>, elapsed: f64) -> DVec2 {
    if period_s.is_none() {
        return DVec2::ZERO;
    }
    let angle = angle_at(period_s, elapsed);
    DVec2::new(angle.cos(), angle.sin()) * orbit_radius_px
}

/// Absolute position of `id` after `elapsed` simulated seconds.
///
/// Walks `parent` links up to a root and sums the offsets on the way; a root's
/// anchor is the fixed centre. Bodies built by
/// [`validate`](crate::config::validate) are guaranteed acyclic, but the walk
/// is bounded by `bodies.len()` regardless.
pub fn position_at(bodies: &[CelestialBody], id: BodyId, elapsed: f64) -> DVec2 {
    let mut position = DVec2::ZERO;
    let mut current = Some(id);
    let mut hops = 0;

    while let Some(BodyId(index)) = current {
        let Some(body) = bodies.get(index) else { break };
        position += orbital_offset(body.orbit_radius_px, body.orbital_period_s, elapsed);
        current = body.parent;

        hops += 1;
        if hops > bodies.len() {
            break;
        }
    }

    position
}
