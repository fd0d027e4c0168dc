//! Static body table and start-up validation.
//!
//! Distances come from semi-major axes in AU at [`PIXELS_PER_AU`]; periods
//! from Earth days, played back at [`DAYS_PER_SECOND`] simulated days per
//! simulated second. Disc radii are visual only: planets are sized relative to
//! Earth at 3 px, never below 2 px or above 30 px.

use std::collections::HashMap;

use glam::DVec2;

use crate::body::{BodyId, CelestialBody, Color, RenderStyle};
use crate::error::ConfigError;

/// Screen units per astronomical unit.
pub const PIXELS_PER_AU: f64 = 30.0;

/// Earth days that pass per simulated second at speed 1.0.
pub const DAYS_PER_SECOND: f64 = 60.0;

/// Color of the orbit rings.
pub const ORBIT_COLOR: Color = Color::rgb(50, 50, 50);

/// One row of a body table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    pub radius_px: f32,
    pub orbit_radius_px: f64,
    /// `None` for stationary bodies.
    pub orbital_period_s: Option<f64>,
    pub color: Color,
    /// Name of the body this one orbits; `None` anchors it at the fixed centre.
    pub parent: Option<&'static str>,
    pub style: RenderStyle,
}

impl BodySpec {
    /// A stationary root body, such as the Sun.
    pub const fn star(name: &'static str, radius_px: f32, color: Color) -> Self {
        Self {
            name,
            radius_px,
            orbit_radius_px: 0.0,
            orbital_period_s: None,
            color,
            parent: None,
            style: RenderStyle::Star,
        }
    }

    /// A body on a circular orbit around `parent`.
    pub const fn orbiting(
        name: &'static str,
        parent: &'static str,
        radius_px: f32,
        orbit_radius_px: f64,
        orbital_period_s: f64,
        color: Color,
        style: RenderStyle,
    ) -> Self {
        Self {
            name,
            radius_px,
            orbit_radius_px,
            orbital_period_s: Some(orbital_period_s),
            color,
            parent: Some(parent),
            style,
        }
    }
}

/// The Sun, the eight planets and a handful of large moons.
///
/// Moon orbits are exaggerated so they clear their planet's disc. Io and
/// Europa are left out: at 60 days per second they lap Jupiter faster than
/// the frame rate can show.
pub const SOLAR_SYSTEM: &[BodySpec] = &[
    BodySpec::star("Sun", 5.0, Color::YELLOW),
    BodySpec::orbiting("Mercury", "Sun", 2.0, 0.39 * PIXELS_PER_AU, 88.0 / DAYS_PER_SECOND, Color::GRAY, RenderStyle::Planet),
    BodySpec::orbiting("Venus", "Sun", 2.0, 0.72 * PIXELS_PER_AU, 224.7 / DAYS_PER_SECOND, Color::rgb(255, 165, 0), RenderStyle::Planet),
    BodySpec::orbiting("Earth", "Sun", 3.0, 1.0 * PIXELS_PER_AU, 365.25 / DAYS_PER_SECOND, Color::BLUE, RenderStyle::Planet),
    BodySpec::orbiting("Mars", "Sun", 2.0, 1.52 * PIXELS_PER_AU, 687.0 / DAYS_PER_SECOND, Color::RED, RenderStyle::Planet),
    BodySpec::orbiting("Jupiter", "Sun", 30.0, 5.2 * PIXELS_PER_AU, 4332.59 / DAYS_PER_SECOND, Color::rgb(255, 215, 0), RenderStyle::Planet),
    BodySpec::orbiting("Saturn", "Sun", 27.0, 9.58 * PIXELS_PER_AU, 10759.22 / DAYS_PER_SECOND, Color::rgb(210, 180, 140), RenderStyle::Planet),
    BodySpec::orbiting("Uranus", "Sun", 11.0, 19.22 * PIXELS_PER_AU, 30688.5 / DAYS_PER_SECOND, Color::rgb(173, 216, 230), RenderStyle::Planet),
    BodySpec::orbiting("Neptune", "Sun", 11.0, 30.05 * PIXELS_PER_AU, 60182.0 / DAYS_PER_SECOND, Color::rgb(0, 0, 139), RenderStyle::Planet),
    BodySpec::orbiting("Moon", "Earth", 1.5, 7.0, 27.32 / DAYS_PER_SECOND, Color::GRAY, RenderStyle::Moon),
    BodySpec::orbiting("Ganymede", "Jupiter", 2.0, 38.0, 7.155 / DAYS_PER_SECOND, Color::rgb(180, 170, 160), RenderStyle::Moon),
    BodySpec::orbiting("Callisto", "Jupiter", 2.0, 46.0, 16.689 / DAYS_PER_SECOND, Color::rgb(120, 110, 100), RenderStyle::Moon),
    BodySpec::orbiting("Titan", "Saturn", 2.0, 36.0, 15.945 / DAYS_PER_SECOND, Color::rgb(230, 190, 90), RenderStyle::Moon),
];

/// Bounds and step for the speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLimits {
    pub min: f64,
    pub max: f64,
    /// Speed-up multiplies by this, slow-down divides by it.
    pub factor: f64,
}

impl Default for SpeedLimits {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 16.0,
            factor: 2.0,
        }
    }
}

impl SpeedLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.min > 0.0
            && self.max.is_finite()
            && self.min <= self.max
            && self.factor > 1.0
            && self.factor.is_finite();
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidSpeedLimits {
                min: self.min,
                max: self.max,
                factor: self.factor,
            })
        }
    }

    /// Clamp into `[min, max]`. Unlike `f64::clamp` this does not panic on
    /// limits that [`validate`](Self::validate) would reject.
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.max(self.min).min(self.max)
    }
}

/// Check a body table and turn it into bodies with resolved parent links.
///
/// Rejects empty tables, empty or repeated names, non-positive radii and
/// periods, orbit radii that do not match the body's motion, parents that are
/// not in the table, and parent chains that loop back on themselves. Angles
/// and positions of the returned bodies are zeroed; the world fills them in.
pub fn validate(specs: &[BodySpec]) -> Result<Vec<CelestialBody>, ConfigError> {
    if specs.is_empty() {
        return Err(ConfigError::NoBodies);
    }

    let mut index_by_name: HashMap<&str, usize> = HashMap::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        if spec.name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        if index_by_name.insert(spec.name, index).is_some() {
            return Err(ConfigError::DuplicateName(spec.name.to_string()));
        }
        check_geometry(spec)?;
    }

    let mut bodies = Vec::with_capacity(specs.len());
    for spec in specs {
        let parent = match spec.parent {
            Some(parent_name) => match index_by_name.get(parent_name) {
                Some(&index) => Some(BodyId(index)),
                None => {
                    return Err(ConfigError::UnknownParent {
                        body: spec.name.to_string(),
                        parent: parent_name.to_string(),
                    })
                }
            },
            None => None,
        };

        bodies.push(CelestialBody {
            name: spec.name.to_string(),
            radius_px: spec.radius_px,
            orbit_radius_px: spec.orbit_radius_px,
            orbital_period_s: spec.orbital_period_s,
            color: spec.color,
            parent,
            style: spec.style,
            angle_rad: 0.0,
            position: DVec2::ZERO,
        });
    }

    for (index, body) in bodies.iter().enumerate() {
        if depth(&bodies, BodyId(index)).is_none() {
            return Err(ConfigError::ParentCycle(body.name.clone()));
        }
    }

    Ok(bodies)
}

fn check_geometry(spec: &BodySpec) -> Result<(), ConfigError> {
    if !(spec.radius_px > 0.0 && spec.radius_px.is_finite()) {
        return Err(ConfigError::InvalidRadius {
            body: spec.name.to_string(),
            radius: spec.radius_px,
        });
    }

    let orbit_ok = match spec.orbital_period_s {
        Some(period) => {
            if !(period > 0.0 && period.is_finite()) {
                return Err(ConfigError::InvalidPeriod {
                    body: spec.name.to_string(),
                    period,
                });
            }
            spec.orbit_radius_px > 0.0 && spec.orbit_radius_px.is_finite()
        }
        None => spec.orbit_radius_px == 0.0,
    };

    if orbit_ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidOrbitRadius {
            body: spec.name.to_string(),
            orbit_radius: spec.orbit_radius_px,
        })
    }
}

/// Number of parent links between `id` and its root, `None` if the chain loops.
pub(crate) fn depth(bodies: &[CelestialBody], id: BodyId) -> Option<usize> {
    let mut hops = 0;
    let mut current = bodies.get(id.index())?.parent;
    while let Some(parent) = current {
        hops += 1;
        if hops > bodies.len() {
            return None;
        }
        current = bodies.get(parent.index())?.parent;
    }
    Some(hops)
}
