//! Celestial bodies: the per-body record the world steps and the scene draws.

use glam::DVec2;

/// Index of a body inside a [`World`](crate::World).
///
/// Used as the non-owning back-reference from a moon to its planet, or from a
/// planet to the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(200, 200, 200);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear-ish `[0, 1]` components with the given alpha, as the GPU wants them.
    pub fn to_f32_array(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }
}

/// How a body is drawn.
///
/// All bodies share the same update logic; the style only decides which
/// decorations the scene adds around the disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Stationary light source. Labelled, no orbit ring.
    Star,
    /// Labelled, with an orbit ring.
    #[default]
    Planet,
    /// Orbit ring only; labels would pile up on top of the parent's.
    Moon,
}

impl RenderStyle {
    pub fn labelled(self) -> bool {
        matches!(self, RenderStyle::Star | RenderStyle::Planet)
    }
}

/// A validated body: fixed orbital parameters plus derived state.
///
/// Built by [`validate`](crate::config::validate) from a
/// [`BodySpec`](crate::config::BodySpec) table. `angle_rad` and `position` are
/// rewritten by every [`World::step`](crate::World::step) and are never
/// authoritative; they are always a function of elapsed simulation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub(crate) name: String,
    pub(crate) radius_px: f32,
    pub(crate) orbit_radius_px: f64,
    pub(crate) orbital_period_s: Option<f64>,
    pub(crate) color: Color,
    pub(crate) parent: Option<BodyId>,
    pub(crate) style: RenderStyle,
    pub(crate) angle_rad: f64,
    pub(crate) position: DVec2,
}

impl CelestialBody {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendered disc radius in screen units.
    pub fn radius_px(&self) -> f32 {
        self.radius_px
    }

    /// Distance from the anchor in screen units (0 for stationary bodies).
    pub fn orbit_radius_px(&self) -> f64 {
        self.orbit_radius_px
    }

    /// Simulated seconds per revolution, `None` when stationary.
    pub fn orbital_period_s(&self) -> Option<f64> {
        self.orbital_period_s
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The body this one orbits, `None` for roots such as the Sun.
    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    /// Current orbital phase in `[0, 2π)`.
    pub fn angle_rad(&self) -> f64 {
        self.angle_rad
    }

    /// Absolute position in world space: origin at the fixed centre, y up.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbital_period_s.is_some()
    }
}
