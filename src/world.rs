//! The simulated system: bodies, simulated time and controls.

use crate::body::{BodyId, CelestialBody};
use crate::config::{self, BodySpec, SpeedLimits};
use crate::control::{ControlEvent, Controls, Flow};
use crate::error::ConfigError;
use crate::orbit;
use crate::time;

/// Everything one frame of the orrery needs to update and draw.
///
/// State is threaded explicitly through [`World::frame`]; nothing here is
/// global, so any number of worlds can be stepped side by side in tests.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<CelestialBody>,
    /// Body indices sorted so every parent comes before its children.
    update_order: Vec<BodyId>,
    elapsed_s: f64,
    controls: Controls,
}

impl World {
    /// Validate a body table and place every body at its t = 0 position.
    pub fn new(specs: &[BodySpec], controls: Controls) -> Result<Self, ConfigError> {
        controls.limits().validate()?;
        let bodies = config::validate(specs)?;

        let mut update_order: Vec<BodyId> = (0..bodies.len()).map(BodyId).collect();
        // validate() already rejected cycles, so every depth is Some
        update_order.sort_by_key(|&id| config::depth(&bodies, id).unwrap_or(usize::MAX));

        let mut world = Self {
            bodies,
            update_order,
            elapsed_s: 0.0,
            controls,
        };
        world.recompute_positions();
        Ok(world)
    }

    /// The built-in Solar System at unit speed.
    pub fn solar_system() -> Result<Self, ConfigError> {
        Self::new(config::SOLAR_SYSTEM, Controls::new(1.0, SpeedLimits::default()))
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name() == name).map(BodyId)
    }

    /// Simulated seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_s
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Run one frame: apply `events`, then step by `real_delta` seconds.
    ///
    /// A quit event ends the frame immediately; the world is not stepped and
    /// events after it are ignored.
    pub fn frame<I>(&mut self, events: I, real_delta: f64) -> Flow
    where
        I: IntoIterator<Item = ControlEvent>,
    {
        for event in events {
            if self.controls.apply(event) == Flow::Exit {
                log::info!("Quit requested at t = {:.2}s simulated", self.elapsed_s);
                return Flow::Exit;
            }
        }
        self.step(real_delta);
        Flow::Continue
    }

    /// Advance simulated time by `real_delta` scaled by the current speed,
    /// unless paused, and recompute every body from the new time.
    pub fn step(&mut self, real_delta: f64) {
        self.elapsed_s = time::advance(
            self.elapsed_s,
            real_delta,
            self.controls.speed(),
            self.controls.is_paused(),
        );
        self.recompute_positions();
    }

    fn recompute_positions(&mut self) {
        let elapsed = self.elapsed_s;
        for &id in &self.update_order {
            let (parent, orbit_radius, period) = {
                let body = &self.bodies[id.index()];
                (body.parent, body.orbit_radius_px, body.orbital_period_s)
            };
            let anchor = parent
                .and_then(|p| self.bodies.get(p.index()))
                .map(|p| p.position)
                .unwrap_or_default();

            let body = &mut self.bodies[id.index()];
            body.angle_rad = orbit::angle_at(period, elapsed);
            body.position = anchor + orbit::orbital_offset(orbit_radius, period, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Color, RenderStyle};
    use crate::control::RunState;
    use glam::DVec2;

    fn toy_system() -> World {
        let specs = [
            BodySpec::star("Sun", 5.0, Color::YELLOW),
            BodySpec::orbiting("Planet", "Sun", 3.0, 100.0, 10.0, Color::BLUE, RenderStyle::Planet),
            BodySpec::orbiting("Moon", "Planet", 1.0, 10.0, 1.0, Color::GRAY, RenderStyle::Moon),
        ];
        World::new(&specs, Controls::default()).unwrap()
    }

    #[test]
    fn test_initial_positions() {
        let world = toy_system();
        assert_eq!(world.bodies()[0].position(), DVec2::ZERO);
        assert_eq!(world.bodies()[1].position(), DVec2::new(100.0, 0.0));
        assert_eq!(world.bodies()[2].position(), DVec2::new(110.0, 0.0));
    }

    #[test]
    fn test_quarter_period_scenario() {
        let mut world = toy_system();
        world.step(2.5);
        let planet = &world.bodies()[1];
        assert!((planet.angle_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((planet.position() - DVec2::new(0.0, 100.0)).length() < 1e-9);
    }

    #[test]
    fn test_paused_frame_does_not_move() {
        let mut world = toy_system();
        world.step(1.3);
        let before = world.bodies().to_vec();
        world.frame([ControlEvent::TogglePause], 0.7);
        world.step(5.0);
        assert_eq!(world.elapsed(), 1.3);
        assert_eq!(world.bodies(), &before[..]);
    }

    #[test]
    fn test_speed_applies_to_step() {
        let mut world = toy_system();
        world.frame([ControlEvent::SpeedUp, ControlEvent::SpeedUp], 1.0);
        assert_eq!(world.elapsed(), 4.0);
    }

    #[test]
    fn test_quit_stops_frame() {
        let mut world = toy_system();
        let flow = world.frame([ControlEvent::Quit, ControlEvent::TogglePause], 1.0);
        assert_eq!(flow, Flow::Exit);
        assert_eq!(world.elapsed(), 0.0);
        assert_eq!(world.controls().state(), RunState::Running);
    }

    #[test]
    fn test_update_order_handles_children_first_tables() {
        let specs = [
            BodySpec::orbiting("Moon", "Planet", 1.0, 10.0, 1.0, Color::GRAY, RenderStyle::Moon),
            BodySpec::orbiting("Planet", "Sun", 3.0, 100.0, 10.0, Color::BLUE, RenderStyle::Planet),
            BodySpec::star("Sun", 5.0, Color::YELLOW),
        ];
        let mut world = World::new(&specs, Controls::default()).unwrap();
        world.step(0.25);
        let moon = world.find("Moon").unwrap();
        let expected = orbit::position_at(world.bodies(), moon, world.elapsed());
        assert!((world.body(moon).unwrap().position() - expected).length() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_speed_limits() {
        let limits = SpeedLimits { min: 1.0, max: 0.5, factor: 2.0 };
        let err = World::new(config::SOLAR_SYSTEM, Controls::new(1.0, limits)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeedLimits { .. }));
    }
}
