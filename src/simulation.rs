//! Simulation builder and runner

use winit::event_loop::{ControlFlow, EventLoop};

use crate::config::{self, BodySpec, SpeedLimits};
use crate::control::Controls;
use crate::error::{ConfigError, RunError};
use crate::input::{Input, KeyBindings};
use crate::window::{App, WindowSettings};
use crate::world::World;

/// An orrery builder.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// use orrery::Simulation;
///
/// Simulation::new()
///     .with_title("Inner planets")
///     .with_initial_speed(4.0)
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: &'static [BodySpec],
    title: String,
    width: u32,
    height: u32,
    target_fps: u32,
    limits: SpeedLimits,
    initial_speed: f64,
    bindings: KeyBindings,
}

impl Simulation {
    /// Create a new simulation of the built-in Solar System with default settings.
    pub fn new() -> Self {
        Self {
            bodies: config::SOLAR_SYSTEM,
            title: "Solar System Simulation".to_string(),
            width: 1920,
            height: 1000,
            target_fps: 60,
            limits: SpeedLimits::default(),
            initial_speed: 1.0,
            bindings: KeyBindings::default(),
        }
    }

    /// Replace the body table.
    pub fn with_bodies(mut self, bodies: &'static [BodySpec]) -> Self {
        self.bodies = bodies;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Cap the frame rate. 0 leaves pacing to vsync alone.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_speed_limits(mut self, limits: SpeedLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Starting speed multiplier, clamped into the speed limits.
    pub fn with_initial_speed(mut self, speed: f64) -> Self {
        self.initial_speed = speed;
        self
    }

    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Validate the configuration and build the world without opening a window.
    pub fn build_world(&self) -> Result<World, ConfigError> {
        World::new(self.bodies, Controls::new(self.initial_speed, self.limits))
    }

    /// Run the simulation. This blocks until the window is closed.
    ///
    /// Configuration errors are reported before any window opens.
    pub fn run(self) -> Result<(), RunError> {
        let world = self.build_world()?;

        let settings = WindowSettings {
            title: self.title,
            width: self.width,
            height: self.height,
            target_fps: self.target_fps,
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(world, settings, Input::new(self.bindings));
        event_loop.run_app(&mut app)?;

        match app.take_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Color, RenderStyle};

    static BROKEN: &[BodySpec] = &[
        BodySpec::star("Sun", 5.0, Color::YELLOW),
        BodySpec::orbiting("Lost", "Nowhere", 2.0, 50.0, 3.0, Color::RED, RenderStyle::Planet),
    ];

    #[test]
    fn test_defaults_build_solar_system() {
        let world = Simulation::new().build_world().unwrap();
        assert_eq!(world.bodies().len(), config::SOLAR_SYSTEM.len());
        assert_eq!(world.controls().speed(), 1.0);
        assert!(!world.controls().is_paused());
    }

    #[test]
    fn test_initial_speed_is_clamped() {
        let world = Simulation::new().with_initial_speed(0.01).build_world().unwrap();
        assert_eq!(world.controls().speed(), 0.1);
    }

    #[test]
    fn test_bad_table_fails_before_window() {
        let err = Simulation::new().with_bodies(BROKEN).run().unwrap_err();
        assert!(matches!(
            err,
            RunError::Config(ConfigError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_builder_settings() {
        let sim = Simulation::new()
            .with_title("Test")
            .with_window_size(800, 600)
            .with_target_fps(0);
        assert_eq!(sim.title, "Test");
        assert_eq!((sim.width, sim.height), (800, 600));
        assert_eq!(sim.target_fps, 0);
    }
}
