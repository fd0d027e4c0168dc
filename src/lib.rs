//! # Orrery
//!
//! A 2D Solar System simulation: the Sun fixed at the centre, planets on
//! circular orbits around it, moons on circular orbits around their planets,
//! all drawn with wgpu in a winit window.
//!
//! ## Quick Start
//!
//! ```ignore
//! use orrery::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Simulation::new()
//!         .with_title("Solar System Simulation")
//!         .with_initial_speed(2.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Bodies
//!
//! A body table is a slice of [`BodySpec`] rows. Each row names the body it
//! orbits (or none, for a fixed root like the Sun), its orbit radius in
//! pixels and its orbital period in simulated seconds. [`World::new`] checks
//! the table and rejects anything malformed with a [`ConfigError`] before a
//! window opens.
//!
//! ### Time
//!
//! Positions are a pure function of elapsed simulated time:
//!
//! ```text
//! angle    = (2π · t / period) mod 2π
//! position = anchor + orbit_radius · (cos angle, sin angle)
//! ```
//!
//! Each frame, [`World::frame`] applies the queued [`ControlEvent`]s and
//! advances `t` by the real frame delta times the speed multiplier, unless
//! paused. The same `t` always gives the same picture, regardless of frame
//! rate.
//!
//! ### Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | Space, P | Pause / resume |
//! | Up, `=` | Double speed (up to 16×) |
//! | Down, `-` | Halve speed (down to 0.1×) |
//! | Escape, Q | Quit |
//!
//! ### Drawing
//!
//! [`scene::draw`] paints a world onto anything implementing [`Canvas`]. The
//! window uses a wgpu-backed canvas; tests use a recording one.

mod body;
mod canvas;
pub mod config;
pub mod control;
mod error;
pub mod font;
mod gpu;
pub mod input;
pub mod orbit;
pub mod scene;
mod simulation;
pub mod time;
mod window;
mod world;

pub use body::{BodyId, CelestialBody, Color, RenderStyle};
pub use canvas::{Align, Canvas, TextStyle};
pub use config::{BodySpec, SpeedLimits, SOLAR_SYSTEM};
pub use control::{ControlEvent, Controls, Flow, RunState};
pub use error::{ConfigError, GpuError, RunError};
pub use glam::DVec2;
pub use gpu::GpuCanvas;
pub use input::{Input, KeyBindings, KeyCode};
pub use simulation::Simulation;
pub use world::World;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::body::{BodyId, CelestialBody, Color, RenderStyle};
    pub use crate::canvas::{Align, Canvas, TextStyle};
    pub use crate::config::{BodySpec, SpeedLimits, SOLAR_SYSTEM};
    pub use crate::control::{ControlEvent, Controls, Flow, RunState};
    pub use crate::error::{ConfigError, RunError};
    pub use crate::input::{KeyBindings, KeyCode};
    pub use crate::simulation::Simulation;
    pub use crate::time::FrameClock;
    pub use crate::world::World;
    pub use crate::DVec2;
}
