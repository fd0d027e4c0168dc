//! Error types for the orrery.
//!
//! Configuration problems are caught before any window opens; GPU and
//! windowing failures surface from [`Simulation::run`](crate::Simulation::run).

use std::fmt;

/// A body table or speed range that cannot be simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The body table is empty.
    NoBodies,
    /// A body has an empty name.
    EmptyName { index: usize },
    /// Two bodies share a name.
    DuplicateName(String),
    /// Rendered radius is zero, negative or not finite.
    InvalidRadius { body: String, radius: f32 },
    /// Orbit radius must be positive for orbiting bodies and zero for stationary ones.
    InvalidOrbitRadius { body: String, orbit_radius: f64 },
    /// Orbital period is zero, negative or not finite.
    InvalidPeriod { body: String, period: f64 },
    /// `parent` names a body that is not in the table.
    UnknownParent { body: String, parent: String },
    /// Following `parent` links from this body leads back to it.
    ParentCycle(String),
    /// Speed range is empty, non-positive, or the step factor does not grow.
    InvalidSpeedLimits { min: f64, max: f64, factor: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBodies => write!(f, "No bodies configured."),
            ConfigError::EmptyName { index } => write!(f, "Body #{} has an empty name", index),
            ConfigError::DuplicateName(name) => write!(f, "Body name '{}' is used more than once", name),
            ConfigError::InvalidRadius { body, radius } => {
                write!(f, "Body '{}' has invalid radius {} (must be > 0)", body, radius)
            }
            ConfigError::InvalidOrbitRadius { body, orbit_radius } => write!(
                f,
                "Body '{}' has invalid orbit radius {} (orbiting bodies need > 0, stationary bodies 0)",
                body, orbit_radius
            ),
            ConfigError::InvalidPeriod { body, period } => {
                write!(f, "Body '{}' has invalid orbital period {} (must be > 0)", body, period)
            }
            ConfigError::UnknownParent { body, parent } => {
                write!(f, "Body '{}' orbits unknown body '{}'", body, parent)
            }
            ConfigError::ParentCycle(name) => {
                write!(f, "Body '{}' is its own ancestor through parent links", name)
            }
            ConfigError::InvalidSpeedLimits { min, max, factor } => write!(
                f,
                "Invalid speed limits: min {} max {} factor {} (need 0 < min <= max, factor > 1)",
                min, max, factor
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(
                f,
                "No compatible GPU adapter found ({}). Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.",
                e
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the orrery.
#[derive(Debug)]
pub enum RunError {
    /// Body table or speed limits rejected before start-up.
    Config(ConfigError),
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The surface ran out of memory mid-run.
    OutOfMemory,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "Invalid configuration: {}", e),
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Gpu(e) => write!(f, "GPU error: {}", e),
            RunError::OutOfMemory => write!(f, "GPU surface ran out of memory"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Gpu(e) => Some(e),
            RunError::OutOfMemory => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<GpuError> for RunError {
    fn from(e: GpuError) -> Self {
        RunError::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display_names_body() {
        let err = ConfigError::UnknownParent {
            body: "Moon".into(),
            parent: "Terra".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Moon"));
        assert!(msg.contains("Terra"));
    }

    #[test]
    fn test_run_error_wraps_config_source() {
        let err = RunError::from(ConfigError::NoBodies);
        assert!(err.to_string().contains("No bodies"));
        assert!(err.source().is_some());
    }
}
