//! The winit application handler driving one orrery window.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::canvas::Canvas;
use crate::control::Flow;
use crate::error::RunError;
use crate::gpu::GpuCanvas;
use crate::input::Input;
use crate::scene;
use crate::time::FrameClock;
use crate::world::World;

/// Window settings the builder hands to the app.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

pub(crate) struct App {
    world: World,
    settings: WindowSettings,
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    input: Input,
    clock: FrameClock,
    error: Option<RunError>,
}

impl App {
    pub fn new(world: World, settings: WindowSettings, input: Input) -> Self {
        Self {
            world,
            settings,
            window: None,
            canvas: None,
            input,
            clock: FrameClock::new(),
            error: None,
        }
    }

    /// The fatal error that stopped the loop, if any.
    pub fn take_error(&mut self) -> Option<RunError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let canvas = pollster::block_on(GpuCanvas::new(window.clone()))?;

        log::info!(
            "Opened \"{}\" with {} bodies at {} fps",
            self.settings.title,
            self.world.bodies().len(),
            self.settings.target_fps
        );

        window.request_redraw();
        self.window = Some(window);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick(self.settings.target_fps);
        if self.world.frame(self.input.drain(), delta) == Flow::Exit {
            event_loop.exit();
            return;
        }

        let Some(canvas) = &mut self.canvas else {
            return;
        };
        scene::draw(&self.world, canvas);

        match canvas.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => canvas.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout, frame skipped"),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, RunError::OutOfMemory);
                return;
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed at t = {:.2}s simulated", self.world.elapsed());
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { .. } | WindowEvent::Focused(_) => {
                self.input.handle_event(&event);
            }
            WindowEvent::Resized(physical_size) => {
                if let (Some(canvas), Some(window)) = (&mut self.canvas, &self.window) {
                    canvas.resize(physical_size, window.scale_factor());
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(canvas), Some(window)) = (&mut self.canvas, &self.window) {
                    canvas.resize(window.inner_size(), scale_factor);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
