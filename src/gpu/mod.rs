//! wgpu implementation of [`Canvas`].
//!
//! Every shape of a frame (discs, orbit rings and the pixels of bitmap text)
//! is one instance of a screen-space quad, so a frame is a single instanced
//! draw call. Shapes are collected on the CPU in a [`ShapeBatch`] and
//! uploaded on [`Canvas::present`].

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::body::Color;
use crate::canvas::{Align, Canvas, TextStyle};
use crate::error::GpuError;
use crate::font;

pub(crate) const SHADER_SOURCE: &str = include_str!("shapes.wgsl");

const INITIAL_INSTANCE_CAPACITY: usize = 4096;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeKind {
    Disc = 0,
    Ring = 1,
    Square = 2,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct ShapeInstance {
    pub center: [f32; 2],
    /// Radius for discs and rings, half the side for squares.
    pub half_extent: f32,
    /// Ring inner radius as a fraction of `half_extent`.
    pub inner: f32,
    pub color: [f32; 4],
    pub kind: u32,
    pub _pad: [u32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    screen_size: [f32; 2],
    _padding: [f32; 2],
}

/// sRGB-encoded channel to linear, for sRGB swapchain formats.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// CPU-side list of shapes for one frame.
#[derive(Debug, Clone)]
pub(crate) struct ShapeBatch {
    instances: Vec<ShapeInstance>,
    clear: Color,
    /// Convert colors to linear before upload.
    linear_output: bool,
}

impl ShapeBatch {
    pub fn new(linear_output: bool) -> Self {
        Self {
            instances: Vec::with_capacity(INITIAL_INSTANCE_CAPACITY),
            clear: Color::BLACK,
            linear_output,
        }
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    fn color(&self, color: Color) -> [f32; 4] {
        let mut c = color.to_f32_array(1.0);
        if self.linear_output {
            for channel in &mut c[..3] {
                *channel = srgb_to_linear(*channel);
            }
        }
        c
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.color(self.clear);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }

    fn push(&mut self, kind: ShapeKind, center: DVec2, half_extent: f32, inner: f32, color: Color) {
        let color = self.color(color);
        self.instances.push(ShapeInstance {
            center: center.as_vec2().to_array(),
            half_extent,
            inner,
            color,
            kind: kind as u32,
            _pad: [0; 3],
        });
    }

    pub fn clear(&mut self, color: Color) {
        self.instances.clear();
        self.clear = color;
    }

    pub fn fill_circle(&mut self, center: DVec2, radius: f32, color: Color) {
        self.push(ShapeKind::Disc, center, radius, 0.0, color);
    }

    pub fn stroke_circle(&mut self, center: DVec2, radius: f32, width: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let inner = (1.0 - width / radius).max(0.0);
        self.push(ShapeKind::Ring, center, radius, inner, color);
    }

    pub fn draw_text(&mut self, text: &str, position: DVec2, style: TextStyle) {
        let origin = match style.align {
            Align::Left => position,
            Align::Center => position - DVec2::new(font::text_width(text, style.size) * 0.5, 0.0),
        };
        let px = font::pixel_size(style.size);
        let half = (px * 0.5) as f32;
        let pixels: Vec<DVec2> = font::layout(text, origin, style.size).collect();
        for corner in pixels {
            self.push(ShapeKind::Square, corner + DVec2::splat(px * 0.5), half, 0.0, style.color);
        }
    }
}

/// A window surface the scene draws onto.
pub struct GpuCanvas {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    scale_factor: f64,
    batch: ShapeBatch,
}

impl GpuCanvas {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "GPU ready: {} ({:?}), surface {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_format,
            config.width,
            config.height
        );

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        let uniforms = Uniforms {
            screen_size: [
                (config.width as f64 / scale_factor) as f32,
                (config.height as f64 / scale_factor) as f32,
            ],
            _padding: [0.0; 2],
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ShapeInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                        wgpu::VertexAttribute {
                            offset: 32,
                            shader_location: 4,
                            format: wgpu::VertexFormat::Uint32,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let linear_output = surface_format.is_srgb();

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            uniform_buffer,
            uniform_bind_group,
            scale_factor,
            batch: ShapeBatch::new(linear_output),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.scale_factor = scale_factor;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Surface resized to {}x{} @{}x", new_size.width, new_size.height, scale_factor);
        }
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn update_uniforms(&mut self) {
        let size = self.size();
        let uniforms = Uniforms {
            screen_size: [size.x as f32, size.y as f32],
            _padding: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    fn upload_instances(&mut self) {
        let needed = self.batch.instances().len();
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("Instance buffer grown to {}", self.instance_capacity);
        }
        if needed > 0 {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(self.batch.instances()),
            );
        }
    }
}

impl Canvas for GpuCanvas {
    type Error = wgpu::SurfaceError;

    fn size(&self) -> DVec2 {
        DVec2::new(self.config.width as f64, self.config.height as f64) / self.scale_factor
    }

    fn clear(&mut self, color: Color) {
        self.batch.clear(color);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f32, color: Color) {
        self.batch.fill_circle(center, radius, color);
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f32, width: f32, color: Color) {
        self.batch.stroke_circle(center, radius, width, color);
    }

    fn draw_text(&mut self, text: &str, position: DVec2, style: TextStyle) {
        self.batch.draw_text(text, position, style);
    }

    fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms();
        self.upload_instances();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.batch.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let count = self.batch.instances().len() as u32;
            if count > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Shape Instance Buffer"),
        size: (capacity * std::mem::size_of::<ShapeInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
