//! GPU state for the explorer window.
//!
//! Owns the wgpu surface, the lattice texture, and the single render
//! pipeline that draws the lattice as a nearest-filtered quad. The cell
//! buffer is rasterized on the CPU each frame and uploaded with
//! `write_texture`; for the lattice sizes the explorer targets this is far
//! below the cost of the egui pass itself.

#[cfg(feature = "egui")]
pub mod overlay;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::shader::{GridUniforms, GRID_SHADER};

/// Region of the window (physical pixels) the lattice is drawn into. The
/// egui panels claim the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// A viewport covering the whole surface.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Clamp to the surface so wgpu never sees an out-of-range viewport.
    fn clamped(self, surface_w: u32, surface_h: u32) -> Self {
        let x = self.x.clamp(0.0, surface_w as f32 - 1.0).max(0.0);
        let y = self.y.clamp(0.0, surface_h as f32 - 1.0).max(0.0);
        let max_w = (surface_w as f32 - x).max(1.0);
        let max_h = (surface_h as f32 - y).max(1.0);
        Self {
            x,
            y,
            width: self.width.clamp(1.0, max_w),
            height: self.height.clamp(1.0, max_h),
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    grid_texture: wgpu::Texture,
    grid_size: (u32, u32),
    #[cfg(feature = "egui")]
    ui_renderer: egui_wgpu::Renderer,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, grid_w: u32, grid_h: u32) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
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

        let grid_texture = create_grid_texture(&device, grid_w, grid_h);

        // Nearest filtering keeps cell edges sharp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Grid Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniforms = GridUniforms::fit(grid_w, grid_h, config.width, config.height);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grid Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = create_grid_bind_group(
            &device,
            &bind_group_layout,
            &grid_texture,
            &sampler,
            &uniform_buffer,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(GRID_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Grid Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
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

        #[cfg(feature = "egui")]
        let ui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group_layout,
            bind_group,
            sampler,
            grid_texture,
            grid_size: (grid_w, grid_h),
            #[cfg(feature = "egui")]
            ui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Recreate the lattice texture after a topology or size change.
    pub fn set_grid_size(&mut self, grid_w: u32, grid_h: u32) {
        if self.grid_size == (grid_w, grid_h) {
            return;
        }
        self.grid_texture = create_grid_texture(&self.device, grid_w, grid_h);
        self.bind_group = create_grid_bind_group(
            &self.device,
            &self.bind_group_layout,
            &self.grid_texture,
            &self.sampler,
            &self.uniform_buffer,
        );
        self.grid_size = (grid_w, grid_h);
    }

    /// Upload one frame of rasterized cells (RGBA, row-major, one pixel per
    /// cell). The buffer must match the current grid size.
    pub fn upload_grid(&self, pixels: &[u8]) {
        let (w, h) = self.grid_size;
        debug_assert_eq!(pixels.len(), (w * h * 4) as usize);
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.grid_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w * 4),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Render one frame: clear, draw the lattice quad into `viewport`, then
    /// paint the tessellated UI (when enabled) over the full surface, all in
    /// one render pass.
    pub fn render(
        &mut self,
        viewport: Viewport,
        #[cfg(feature = "egui")] overlay: Option<&overlay::OverlayFrame>,
    ) -> Result<(), wgpu::SurfaceError> {
        let viewport = viewport.clamped(self.config.width, self.config.height);
        let (grid_w, grid_h) = self.grid_size;
        let uniforms = GridUniforms::fit(
            grid_w,
            grid_h,
            viewport.width as u32,
            viewport.height as u32,
        );
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        #[cfg(feature = "egui")]
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: overlay.map(|frame| frame.pixels_per_point).unwrap_or(1.0),
        };

        // Upload changed UI textures and vertex buffers before the pass.
        #[cfg(feature = "egui")]
        if let Some(frame) = overlay {
            for (id, image_delta) in &frame.textures_delta.set {
                self.ui_renderer
                    .update_texture(&self.device, &self.queue, *id, image_delta);
            }
            self.ui_renderer.update_buffers(
                &self.device,
                &self.queue,
                &mut encoder,
                &frame.paint_jobs,
                &screen_descriptor,
            );
        }

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Grid Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color {
                                r: 0.015,
                                g: 0.015,
                                b: 0.03,
                                a: 1.0,
                            }),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            pass.set_viewport(
                viewport.x,
                viewport.y,
                viewport.width,
                viewport.height,
                0.0,
                1.0,
            );
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..6, 0..1);

            #[cfg(feature = "egui")]
            if let Some(frame) = overlay {
                pass.set_viewport(
                    0.0,
                    0.0,
                    self.config.width as f32,
                    self.config.height as f32,
                    0.0,
                    1.0,
                );
                self.ui_renderer
                    .render(&mut pass, &frame.paint_jobs, &screen_descriptor);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // Free textures egui retired this frame, after submit.
        #[cfg(feature = "egui")]
        if let Some(frame) = overlay {
            for id in &frame.textures_delta.free {
                self.ui_renderer.free_texture(id);
            }
        }

        Ok(())
    }
}

fn create_grid_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Grid Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_grid_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
    uniform_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Grid Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniform_buffer.as_entire_binding(),
            },
        ],
    })
}
