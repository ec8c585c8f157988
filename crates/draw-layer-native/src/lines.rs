use draw_layer::{BackendError, LineBackend, Segment, Viewport};
use glam::Vec2;

const LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

// Stand-in for the host's 3D scene behind the overlay.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

pub struct LineMaterial {
    pipeline: wgpu::RenderPipeline,
}

/// Draws solid segments as screen-space quads `thickness` pixels wide.
pub struct WgpuLines<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    vertex_buffer: Option<wgpu::Buffer>,
    vertices: Vec<LineVertex>,
    viewport: Viewport,
}

impl<'w> WgpuLines<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            vertex_buffer: None,
            vertices: Vec::new(),
            viewport: Viewport::new(size.width as f32, size.height as f32),
        })
    }

    pub fn window(&self) -> &'w winit::window::Window {
        self.window
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width as f32, self.config.height as f32)
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    // Pixel space has its origin bottom-left with +Y up.
    #[inline]
    fn to_ndc(&self, p: Vec2) -> [f32; 2] {
        let w = self.viewport.width.max(1.0);
        let h = self.viewport.height.max(1.0);
        [2.0 * p.x / w - 1.0, 2.0 * p.y / h - 1.0]
    }

    fn upload(&mut self) {
        let bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let fits = self
            .vertex_buffer
            .as_ref()
            .is_some_and(|b| b.size() >= bytes.len() as u64);
        if !fits {
            self.vertex_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("overlay_lines_vb"),
                size: (bytes.len() as u64).next_power_of_two().max(4096),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if let Some(vb) = &self.vertex_buffer {
            self.queue.write_buffer(vb, 0, bytes);
        }
    }
}

impl LineBackend for WgpuLines<'_> {
    type Material = LineMaterial;

    fn create_line_material(&mut self) -> Result<LineMaterial, BackendError> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("overlay_lines"),
                source: wgpu::ShaderSource::Wgsl(LINES_WGSL.into()),
            });
        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("overlay_lines_pl"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 8,
                    shader_location: 1,
                },
            ],
        }];
        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("overlay_lines_pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                // No culling: quad winding depends on segment direction.
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..wgpu::PrimitiveState::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            });
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(err) => Err(BackendError::MaterialUnavailable(err.to_string())),
            None => Ok(LineMaterial { pipeline }),
        }
    }

    fn release_line_material(&mut self, material: LineMaterial) {
        drop(material);
        self.vertex_buffer = None;
    }

    fn begin_lines(&mut self, _material: &LineMaterial, viewport: Viewport) {
        self.viewport = viewport;
        self.vertices.clear();
    }

    fn draw_line(&mut self, segment: &Segment, color: [f32; 3]) {
        let delta = segment.end - segment.start;
        let Some(dir) = delta.try_normalize() else {
            return;
        };
        let half = dir.perp() * (segment.thickness.max(1.0) * 0.5);
        let color = [color[0], color[1], color[2], 1.0];
        let corners = [
            segment.start - half,
            segment.start + half,
            segment.end + half,
            segment.start - half,
            segment.end + half,
            segment.end - half,
        ];
        for c in corners {
            self.vertices.push(LineVertex {
                pos: self.to_ndc(c),
                color,
            });
        }
    }

    fn end_lines(&mut self, material: &LineMaterial) -> Result<(), BackendError> {
        self.upload();

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(BackendError::Submit("surface lost, reconfigured".into()));
            }
            Err(e) => return Err(BackendError::Submit(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("overlay_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay_rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let (Some(vb), false) = (&self.vertex_buffer, self.vertices.is_empty()) {
                rpass.set_pipeline(&material.pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..self.vertices.len() as u32, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
