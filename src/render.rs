use typeloop_core::color::{to_linear, to_srgb};
use typeloop_core::{Camera, InstanceRaw, TextShape};
use web_sys as web;

use crate::constants::{
    AMBIENT_COLOR, AMBIENT_INTENSITY, INITIAL_INSTANCE_CAPACITY, POINT_LIGHT_COLOR,
    POINT_LIGHT_INTENSITY, POINT_LIGHT_POS, POINT_LIGHT_RANGE,
};

mod helpers;
mod targets;
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    color: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth: DepthTarget,

    mesh: Option<MeshBuffers>,
    mesh_generation: u64,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    width: u32,
    height: u32,
    // true when the swapchain applies the sRGB curve itself
    srgb_surface: bool,
    clear_color: wgpu::Color,
    text_color: [f32; 3],
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {:?} {}x{}", format, config.width, config.height);

        let depth = DepthTarget::new(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("text_shader"),
            source: wgpu::ShaderSource::Wgsl(typeloop_core::TEXT_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("text_layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_text_pipeline(&device, &layout, &shader, format);
        let instance_buffer = helpers::create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            width: config.width,
            height: config.height,
            srgb_surface: format.is_srgb(),
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            depth,
            mesh: None,
            mesh_generation: 0,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            clear_color: wgpu::Color::BLACK,
            text_color: [1.0; 3],
        })
    }

    /// Colors in packed sRGB; converted once here for the surface in use.
    pub fn set_colors(&mut self, background: u32, text: u32) {
        let bg = self.surface_color(background);
        self.clear_color = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: 1.0,
        };
        self.text_color = self.surface_color(text);
    }

    fn surface_color(&self, color: u32) -> [f32; 3] {
        if self.srgb_surface {
            to_linear(color)
        } else {
            to_srgb(color)
        }
    }

    /// Re-upload the text mesh when the scene laid out a new shape.
    pub fn sync_mesh(&mut self, generation: u64, shape: Option<&TextShape>) {
        if generation == self.mesh_generation {
            return;
        }
        self.mesh_generation = generation;
        self.mesh = shape.filter(|s| !s.is_empty()).map(|s| {
            let (vertex_buffer, index_buffer) =
                helpers::create_mesh_buffers(&self.device, &s.vertices, &s.indices);
            MeshBuffers {
                vertex_buffer,
                index_buffer,
                index_count: s.indices.len() as u32,
            }
        });
        log::debug!(
            "[gpu] mesh generation {} ({} indices)",
            generation,
            self.mesh.as_ref().map_or(0, |m| m.index_count)
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface at the current size (also after `Lost`/`Outdated`).
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, self.width, self.height);
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        self.instance_buffer.destroy();
        self.instance_buffer = helpers::create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        instances: &[InstanceRaw],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let [lr, lg, lb] = self.surface_color(POINT_LIGHT_COLOR);
        let [ar, ag, ab] = self.surface_color(AMBIENT_COLOR);
        let [px, py, pz] = POINT_LIGHT_POS;
        let [tr, tg, tb] = self.text_color;
        let uniforms = SceneUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
            color: [tr, tg, tb, 1.0],
            light_pos: [px, py, pz, POINT_LIGHT_RANGE],
            light_color: [lr, lg, lb, POINT_LIGHT_INTENSITY],
            ambient: [ar, ag, ab, AMBIENT_INTENSITY],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let count = instances.len();
        if count > 0 {
            self.ensure_instance_capacity(count);
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("text_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // nothing laid out yet (font loading, relayout in flight): clear only
            if let (Some(mesh), true) = (&self.mesh, count > 0) {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..count as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
