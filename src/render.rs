use crate::constants::{CLEAR_COLOR, DEFAULT_MATCAP_RGBA};
use crate::core::{Camera, Geometry, SceneState, MATCAP_WGSL, TORUS_RADIAL_SEGMENTS, TORUS_RADIUS, TORUS_TUBE, TORUS_TUBULAR_SEGMENTS};
use glam::Mat4;
use web_sys as web;

mod helpers;
mod mesh;
use mesh::{InstanceRaw, MeshBuffers};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

impl CameraUniforms {
    fn from_camera(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    matcap_layout: wgpu::BindGroupLayout,
    matcap_sampler: wgpu::Sampler,
    matcap_texture: wgpu::Texture,
    matcap_bind_group: wgpu::BindGroup,

    // Shared donut geometry, drawn once per instance
    torus: MeshBuffers,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    // Title text, present once the font has loaded
    text: Option<MeshBuffers>,
    text_instance: wgpu::Buffer,

    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, width: u32, height: u32) -> anyhow::Result<Self> {
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
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
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
        let depth_view = helpers::create_depth_view(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("matcap_shader"),
            source: wgpu::ShaderSource::Wgsl(MATCAP_WGSL.into()),
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
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
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let matcap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("matcap_bgl"),
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
            ],
        });
        let matcap_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("matcap_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        // Neutral 1x1 matcap until the real texture arrives
        let (matcap_texture, matcap_view) =
            helpers::create_rgba_texture(&device, &queue, "matcap_default", 1, 1, &DEFAULT_MATCAP_RGBA);
        let matcap_bind_group =
            Self::matcap_bind_group(&device, &matcap_layout, &matcap_view, &matcap_sampler);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("matcap_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &matcap_layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_matcap_pipeline(&device, &pipeline_layout, &shader, format);

        let torus_geometry = Geometry::torus(
            TORUS_RADIUS,
            TORUS_TUBE,
            TORUS_RADIAL_SEGMENTS,
            TORUS_TUBULAR_SEGMENTS,
        );
        let torus = MeshBuffers::from_geometry(&device, "torus", &torus_geometry);
        let instance_capacity = crate::core::DONUT_COUNT;
        let instance_buffer = mesh::create_instance_buffer(&device, "donut_instances", instance_capacity);
        let text_instance = mesh::create_instance_buffer(&device, "text_instance", 1);
        queue.write_buffer(
            &text_instance,
            0,
            bytemuck::bytes_of(&InstanceRaw::from(Mat4::IDENTITY)),
        );

        log::info!(
            "[gpu] surface {}x{} {:?}, torus {} tris",
            config.width,
            config.height,
            format,
            torus_geometry.triangle_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            pipeline,
            camera_buffer,
            camera_bind_group,
            matcap_layout,
            matcap_sampler,
            matcap_texture,
            matcap_bind_group,
            torus,
            instance_buffer,
            instance_capacity,
            text: None,
            text_instance,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    fn matcap_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("matcap_bg"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Replace the matcap with a loaded image.
    pub fn set_matcap(&mut self, image: &image::RgbaImage) {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            log::warn!("[gpu] ignoring empty matcap image");
            return;
        }
        let (texture, view) =
            helpers::create_rgba_texture(&self.device, &self.queue, "matcap", width, height, image.as_raw());
        self.matcap_bind_group =
            Self::matcap_bind_group(&self.device, &self.matcap_layout, &view, &self.matcap_sampler);
        let previous = std::mem::replace(&mut self.matcap_texture, texture);
        log::info!(
            "[gpu] matcap {}x{} uploaded (replaces {}x{})",
            width,
            height,
            previous.width(),
            previous.height()
        );
    }

    pub fn set_text_mesh(&mut self, geometry: &Geometry) {
        if geometry.indices.is_empty() {
            self.text = None;
            return;
        }
        self.text = Some(MeshBuffers::from_geometry(&self.device, "text", geometry));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    /// Reconfigure the surface at the current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_view(&self.device, self.config.width, self.config.height);
    }

    fn write_instances(&mut self, scene: &SceneState) -> u32 {
        let raws: Vec<InstanceRaw> = scene.donut_matrices().into_iter().map(InstanceRaw::from).collect();
        if raws.len() > self.instance_capacity {
            self.instance_capacity = raws.len();
            self.instance_buffer =
                mesh::create_instance_buffer(&self.device, "donut_instances", self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raws));
        raws.len() as u32
    }

    pub fn render(&mut self, scene: &SceneState) -> Result<(), wgpu::SurfaceError> {
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms::from_camera(&scene.camera)),
        );
        let instance_count = self.write_instances(scene);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            rpass.set_bind_group(1, &self.matcap_bind_group, &[]);

            if instance_count > 0 {
                rpass.set_vertex_buffer(0, self.torus.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                rpass.set_index_buffer(self.torus.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..self.torus.index_count, 0, 0..instance_count);
            }

            if let Some(text) = &self.text {
                rpass.set_vertex_buffer(0, text.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.text_instance.slice(..));
                rpass.set_index_buffer(text.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..text.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
