//! wgpu renderer for the viewer
//!
//! Owns the surface, device, pipeline and the uploaded model, and turns each
//! frame's [`FrameMatrices`] into a single depth-tested render pass.

use std::{collections::HashMap, iter, path::PathBuf, sync::Arc};

use cgmath::{Matrix4, SquareMatrix};
use wgpu::TextureFormat;
use winit::window::Window;

use crate::{
    config::{LightSettings, ViewerConfig},
    error::ViewerError,
    frame_loop::{FrameMatrices, FrameSink},
    gfx::{
        camera::CameraUniform,
        resources::{
            update_global_ubo, DepthTexture, GlobalBindings, GlobalUBO, MaterialBindings,
            TextureResource, TransformBindings,
        },
        scene::{DrawModel, Model},
    },
};

use super::pipeline::{create_pipeline, PipelineConfig};

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,

    pipeline: wgpu::RenderPipeline,

    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    model: Model,
    clear_color: wgpu::Color,
    light: LightSettings,
}

impl RenderEngine {
    /// Creates the GPU context for `window` and uploads `model`
    pub async fn new(
        window: Arc<Window>,
        viewer_config: &ViewerConfig,
        model: Model,
    ) -> Result<RenderEngine, ViewerError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096, // Allow higher resolutions on native
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let present_mode = if viewer_config.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_texture = DepthTexture::new(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let transform_bindings = TransformBindings::new(&device);
        let material_bindings = MaterialBindings::new(&device, &viewer_config.material);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("phong.wgsl").into()),
        });

        let pipeline_config = PipelineConfig::default()
            .with_label("Phong Pipeline")
            .with_color_format(format)
            .with_bind_group_layouts(vec![
                global_bindings.bind_group_layout().clone(),
                transform_bindings.bind_group_layout().clone(),
                material_bindings.bind_group_layout().clone(),
            ]);
        let pipeline = create_pipeline(&device, &shader, &pipeline_config);

        let mut model = model;
        upload_model(
            &device,
            &queue,
            &mut model,
            &transform_bindings,
            &material_bindings,
        );

        Ok(RenderEngine {
            device: device.into(),
            config,
            format,
            surface,
            queue: queue.into(),
            pipeline,
            depth_texture,

            global_bindings,
            global_ubo,

            model,
            clear_color: viewer_config.clear_color,
            light: viewer_config.light,
        })
    }

    /// Reconfigures the surface. Zero sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture = DepthTexture::new(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    fn update(&mut self, frame: &FrameMatrices) {
        let camera = CameraUniform::from_matrices(frame.view, frame.projection, frame.eye);
        update_global_ubo(&mut self.global_ubo, &self.queue, camera, &self.light);

        for (index, mesh) in self.model.meshes.iter_mut().enumerate() {
            let model_matrix = frame
                .models
                .get(index)
                .copied()
                .unwrap_or_else(Matrix4::identity);
            mesh.update_transform(&self.queue, model_matrix);
        }
    }

    /// Acquires the next surface texture, or `None` when this frame must be skipped
    fn acquire_frame(&mut self) -> Result<Option<wgpu::SurfaceTexture>, ViewerError> {
        match self.surface.get_current_texture() {
            Ok(surface_texture) => Ok(Some(surface_texture)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(ViewerError::SurfaceOutOfMemory),
            Err(err) => {
                log::warn!("Surface error: {}, skipping frame", err);
                Ok(None)
            }
        }
    }

    fn render_frame(&self, surface_texture: wgpu::SurfaceTexture) {
        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    format: Some(self.format),
                    ..Default::default()
                });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            render_pass.draw_model(&self.model);
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
    }
}

impl FrameSink for RenderEngine {
    fn present(&mut self, frame: &FrameMatrices) -> Result<(), ViewerError> {
        self.update(frame);
        if let Some(surface_texture) = self.acquire_frame()? {
            self.render_frame(surface_texture);
        }
        Ok(())
    }
}

/// Uploads every mesh with its own transform uniform and a material bind group.
///
/// Diffuse textures are decoded once per path; a texture that fails to load is
/// replaced by plain white.
fn upload_model(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    model: &mut Model,
    transform_bindings: &TransformBindings,
    material_bindings: &MaterialBindings,
) {
    let white = TextureResource::white(device, queue);
    let mut textures: HashMap<PathBuf, Option<TextureResource>> = HashMap::new();

    for mesh in model.meshes.iter_mut() {
        let texture = match &mesh.diffuse_texture {
            Some(path) => textures
                .entry(path.clone())
                .or_insert_with(|| match load_texture(device, queue, path) {
                    Ok(texture) => Some(texture),
                    Err(err) => {
                        log::warn!(
                            "Failed to load texture '{}': {}, using white",
                            path.display(),
                            err
                        );
                        None
                    }
                })
                .as_ref()
                .unwrap_or(&white),
            None => &white,
        };

        let material_bind_group = material_bindings.create_bind_group(device, texture);
        mesh.upload(device, transform_bindings.create(device), material_bind_group);
    }

    log::info!(
        "Uploaded {} meshes ({} textures)",
        model.meshes.len(),
        textures.values().filter(|t| t.is_some()).count()
    );
}

fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &std::path::Path,
) -> Result<TextureResource, ViewerError> {
    let image = image::open(path)?.to_rgba8();
    let label = path.display().to_string();
    Ok(TextureResource::from_rgba_image(device, queue, &image, &label))
}
