//! Render pipeline configuration and creation

use wgpu::*;

use crate::gfx::{resources::DepthTexture, scene::vertex::Vertex3D};

/// Parameters of the mesh render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
    pub blend: Option<BlendState>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Mesh Pipeline".to_string(),
            bind_group_layouts: Vec::new(),
            // OBJ winding is not reliable enough to cull by default.
            cull_mode: None,
            depth_format: Some(DepthTexture::FORMAT),
            color_format: TextureFormat::Bgra8Unorm,
            blend: Some(BlendState::REPLACE),
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Sets all bind group layouts at once, in slot order
    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_depth_format(mut self, format: Option<TextureFormat>) -> Self {
        self.depth_format = format;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }
}

/// Creates a pipeline drawing [`Vertex3D`] triangle lists with `vs_main`/`fs_main`
pub fn create_pipeline(
    device: &Device,
    shader: &ShaderModule,
    config: &PipelineConfig,
) -> RenderPipeline {
    let bind_group_layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();
    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some(&format!("{} Layout", config.label)),
        bind_group_layouts: &bind_group_layout_refs,
        push_constant_ranges: &[],
    });

    let depth_stencil = config.depth_format.map(|format| DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: CompareFunction::Less,
        stencil: StencilState::default(),
        bias: DepthBiasState::default(),
    });

    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex3D::desc()],
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: config.color_format,
                blend: config.blend,
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
