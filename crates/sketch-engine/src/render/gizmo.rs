use glam::Vec3;

use crate::draw::{BackendError, DrawBackend};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::vertex::{straight_alpha_blend, CameraUniform, GpuVertex};

/// Per-stream vertex budget for one frame.
pub const DEFAULT_MAX_VERTICES: usize = 1 << 20;

/// wgpu host binding for the draw queue.
///
/// Flushing a queue into the renderer only appends vertices on the CPU. [`render`]
/// then uploads the accumulated line list and triangle list and issues at most two
/// draw calls, after which the streams are emptied for the next frame.
///
/// [`render`]: GizmoRenderer::render
pub struct GizmoRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    line_pipeline: Option<wgpu::RenderPipeline>,
    triangle_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    line_vbo: Option<wgpu::Buffer>,
    line_capacity: usize,
    triangle_vbo: Option<wgpu::Buffer>,
    triangle_capacity: usize,

    lines: Vec<GpuVertex>,
    triangles: Vec<GpuVertex>,
    max_vertices: usize,
}

impl Default for GizmoRenderer {
    fn default() -> Self {
        Self::with_max_vertices(DEFAULT_MAX_VERTICES)
    }
}

impl GizmoRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that rejects calls once a stream would exceed `max_vertices`.
    pub fn with_max_vertices(max_vertices: usize) -> Self {
        Self {
            pipeline_format: None,
            line_pipeline: None,
            triangle_pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            camera_ubo: None,
            line_vbo: None,
            line_capacity: 0,
            triangle_vbo: None,
            triangle_capacity: 0,
            lines: Vec::new(),
            triangles: Vec::new(),
            max_vertices,
        }
    }

    /// Line-list vertices waiting for the next [`render`](Self::render).
    #[inline]
    pub fn pending_lines(&self) -> &[GpuVertex] {
        &self.lines
    }

    /// Triangle-list vertices waiting for the next [`render`](Self::render).
    #[inline]
    pub fn pending_triangles(&self) -> &[GpuVertex] {
        &self.triangles
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    /// Drops pending vertices without drawing them.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }

    /// Uploads pending geometry and draws it into `target`, loading existing contents.
    ///
    /// Returns the number of draw calls issued (0..=2). Pending streams are emptied
    /// in every case.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> usize {
        if self.is_empty() {
            return 0;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.write_camera_uniform(ctx);

        ensure_capacity(ctx, &mut self.line_vbo, &mut self.line_capacity, self.lines.len(), "sketch gizmo line vbo");
        ensure_capacity(
            ctx,
            &mut self.triangle_vbo,
            &mut self.triangle_capacity,
            self.triangles.len(),
            "sketch gizmo triangle vbo",
        );

        let draws = self.encode(ctx, target);
        self.clear();
        draws
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn encode(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) -> usize {
        let Some(bind_group) = self.bind_group.as_ref() else { return 0 };

        let streams = [
            (&self.triangles, self.triangle_pipeline.as_ref(), self.triangle_vbo.as_ref()),
            (&self.lines, self.line_pipeline.as_ref(), self.line_vbo.as_ref()),
        ];
        for &(vertices, _, vbo) in &streams {
            if let (Some(vbo), false) = (vbo, vertices.is_empty()) {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(vertices.as_slice()));
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sketch gizmo pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_bind_group(0, bind_group, &[]);

        let mut draws = 0;
        // Triangles first so outlines stay visible on top of fills.
        for (vertices, pipeline, vbo) in streams {
            let (Some(pipeline), Some(vbo)) = (pipeline, vbo) else { continue };
            if vertices.is_empty() {
                continue;
            }
            let bytes = (vertices.len() * std::mem::size_of::<GpuVertex>()) as u64;
            rpass.set_pipeline(pipeline);
            rpass.set_vertex_buffer(0, vbo.slice(..bytes));
            rpass.draw(0..vertices.len() as u32, 0..1);
            draws += 1;
        }
        draws
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.line_pipeline.is_some()
            && self.triangle_pipeline.is_some()
        {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sketch gizmo shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/gizmo.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sketch gizmo bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: CameraUniform::min_binding_size(),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sketch gizmo pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[GpuVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(straight_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.line_pipeline = Some(pipeline("sketch gizmo line pipeline", wgpu::PrimitiveTopology::LineList));
        self.triangle_pipeline =
            Some(pipeline("sketch gizmo triangle pipeline", wgpu::PrimitiveTopology::TriangleList));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.camera_ubo = None;
        log::debug!("gizmo pipelines built for {:?}", ctx.surface_format);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sketch gizmo camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sketch gizmo bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_camera_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&CameraUniform::new(ctx.view_proj)));
    }

    fn reserve(&self, stream: &[GpuVertex], extra: usize, what: &str) -> Result<(), BackendError> {
        if stream.len() + extra > self.max_vertices {
            return Err(BackendError::Rejected(format!(
                "{what} stream full: {} + {extra} vertices exceeds {}",
                stream.len(),
                self.max_vertices
            )));
        }
        Ok(())
    }
}

fn ensure_capacity(
    ctx: &RenderCtx<'_>,
    vbo: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    label: &str,
) {
    if required == 0 || (required <= *capacity && vbo.is_some()) {
        return;
    }
    let new_cap = grown_capacity(required);
    *vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_cap * std::mem::size_of::<GpuVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}

#[inline]
fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(256)
}

impl DrawBackend for GizmoRenderer {
    fn draw_lines(&mut self, vertices: &[Vec3], color: Color) -> Result<(), BackendError> {
        if vertices.len() % 2 != 0 {
            return Err(BackendError::Rejected(format!(
                "line list needs an even vertex count, got {}",
                vertices.len()
            )));
        }
        self.reserve(&self.lines, vertices.len(), "line")?;
        self.lines.extend(vertices.iter().map(|&p| GpuVertex::new(p, color)));
        Ok(())
    }

    fn draw_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Color) -> Result<(), BackendError> {
        self.reserve(&self.triangles, 3, "triangle")?;
        self.triangles.extend([a, b, c].map(|p| GpuVertex::new(p, color)));
        Ok(())
    }
}
