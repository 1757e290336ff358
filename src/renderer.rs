use std::ops::Range;

use glam::{Vec2, Vec3, Vec4};
use log::{debug, warn};
use wgpu::util::DeviceExt;

use crate::canvas::DrawCommand;
use crate::texture::{TextureId, TextureManager};
use crate::types::{Dimension, Rect};

const INITIAL_INSTANCE_CAPACITY: usize = 1024;

#[repr(C, packed)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: Vec3,
    uv: Vec2,
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ScreenUniform {
    size: Vec2,
    _padding: Vec2,
}

impl ScreenUniform {
    fn new(screen: Dimension) -> Self {
        Self {
            size: Vec2::new(screen.width.max(1) as f32, screen.height.max(1) as f32),
            _padding: Vec2::ZERO,
        }
    }
}

/// Draws textured quads, one instance per [`DrawCommand`].
pub struct TextureRenderer {
    render_pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    vbuf: VertexBuffer,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    batches: Vec<Batch>,
}

impl TextureRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        screen: Dimension,
    ) -> Self {
        let screen_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Screen Bind Group Layout"),
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
        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Uniform"),
            contents: bytemuck::bytes_of(&ScreenUniform::new(screen)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Screen Bind Group"),
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("shader/texture.wgsl"));
        let render_pipeline = create_render_pipeline(
            device,
            &shader,
            &[Vertex::desc(), TextureInstance::desc()],
            &[&screen_bind_group_layout, texture_bind_group_layout],
            surface_format,
        );

        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);
        let vbuf = VertexBuffer::new(device, RECT_VERTICES, RECT_INDICES);

        Self {
            render_pipeline,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            vbuf,
            screen_buffer,
            screen_bind_group,
            batches: Vec::new(),
        }
    }

    pub fn resize(&self, queue: &wgpu::Queue, screen: Dimension) {
        queue.write_buffer(
            &self.screen_buffer,
            0,
            bytemuck::bytes_of(&ScreenUniform::new(screen)),
        );
    }

    /// Uploads the instances for `commands`. Must run before the render pass
    /// that calls [`TextureRenderer::draw`].
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture_manager: &TextureManager,
        commands: &[DrawCommand],
    ) {
        let mut instances = Vec::with_capacity(commands.len());
        let mut textures = Vec::with_capacity(commands.len());
        for command in commands {
            match texture_manager.sizes().query(command.texture) {
                Some(size) => {
                    instances.push(TextureInstance::new(command, size));
                    textures.push(command.texture);
                }
                None => warn!("draw of unknown texture {} dropped", command.texture),
            }
        }

        self.batches = batches(&textures);
        if instances.is_empty() {
            return;
        }

        if instances.len() > self.instance_capacity {
            let capacity = instances.len().next_power_of_two();
            debug!("growing instance buffer to {capacity} instances");
            self.instance_buffer = create_instance_buffer(device, capacity);
            self.instance_capacity = capacity;
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass, texture_manager: &TextureManager) {
        if self.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
        self.vbuf.set(render_pass);
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

        for batch in &self.batches {
            if let Some(texture) = texture_manager.get_texture(batch.texture) {
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                render_pass.draw_indexed(0..self.vbuf.index_count, 0, batch.instances.clone());
            }
        }
    }
}

/// Run of consecutive instances sharing one texture.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Batch {
    texture: TextureId,
    instances: Range<u32>,
}

/// Groups neighbouring draws of the same texture. Draws are never reordered,
/// so overlapping textures keep their painter's order.
fn batches(textures: &[TextureId]) -> Vec<Batch> {
    let mut out: Vec<Batch> = Vec::new();
    for (num, &texture) in textures.iter().enumerate() {
        let num = num as u32;
        if let Some(batch) = out.last_mut().filter(|batch| batch.texture == texture) {
            batch.instances.end = num + 1;
            continue;
        }
        out.push(Batch {
            texture,
            instances: num..num + 1,
        });
    }
    out
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct TextureInstance {
    /// Destination x, y, w, h in pixels.
    dst: Vec4,
    /// Source u, v, w, h in normalized texture coordinates.
    src: Vec4,
}

impl TextureInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4];

    fn new(command: &DrawCommand, texture_size: Dimension) -> Self {
        let dst = command.dst;
        Self {
            dst: Vec4::new(dst.x as f32, dst.y as f32, dst.w as f32, dst.h as f32),
            src: uv_rect(command.clip, texture_size),
        }
    }

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Normalized texture-space rectangle for a pixel clip.
fn uv_rect(clip: Option<Rect>, texture_size: Dimension) -> Vec4 {
    let Some(clip) = clip else {
        return Vec4::new(0.0, 0.0, 1.0, 1.0);
    };
    let width = texture_size.width.max(1) as f32;
    let height = texture_size.height.max(1) as f32;
    Vec4::new(
        clip.x as f32 / width,
        clip.y as f32 / height,
        clip.w as f32 / width,
        clip.h as f32 / height,
    )
}

// Unit quad with y pointing down, matching pixel coordinates.
const RECT_VERTICES: &[Vertex] = &[
    Vertex {
        position: Vec3::new(0.0, 0.0, 0.0),
        uv: Vec2::new(0.0, 0.0),
    },
    Vertex {
        position: Vec3::new(1.0, 0.0, 0.0),
        uv: Vec2::new(1.0, 0.0),
    },
    Vertex {
        position: Vec3::new(1.0, 1.0, 0.0),
        uv: Vec2::new(1.0, 1.0),
    },
    Vertex {
        position: Vec3::new(0.0, 1.0, 0.0),
        uv: Vec2::new(0.0, 1.0),
    },
];

const RECT_INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

struct VertexBuffer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl VertexBuffer {
    fn new(device: &wgpu::Device, vertex: &[Vertex], index: &[u16]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: None,
            contents: bytemuck::cast_slice(vertex),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: None,
            contents: bytemuck::cast_slice(index),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: index.len() as u32,
        }
    }

    fn set(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Texture Instances"),
        size: (capacity * size_of::<TextureInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_render_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    buffer_layout: &[wgpu::VertexBufferLayout],
    bind_group_layout: &[&wgpu::BindGroupLayout],
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: None,
        bind_group_layouts: bind_group_layout,
        immediate_size: 0,
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Texture Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: buffer_layout,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // The pixel-space quad flips winding when mapped to clip space.
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
