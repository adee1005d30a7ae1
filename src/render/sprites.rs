use std::path::Path;

use image::{Rgba, RgbaImage};
use log::info;
use wgpu::util::DeviceExt;
use wgpu::*;

use crate::error::Result;
use crate::render::color;
use crate::render::draw_list::SpriteCmd;
use crate::render::shaders::SPRITE_SHADER;
use crate::render::viewport::Viewport;
use crate::resource_path::find_image;

const BOX_TEXTURE_SIZE: u32 = 64;
const BOX_BORDER: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    corner: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    center: [f32; 2],
    half_size: [f32; 2],
    color: [f32; 4],
    rotation: f32,
    _padding: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    screen: [f32; 4],
    offset: [f32; 4],
}

const VERTICES: &[Vertex] = &[
    Vertex { corner: [-1.0, -1.0] },
    Vertex { corner: [1.0, -1.0] },
    Vertex { corner: [1.0, 1.0] },
    Vertex { corner: [-1.0, 1.0] },
];

const INDICES: &[u16] = &[0, 1, 2, 0, 2, 3];

impl Vertex {
    fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &[VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: VertexFormat::Float32x2,
            }],
        }
    }
}

impl Instance {
    const ATTRIBUTES: [VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x4,
        4 => Float32,
    ];

    fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>() as BufferAddress,
            step_mode: VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn from_cmd(cmd: &SpriteCmd, format: TextureFormat) -> Self {
        Self {
            center: cmd.center.to_array(),
            half_size: (cmd.size * 0.5).to_array(),
            color: color::for_target(cmd.color, format),
            rotation: cmd.rotation,
            _padding: [0.0; 3],
        }
    }
}

/// White box with a slightly darker rim, used when no sprite image ships.
pub fn generated_box_image() -> RgbaImage {
    RgbaImage::from_fn(BOX_TEXTURE_SIZE, BOX_TEXTURE_SIZE, |x, y| {
        let edge = x.min(y).min(BOX_TEXTURE_SIZE - 1 - x).min(BOX_TEXTURE_SIZE - 1 - y);
        if edge < BOX_BORDER {
            Rgba([200, 200, 200, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// The shipped `images/box.png`, or the generated box when none is found.
pub fn load_box_image(assets_dir: Option<&Path>) -> Result<RgbaImage> {
    let Some(path) = find_image("box", assets_dir) else {
        info!("No box sprite found, using generated texture");
        return Ok(generated_box_image());
    };
    let img = image::open(&path)?.to_rgba8();
    info!("Loaded box sprite from {}", path.display());
    Ok(img)
}

pub struct SpriteRenderer {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
    format: TextureFormat,
}

impl SpriteRenderer {
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat, box_image: &RgbaImage) -> Self {
        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: ShaderSource::Wgsl(SPRITE_SHADER.into()),
        });

        let size = Extent3d {
            width: box_image.width(),
            height: box_image.height(),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Box Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            box_image.as_raw(),
            ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * box_image.width()),
                rows_per_image: Some(box_image.height()),
            },
            size,
        );
        let texture_view = texture.create_view(&TextureViewDescriptor::default());
        let sampler = device.create_sampler(&SamplerDescriptor {
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Sprite Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Globals {
                screen: [1.0, 1.0, 1.0, 0.0],
                offset: [0.0; 4],
            }]),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Sprite Bind Group Layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::VERTEX,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Texture {
                        multisampled: false,
                        view_dimension: TextureViewDimension::D2,
                        sample_type: TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 2,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Sampler(SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Sprite Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::TextureView(&texture_view),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Sprite Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc(), Instance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(ColorTargetState {
                    format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState::default(),
            multiview: None,
        });

        let vertex_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(VERTICES),
            usage: BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(INDICES),
            usage: BufferUsages::INDEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            format,
        }
    }

    pub fn render(
        &self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        sprites: &[SpriteCmd],
        viewport: &Viewport,
    ) {
        if sprites.is_empty() {
            return;
        }

        let offset = viewport.offset();
        let globals = Globals {
            screen: [viewport.physical.x, viewport.physical.y, viewport.scale(), 0.0],
            offset: [offset.x, offset.y, 0.0, 0.0],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[globals]));

        let instances: Vec<Instance> = sprites.iter().map(|cmd| Instance::from_cmd(cmd, self.format)).collect();
        let instance_buffer = device.create_buffer_init(&util::BufferInitDescriptor {
            label: Some("Sprite Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: BufferUsages::VERTEX,
        });

        let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Sprite Render Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Load,
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), IndexFormat::Uint16);
        render_pass.draw_indexed(0..INDICES.len() as u32, 0, 0..instances.len() as u32);
    }
}
