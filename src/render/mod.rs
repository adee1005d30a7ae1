pub mod color;
pub mod draw_list;
pub mod shaders;
pub mod sprites;
pub mod text_renderer;
pub mod viewport;

use std::sync::Arc;

use glam::Vec2;
use log::{info, warn};
use wgpu::*;
use winit::window::Window;

use crate::error::{Error, Result};
use draw_list::DrawList;
use sprites::SpriteRenderer;
use text_renderer::TextRenderer;
use viewport::Viewport;

pub struct WgpuRenderer {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
}

impl WgpuRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = Instance::new(InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(Error::NoAdapter)?;
        info!("Using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &DeviceDescriptor {
                    required_features: Features::empty(),
                    required_limits: Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            surface,
            surface_config,
            size,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    /// Next swapchain image, or `None` when this frame should be skipped.
    pub fn begin_frame(&mut self) -> Option<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                None
            }
            Err(e) => {
                warn!("Skipping frame: {}", e);
                None
            }
        }
    }

    pub fn end_frame(&mut self, frame: SurfaceTexture) {
        frame.present();
    }

    pub fn get_viewport_size(&self) -> (u32, u32) {
        (self.size.width, self.size.height)
    }
}

/// Draws a [`DrawList`]: clear, sprites, then text.
pub struct SceneRenderer {
    pub gpu: WgpuRenderer,
    sprites: SpriteRenderer,
    text: Option<TextRenderer>,
    design: Vec2,
}

impl SceneRenderer {
    pub fn new(
        gpu: WgpuRenderer,
        box_image: &image::RgbaImage,
        font_path: Option<&std::path::Path>,
        design: Vec2,
    ) -> Self {
        let format = gpu.surface_config.format;
        let sprites = SpriteRenderer::new(&gpu.device, &gpu.queue, format, box_image);
        let text = match font_path {
            Some(path) => match TextRenderer::new(gpu.device.clone(), gpu.queue.clone(), format, path) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("Text disabled: {}", e);
                    None
                }
            },
            None => {
                warn!("No font found under assets/fonts, text disabled");
                None
            }
        };
        Self { gpu, sprites, text, design }
    }

    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.gpu.get_viewport_size();
        Viewport::new(self.design, Vec2::new(width.max(1) as f32, height.max(1) as f32))
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    pub fn render(&mut self, list: &DrawList, clear: [f32; 4]) {
        let Some(frame) = self.gpu.begin_frame() else {
            return;
        };
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let viewport = self.viewport();
        let clear = color::for_target(clear, self.gpu.surface_config.format);

        let mut encoder = self.gpu.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        {
            let _clear_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: clear[3] as f64,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.sprites.render(&self.gpu.device, &self.gpu.queue, &mut encoder, &view, &list.sprites, &viewport);
        if let Some(text) = &self.text {
            text.render(&mut encoder, &view, &list.texts, &viewport);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.gpu.end_frame(frame);
    }
}
