use std::sync::Arc;

use glam::Vec2;
use log::{info, warn};
use pollster::FutureExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    event::{MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

use crate::audio::events::AudioEventQueue;
use crate::audio::AudioSystem;
use crate::config::Config;
use crate::error::Result;
use crate::game::layout::{DESIGN_HEIGHT, DESIGN_WIDTH};
use crate::game::lifecycle::LifecycleEvent;
use crate::game::SceneManager;
use crate::game_loop::GameLoop;
use crate::input::InputState;
use crate::render::sprites::{generated_box_image, load_box_image};
use crate::render::{SceneRenderer, WgpuRenderer};
use crate::resource_path::find_font;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub struct App {
    pub window: Arc<Window>,
    pub renderer: SceneRenderer,
    pub input: InputState,
    pub audio: Option<AudioSystem>,
    pub audio_events: AudioEventQueue,
    pub scenes: SceneManager,
    pub game_loop: GameLoop,
    clear_color: [f32; 4],
}

/// What the window loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl App {
    pub fn new(event_loop: &ActiveEventLoop, config: &Config) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let assets_dir = config.assets_dir.as_deref();
        let gpu = WgpuRenderer::new(window.clone()).block_on()?;
        let box_image = load_box_image(assets_dir).unwrap_or_else(|e| {
            warn!("Box sprite unusable, using generated texture: {}", e);
            generated_box_image()
        });
        let font_path = find_font(assets_dir);
        let renderer = SceneRenderer::new(
            gpu,
            &box_image,
            font_path.as_deref(),
            Vec2::new(DESIGN_WIDTH, DESIGN_HEIGHT),
        );

        let audio = match AudioSystem::new(config) {
            Ok(mut audio) => {
                audio.load_all_sounds(assets_dir);
                Some(audio)
            }
            Err(e) => {
                warn!("Audio disabled: {}", e);
                None
            }
        };

        let store: Box<dyn KeyValueStore> = match config.storage_path() {
            Some(path) => {
                info!("High score stored in {}", path.display());
                Box::new(FileStore::open(path))
            }
            None => {
                warn!("No data directory, high score will not persist");
                Box::new(MemoryStore::new())
            }
        };
        let scenes = SceneManager::new(store, StdRng::from_entropy());

        Ok(Self {
            window,
            renderer,
            input: InputState::new(),
            audio,
            audio_events: AudioEventQueue::new(),
            scenes,
            game_loop: GameLoop::new(config.tick_rate),
            clear_color: config.background_color(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Flow {
        match event {
            WindowEvent::CloseRequested => return Flow::Exit,
            WindowEvent::Resized(size) => self.resize(*size),
            WindowEvent::RedrawRequested => self.frame(),
            WindowEvent::Focused(focused) => {
                let event = if *focused { LifecycleEvent::Focus } else { LifecycleEvent::Blur };
                self.scenes.handle_lifecycle(event);
            }
            WindowEvent::Occluded(occluded) => {
                if *occluded {
                    self.scenes.handle_lifecycle(LifecycleEvent::Hidden);
                } else {
                    self.game_loop.reset();
                    self.scenes.handle_lifecycle(LifecycleEvent::Visible);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if event.state.is_pressed()
                        && !event.repeat
                        && self.scenes.handle_key(keycode, &mut self.audio_events)
                    {
                        return Flow::Exit;
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    if state.is_pressed() {
                        self.input.handle_mouse_button_press();
                    } else {
                        self.input.handle_mouse_button_release();
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.update_mouse_position(position.x as f32, position.y as f32);
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Input, fixed-step updates, audio, then draw.
    pub fn frame(&mut self) {
        let viewport = self.renderer.viewport();
        for pos in self.input.take_pointer_down() {
            self.scenes.handle_pointer(viewport.to_design(pos), &mut self.audio_events);
        }

        let scenes = &mut self.scenes;
        self.game_loop.tick(|dt| scenes.update(dt));

        for event in self.audio_events.drain() {
            if let Some(audio) = self.audio.as_mut() {
                audio.process_event(&event);
            }
        }

        let list = self.scenes.draw();
        self.renderer.render(&list, self.clear_color);
    }
}
