use anyhow::Result;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use color_clicky::app::{App, Flow};
use color_clicky::config::Config;
use color_clicky::error::Error;

struct ColorClicky {
    config: Config,
    app: Option<App>,
    startup_error: Option<Error>,
}

impl ColorClicky {
    fn new(config: Config) -> Self {
        Self {
            config,
            app: None,
            startup_error: None,
        }
    }
}

impl ApplicationHandler for ColorClicky {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, &self.config) {
            Ok(app) => {
                app.window.request_redraw();
                self.app = Some(app);
            }
            Err(e) => {
                error!("Startup failed: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        if app.window.id() != window_id {
            return;
        }
        if app.handle_window_event(&event) == Flow::Exit {
            info!("Exiting");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &self.app {
            app.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::load();
    let event_loop = EventLoop::new()?;
    let mut game = ColorClicky::new(config);
    event_loop.run_app(&mut game)?;

    match game.startup_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
