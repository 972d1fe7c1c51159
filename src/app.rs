use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window, WindowAttributes},
};

use crate::{
    config::ViewerConfig,
    error::ViewerError,
    frame_loop::{FrameLoop, FrameOutcome},
    gfx::{
        scene::{load_model, Model},
        RenderEngine,
    },
};

pub struct ViewerApp {
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    /// Taken by the render engine once the window exists.
    model: Option<Model>,
    frame_loop: FrameLoop,
    /// First fatal error; stops the event loop and is returned from `run`.
    error: Option<ViewerError>,
}

impl ViewerApp {
    /// Loads the model and builds the scene; no window is opened yet
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let model = load_model(&config.model_path)?;
        let frame_loop = FrameLoop::new(&config)?;

        Ok(Self {
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                model: Some(model),
                frame_loop,
                error: None,
            },
        })
    }

    /// Run the viewer until exit is requested (consumes self)
    pub fn run(mut self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    /// Stops the event loop; the error is reported by the caller of `run`.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>, ViewerError> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        // Locked keeps the cursor still while raw motion drives the camera.
        // X11 and Windows lack it, so fall back to Confined there.
        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            log::warn!("Could not capture the cursor: {}", err);
        }
        window.set_cursor_visible(false);

        Ok(window)
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(model) = self.model.take() else {
            return;
        };

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err),
        };

        let PhysicalSize { width, height } = window.inner_size();
        self.frame_loop.set_viewport(width, height);

        let renderer =
            pollster::block_on(RenderEngine::new(window.clone(), &self.config, model));
        match renderer {
            Ok(renderer) => {
                log::info!("Viewer window ready ({}x{})", width, height);
                self.render_engine = Some(renderer);
                self.window = Some(window);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.request_exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.frame_loop.set_viewport(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::RedrawRequested => match self.frame_loop.run_frame(render_engine) {
                Ok(FrameOutcome::Presented) => {}
                Ok(FrameOutcome::ExitRequested) => event_loop.exit(),
                Err(err) => self.fail(event_loop, err),
            },
            event => {
                self.frame_loop.handle_window_event(&event);
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }
        self.frame_loop.handle_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // A pending exit is picked up by the next RedrawRequested.
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
