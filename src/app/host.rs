//! Winit host.
//!
//! Maps window events onto the engine: resizes go to [`Engine::resize`],
//! pointer events to [`Input`](crate::app::Input), and every redraw runs one
//! [`Engine::tick`]. Surface sizes are physical pixels, so the device pixel
//! ratio is already applied.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::app::input::MouseButton;
use crate::engine::Engine;
use crate::errors::Result;
use crate::render::Renderer;
use crate::settings::WindowSettings;
use crate::utils::fps_counter::FpsCounter;

/// Wheel pixels per line for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

/// Window host.
///
/// ```rust,ignore
/// App::new(settings.window).run(|window| {
///     let size = window.inner_size();
///     Ok(Engine::new(scene, HeadlessRenderer::new(size.width, size.height)))
/// })?;
/// ```
pub struct App {
    settings: WindowSettings,
}

impl App {
    #[must_use]
    pub fn new(settings: WindowSettings) -> Self {
        Self { settings }
    }

    /// Opens the window and runs the event loop until it is closed.
    ///
    /// `build` is called once the window exists and returns the engine to
    /// drive. A renderer that draws into the window can be created from the
    /// window handle there.
    pub fn run<R, F>(self, build: F) -> Result<()>
    where
        R: Renderer + 'static,
        F: FnOnce(&Arc<Window>) -> Result<Engine<R>> + 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner {
            settings: self.settings,
            build: Some(build),
            window: None,
            engine: None,
            fps: FpsCounter::new(),
        };
        event_loop.run_app(&mut runner)?;
        Ok(())
    }
}

struct AppRunner<R: Renderer, F> {
    settings: WindowSettings,
    build: Option<F>,
    window: Option<Arc<Window>>,
    engine: Option<Engine<R>>,
    fps: FpsCounter,
}

impl<R, F> AppRunner<R, F>
where
    R: Renderer,
    F: FnOnce(&Arc<Window>) -> Result<Engine<R>>,
{
    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine) else {
            return;
        };

        match engine.tick() {
            Ok(frame) => {
                if let Some(fps) = self.fps.update(frame.dt) {
                    log::info!("FPS: {fps:.1}");
                    window.set_title(&format!("{} | FPS: {fps:.1}", self.settings.title));
                }
            }
            // Already logged by the engine; try again next frame.
            Err(err) => log::debug!("Frame skipped: {err}"),
        }

        window.request_redraw();
    }
}

impl<R, F> ApplicationHandler for AppRunner<R, F>
where
    R: Renderer,
    F: FnOnce(&Arc<Window>) -> Result<Engine<R>>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.settings.width),
                f64::from(self.settings.height),
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let Some(build) = self.build.take() else {
            return;
        };
        match build(&window) {
            Ok(mut engine) => {
                let size = window.inner_size();
                engine.resize(size.width, size.height);
                self.engine = Some(engine);
                log::info!("Window ready ({}x{})", size.width, size.height);
            }
            Err(err) => {
                log::error!("Failed to build engine: {err}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw();
            return;
        }

        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => engine.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                engine.input.handle_cursor_move(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                engine
                    .input
                    .handle_mouse_button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x, y),
                    MouseScrollDelta::PixelDelta(pos) => (
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ),
                };
                engine.input.handle_scroll(dx, dy);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.engine.is_some()
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }
}
