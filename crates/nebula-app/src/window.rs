//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: the GPU and the
//! terrain renderer are created on the first `resumed`, `Resized` drives
//! [`FrameRenderer::on_resize`], and every `RedrawRequested` is one frame
//! tick through [`FrameRenderer::on_frame`].

use std::sync::Arc;

use nebula_config::Config;
use nebula_render::{
    FrameEncoder, FrameOutcome, FrameRenderer, FrameTarget, RenderContext, RenderContextError,
    RendererError, ShaderLibrary, SurfaceError, init_render_context_blocking,
};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::input::OrbitInput;
use crate::scene::{SceneError, build_terrain, build_view};

/// Fatal startup failures; each ends the session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("renderer initialization failed: {0}")]
    Renderer(#[from] RendererError),
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Config clear color as a wgpu color.
pub fn clear_color_from_config(config: &Config) -> wgpu::Color {
    let [r, g, b, a] = config.render.clear_color;
    wgpu::Color { r, g, b, a }
}

/// Shader library reading from the configured shader directory, if any.
pub fn shader_library_from_config(config: &Config) -> ShaderLibrary {
    match &config.render.shader_dir {
        Some(dir) => {
            info!("Loading shaders from {}", dir.display());
            ShaderLibrary::new().with_shader_dir(dir.clone())
        }
        None => ShaderLibrary::new(),
    }
}

/// Window, GPU context and renderer for one session.
pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<FrameRenderer>,
    input: OrbitInput,
    frame_count: u64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let input = OrbitInput::new(config.orbit.drag_sensitivity, config.orbit.zoom_step);
        Self {
            config,
            window: None,
            gpu: None,
            renderer: None,
            input,
            frame_count: 0,
        }
    }

    /// Frames submitted so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Build the terrain and renderer against a freshly created GPU context.
    fn initialize_rendering(&self, gpu: &RenderContext) -> Result<FrameRenderer, AppError> {
        let mesh = build_terrain(&self.config.terrain)?;
        let view = build_view(&self.config, mesh.center())?;

        let (width, height) = gpu.size();
        let mut shaders = shader_library_from_config(&self.config);
        let mut renderer =
            FrameRenderer::new(view).with_clear_color(clear_color_from_config(&self.config));
        renderer.initialize(
            &gpu.device,
            &mut shaders,
            gpu.surface_format,
            &mesh,
            width,
            height,
        )?;
        Ok(renderer)
    }

    /// Create the window, GPU context and renderer, then request the first
    /// frame.
    fn start_session(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let renderer = self.initialize_rendering(&gpu)?;

        window.request_redraw();
        self.renderer = Some(renderer);
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    /// Apply input gathered since the last frame to the view.
    fn apply_input(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Some((delta_azimuth, delta_elevation)) = self.input.take_rotation() {
            renderer.view_mut().orbit(delta_azimuth, delta_elevation);
        }
        if let Some(factor) = self.input.take_zoom() {
            renderer.view_mut().zoom(factor);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_mut()) else {
            return;
        };
        gpu.resize(width, height);
        let (width, height) = gpu.size();
        renderer.on_resize(&gpu.device, width, height);
        info!("Window resized to {}x{}", width, height);
    }

    /// One frame tick. Returns `false` when the session must end.
    fn redraw(&mut self) -> bool {
        self.apply_input();

        let (Some(gpu), Some(renderer)) = (self.gpu.as_ref(), self.renderer.as_mut()) else {
            return true;
        };

        let frame = match gpu.get_current_texture() {
            Ok(texture) => Some(FrameEncoder::new(
                &gpu.device,
                gpu.queue.clone(),
                FrameTarget::Surface(texture),
            )),
            Err(SurfaceError::Timeout) => {
                debug!("Surface acquire timed out, skipping frame");
                None
            }
            Err(SurfaceError::Lost) => {
                warn!("Surface lost after reconfigure, skipping frame");
                None
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory acquiring surface texture");
                return false;
            }
        };

        match renderer.on_frame(frame) {
            Ok(outcome) => {
                if outcome == FrameOutcome::Submitted {
                    self.frame_count += 1;
                }
                true
            }
            Err(e) => {
                error!("Frame failed: {e}");
                false
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.start_session(event_loop) {
            error!("{e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested after {} frames, shutting down", self.frame_count);
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.on_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.on_cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                if !self.redraw() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the explorer until the window closes.
#[instrument(skip(config))]
pub fn run_with_config(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
