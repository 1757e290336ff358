pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod input;
pub mod lesson;
mod renderer;
pub mod texture;
pub mod tile;
pub mod types;

pub use canvas::{Canvas, DrawCommand};
pub use config::Config;
pub use error::{Error, Result};
pub use lesson::{Flow, Lesson};
pub use types::{Dimension, Rect};

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, warn};

use input::Input;
use texture::TextureSources;

/// Opens the window and runs `lesson` until it exits or the window closes.
///
/// Textures are registered before the window opens, so a missing font or
/// similar fails before anything is shown.
pub fn run(config: Config, mut lesson: Box<dyn Lesson>) -> Result<()> {
    let mut sources = TextureSources::default();
    lesson.load(&config, &mut sources)?;
    info!(
        "starting {:?} with {} textures from {}",
        lesson.title(),
        sources.len(),
        config.res_dir.display()
    );

    let event_loop = winit::event_loop::EventLoop::new()?;
    let mut app = Handler {
        config,
        lesson,
        sources,
        state: None,
        started: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct State {
    // winit-related
    window: Arc<winit::window::Window>,

    // wgpu-related
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,

    texture_renderer: renderer::TextureRenderer,
    texture_manager: texture::TextureManager,
}

impl State {
    async fn new(window: Arc<winit::window::Window>, sources: &TextureSources) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;
        debug!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        // surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &surface_configuration);

        // textures
        let mut texture_manager = texture::TextureManager::new(&device);
        texture_manager.load(&device, &queue, sources)?;

        // renderer
        let texture_renderer = renderer::TextureRenderer::new(
            &device,
            surface_format,
            &texture_manager.bind_group_layout,
            Dimension::from(size),
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            surface_configuration,
            texture_renderer,
            texture_manager,
        })
    }

    fn render(&mut self, lesson: &dyn Lesson) -> std::result::Result<(), wgpu::SurfaceError> {
        let mut canvas = Canvas::new(self.texture_manager.sizes());
        lesson.draw(&mut canvas);
        let commands = canvas.into_commands();
        self.texture_renderer
            .prepare(&self.device, &self.queue, &self.texture_manager, &commands);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            self.texture_renderer
                .draw(&mut render_pass, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_configuration.width = width;
        self.surface_configuration.height = height;
        self.surface
            .configure(&self.device, &self.surface_configuration);
        self.texture_renderer
            .resize(&self.queue, Dimension::new(width as i32, height as i32));
    }
}

struct Handler {
    config: Config,
    lesson: Box<dyn Lesson>,
    sources: TextureSources,
    state: Option<State>,
    started: Option<Instant>,
    error: Option<Error>,
}

impl Handler {
    fn open(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) -> Result<State> {
        let (x, y) = self.config.window_position;
        let window = event_loop.create_window(
            winit::window::Window::default_attributes()
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.config.screen.width as u32,
                    self.config.screen.height as u32,
                ))
                .with_position(winit::dpi::PhysicalPosition::new(x, y))
                .with_resizable(false)
                .with_title(self.lesson.title()),
        )?;
        let state = pollster::block_on(State::new(Arc::new(window), &self.sources))?;

        let screen = Dimension::from(state.window.inner_size());
        self.lesson.setup(screen, state.texture_manager.sizes());
        Ok(state)
    }

    fn fail(&mut self, event_loop: &winit::event_loop::ActiveEventLoop, err: Error) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl winit::application::ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
                self.started = Some(Instant::now());
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        if self.state.is_none() {
            return;
        }

        if let Some(input) = Input::from_window_event(&event) {
            debug!("input {input:?}");
            if self.lesson.handle(input) == Flow::Exit {
                info!("{:?} finished", self.lesson.title());
                event_loop.exit();
                return;
            }
        }

        match event {
            winit::event::WindowEvent::RedrawRequested => {
                let timed_out = match (self.lesson.timeout(), self.started) {
                    (Some(timeout), Some(started)) => started.elapsed() >= timeout,
                    _ => false,
                };
                if timed_out {
                    info!("{:?} timed out", self.lesson.title());
                    event_loop.exit();
                    return;
                }

                let Some(state) = &mut self.state else {
                    return;
                };
                match state.render(self.lesson.as_ref()) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                        let size = state.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, wgpu::SurfaceError::OutOfMemory.into());
                        return;
                    }
                    Err(err) => warn!("skipping frame: {err}"),
                }
                state.window.request_redraw();
            }
            winit::event::WindowEvent::Resized(winit::dpi::PhysicalSize { width, height }) => {
                if let Some(state) = &mut self.state {
                    debug!("resized to {width}x{height}");
                    state.resize(width, height);
                    self.lesson.setup(
                        Dimension::new(width as i32, height as i32),
                        state.texture_manager.sizes(),
                    );
                }
            }
            _ => (),
        }
    }
}
