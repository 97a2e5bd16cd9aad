//! Core application state and lifecycle.

use dragboard_core::canvas::{Canvas, CanvasDocument, DocumentError};
use dragboard_core::monitor::SceneMonitor;
use dragboard_render::{GridStyle, RenderContext, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Rect, Size};
use peniko::Color;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::event_handler::{map_button, wheel_lines, EventHandler};
use crate::form::ParamsForm;
use crate::shortcuts::{key_name, ShortcutAction, ShortcutRegistry};
use crate::ui::{render_canvas_ui, render_params_ui, UiAction, UiState};

/// Scene position of the status label's top-left corner.
const STATUS_ANCHOR: Point = Point::new(10.0, -90.0);
/// Zoom factor of the view panel's zoom buttons.
const BUTTON_ZOOM_STEP: f64 = 1.25;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("Failed to load scene: {0}")]
    Scene(#[from] DocumentError),
}

/// Which demo the window runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Demo {
    /// Drag-select canvas, optionally seeded from a scene file.
    Canvas { scene: Option<PathBuf> },
    /// Parameter form backed by a JSON file.
    Params { file: PathBuf },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub grid_style: GridStyle,
    /// Scene rectangle framed at startup and on view reset.
    pub view_rect: Rect,
    pub monitor_interval: Duration,
    pub demo: Demo,
}

impl AppConfig {
    /// Defaults for a demo.
    pub fn for_demo(demo: Demo) -> Self {
        let base = Self {
            title: "Dragboard".to_string(),
            width: 800,
            height: 900,
            background_color: Color::from_rgba8(0, 0, 0, 255),
            grid_style: GridStyle::Lines,
            view_rect: Rect::new(-100.0, -100.0, 100.0, 100.0),
            monitor_interval: SceneMonitor::default().interval(),
            demo: Demo::Canvas { scene: None },
        };
        match demo {
            Demo::Canvas { .. } => Self { demo, ..base },
            Demo::Params { .. } => Self {
                title: "System Parameters Demo".to_string(),
                width: 480,
                height: 560,
                background_color: Color::from_rgba8(240, 240, 244, 255),
                demo,
                ..base
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_demo(Demo::Canvas { scene: None })
    }
}

/// Canvas demo state.
struct CanvasDemo {
    canvas: Canvas,
    events: EventHandler,
    monitor: SceneMonitor,
    monitor_line: String,
    grid_style: GridStyle,
}

impl CanvasDemo {
    fn new(document: CanvasDocument, config: &AppConfig) -> Self {
        Self {
            canvas: Canvas::with_document(document),
            events: EventHandler::new(),
            monitor: SceneMonitor::new(config.monitor_interval),
            monitor_line: String::new(),
            grid_style: config.grid_style,
        }
    }

    fn apply(&mut self, action: UiAction, view_rect: Rect) {
        let center = Point::new(
            self.canvas.viewport_size.width / 2.0,
            self.canvas.viewport_size.height / 2.0,
        );
        match action {
            UiAction::ZoomIn => self.canvas.camera.zoom_at(center, BUTTON_ZOOM_STEP),
            UiAction::ZoomOut => self.canvas.camera.zoom_at(center, 1.0 / BUTTON_ZOOM_STEP),
            UiAction::ResetView => self.canvas.look_at(view_rect),
            UiAction::CycleGrid => {
                self.grid_style = self.grid_style.next();
                log::info!("Grid: {}", self.grid_style.name());
            }
            UiAction::Print => {}
        }
    }

    fn ui_state(&self, pixels_per_point: f32) -> UiState {
        let anchor = self.canvas.camera.world_to_screen(STATUS_ANCHOR);
        UiState {
            status: self.events.status.clone(),
            status_anchor: egui::Pos2::new(
                anchor.x as f32 / pixels_per_point,
                anchor.y as f32 / pixels_per_point,
            ),
            monitor_line: self.monitor_line.clone(),
            zoom: self.canvas.camera.zoom,
            grid_style: self.grid_style,
        }
    }
}

/// The running demo.
enum DemoState {
    Canvas(CanvasDemo),
    Params(ParamsForm),
}

impl DemoState {
    fn is_canvas(&self) -> bool {
        matches!(self, DemoState::Canvas(_))
    }

    fn apply(&mut self, action: UiAction, config: &AppConfig) {
        match self {
            DemoState::Canvas(demo) => demo.apply(action, config.view_rect),
            DemoState::Params(form) => {
                if action == UiAction::Print {
                    form.print();
                }
            }
        }
    }
}

/// Window and GPU state, created once the event loop is running.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Copies the Rgba8Unorm render target onto the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    demo: DemoState,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Fatal error raised inside the event loop.
    error: Option<AppError>,
}

impl App {
    /// Create the application, loading the demo's input files.
    pub fn with_config(config: AppConfig) -> Result<Self, AppError> {
        let demo = match &config.demo {
            Demo::Canvas { scene: Some(path) } => {
                DemoState::Canvas(CanvasDemo::new(CanvasDocument::load(path)?, &config))
            }
            Demo::Canvas { scene: None } => {
                DemoState::Canvas(CanvasDemo::new(CanvasDocument::demo(), &config))
            }
            Demo::Params { file } => DemoState::Params(ParamsForm::load(file)),
        };

        Ok(Self {
            config,
            demo,
            state: None,
            render_cx: None,
            error: None,
        })
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config)?;
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create the window, surface and renderers.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface: RenderSurface<'static> = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        if let DemoState::Canvas(demo) = &mut self.demo {
            demo.canvas
                .set_viewport_size(surface.config.width as f64, surface.config.height as f64);
            demo.canvas.look_at(self.config.view_rect);
        }

        log::info!(
            "Dragboard initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );
        log::info!(
            "Keyboard shortcuts: {}",
            ShortcutRegistry::summary(self.demo.is_canvas())
        );

        window.request_redraw();
        self.state = Some(AppState {
            window,
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn run_shortcut(&mut self, event_loop: &ActiveEventLoop, action: ShortcutAction) {
        let Some(state) = &self.state else {
            return;
        };
        match action {
            ShortcutAction::Close => event_loop.exit(),
            ShortcutAction::ToggleFullscreen => {
                let fullscreen = match state.window.fullscreen() {
                    Some(_) => None,
                    None => Some(Fullscreen::Borderless(None)),
                };
                state.window.set_fullscreen(fullscreen);
            }
            ShortcutAction::ResetView => {
                self.demo.apply(UiAction::ResetView, &self.config);
                state.window.request_redraw();
            }
            ShortcutAction::CycleGrid => {
                self.demo.apply(UiAction::CycleGrid, &self.config);
                state.window.request_redraw();
            }
        }
    }
}

impl AppState {
    /// Build the egui overlay and the vello scene, then present a frame.
    fn redraw(
        &mut self,
        demo: &mut DemoState,
        render_cx: &vello::util::RenderContext,
        config: &AppConfig,
    ) -> Result<(), RendererError> {
        // Run egui and collect any action
        let pixels_per_point = self.egui_ctx.pixels_per_point();
        let canvas_ui = match demo {
            DemoState::Canvas(d) => Some(d.ui_state(pixels_per_point)),
            DemoState::Params(_) => None,
        };
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            action = match (&canvas_ui, &mut *demo) {
                (Some(ui_state), _) => render_canvas_ui(ctx, ui_state),
                (None, DemoState::Params(form)) => render_params_ui(ctx, form),
                (None, DemoState::Canvas(_)) => None,
            };
        });
        if let Some(action) = action {
            log::debug!("UI action: {action:?}");
            demo.apply(action, config);
            self.window.request_redraw();
        }

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let scene = match demo {
            DemoState::Canvas(d) => {
                let ctx = RenderContext::new(&d.canvas, Size::new(width as f64, height as f64))
                    .with_grid(d.grid_style)
                    .with_selected(d.events.selected());
                self.shape_renderer.build_scene(&ctx);
                self.shape_renderer.take_scene()
            }
            DemoState::Params(_) => Scene::new(),
        };

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let params = RenderParams {
            base_color: config.background_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target;
        // the surface itself may be Bgra8Unorm.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter.copy(
                device,
                &mut blit_encoder,
                &render_texture_view,
                &surface_view,
            );
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Keep the vello frame underneath
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());
        if repaint_now {
            self.window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui see the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }
        let egui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();
        let egui_wants_keyboard = state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let DemoState::Canvas(demo) = &mut self.demo {
                    demo.canvas
                        .set_viewport_size(size.width as f64, size.height as f64);
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                if let Err(e) = state.redraw(&mut self.demo, render_cx, &self.config) {
                    // Dropped frames are not fatal; the next redraw retries
                    log::warn!("Frame skipped: {e}");
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let DemoState::Canvas(demo) = &mut self.demo {
                    let point = Point::new(position.x, position.y);
                    if demo.events.pointer_moved(&mut demo.canvas, point) {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let (DemoState::Canvas(demo), Some(button)) = (&mut self.demo, map_button(button))
                else {
                    return;
                };
                let changed = match button_state {
                    ElementState::Pressed if egui_wants_pointer => false,
                    ElementState::Pressed => demo.events.button_pressed(&mut demo.canvas, button),
                    // Releases always reach the canvas so a drag never gets stuck
                    ElementState::Released => demo.events.button_released(&mut demo.canvas, button),
                };
                if changed {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if egui_wants_pointer {
                    return;
                }
                if let DemoState::Canvas(demo) = &mut self.demo {
                    if demo.events.scrolled(&mut demo.canvas, wheel_lines(delta)) {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat || egui_wants_keyboard {
                    return;
                }
                let action = key_name(&event.logical_key)
                    .and_then(|key| ShortcutRegistry::lookup(key, self.demo.is_canvas()));
                if let Some(action) = action {
                    log::debug!("Shortcut: {action:?}");
                    self.run_shortcut(event_loop, action);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        match &mut self.demo {
            DemoState::Canvas(demo) => {
                if let Some(line) = demo.monitor.poll(&demo.canvas.document, Instant::now()) {
                    if line != demo.monitor_line {
                        demo.monitor_line = line;
                        state.window.request_redraw();
                    }
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(demo.monitor.next_deadline()));
            }
            DemoState::Params(_) => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_defaults() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (800, 900));
        assert_eq!(config.view_rect, Rect::new(-100.0, -100.0, 100.0, 100.0));
        assert_eq!(config.grid_style, GridStyle::Lines);
        assert_eq!(config.monitor_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_params_defaults() {
        let config = AppConfig::for_demo(Demo::Params {
            file: PathBuf::from("sys_params.json"),
        });
        assert_eq!(config.title, "System Parameters Demo");
        assert!(matches!(config.demo, Demo::Params { .. }));
    }

    #[test]
    fn test_missing_scene_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::for_demo(Demo::Canvas {
            scene: Some(dir.path().join("missing.json")),
        });
        let err = App::with_config(config).err().unwrap();
        assert!(matches!(err, AppError::Scene(DocumentError::Io { .. })));
    }

    #[test]
    fn test_missing_params_file_still_starts() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::for_demo(Demo::Params {
            file: dir.path().join("missing.json"),
        });
        let app = App::with_config(config).unwrap();
        let DemoState::Params(form) = &app.demo else {
            panic!("expected params demo");
        };
        assert!(form.output.starts_with("Could not load"));
    }

    #[test]
    fn test_canvas_actions() {
        let config = AppConfig::default();
        let mut demo = CanvasDemo::new(CanvasDocument::demo(), &config);
        demo.canvas.set_viewport_size(800.0, 900.0);
        demo.canvas.look_at(config.view_rect);
        let framed = demo.canvas.camera.zoom;

        demo.apply(UiAction::ZoomIn, config.view_rect);
        assert!((demo.canvas.camera.zoom - framed * BUTTON_ZOOM_STEP).abs() < 1e-9);

        demo.apply(UiAction::ResetView, config.view_rect);
        assert!((demo.canvas.camera.zoom - framed).abs() < 1e-9);

        demo.apply(UiAction::CycleGrid, config.view_rect);
        assert_eq!(demo.grid_style, GridStyle::Dots);
    }

    #[test]
    fn test_status_label_follows_camera() {
        let config = AppConfig::default();
        let mut demo = CanvasDemo::new(CanvasDocument::demo(), &config);
        demo.canvas.set_viewport_size(800.0, 900.0);
        demo.canvas.look_at(config.view_rect);

        // 4 px per unit, origin at (400, 450), y up
        let ui = demo.ui_state(2.0);
        assert_eq!(ui.status_anchor, egui::Pos2::new(220.0, 405.0));
        assert_eq!(ui.status, crate::event_handler::INITIAL_STATUS);
    }
}
