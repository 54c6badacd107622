// src/app.rs

use std::sync::Arc;

use glam::Vec3;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{Key, NamedKey},
    window::Window,
};

use figure_demos::config::{AppConfig, DemoMode};
use figure_demos::demo_scene;
use figure_demos::engine_lib::camera::Camera;
use figure_demos::engine_lib::controller::PoseController;
use figure_demos::engine_lib::figure_logic::{apply_pose_command, PoseCommand};
use figure_demos::engine_lib::figure_types::Figure;
use figure_demos::engine_lib::shapes::ShapesScene;
use figure_demos::engine_lib::trackball::TrackballRotator;
use figure_demos::error::AppError;
use figure_demos::rendering_lib::figure_renderer::{FigureRenderer, FrameView};
use figure_demos::rendering_lib::geometry::Point2;
use figure_demos::rendering_lib::renderer::Renderer;
use figure_demos::rendering_lib::shader::{FIGURE_SHADER_SOURCE, WGSL_SHADER_SOURCE};

use crate::ui::{build_ui, UiActions, UiModel};

const FIGURE_CLEAR: wgpu::Color = wgpu::Color { r: 0.05, g: 0.05, b: 0.1, a: 1.0 };
const SHAPES_CLEAR: wgpu::Color = wgpu::Color { r: 0.92, g: 0.92, b: 0.9, a: 1.0 };
const MIN_VIEW_DISTANCE: f32 = 5.0;
const MAX_VIEW_DISTANCE: f32 = 60.0;

pub struct DemoApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    shapes_renderer: Renderer,
    figure_renderer: FigureRenderer,
    mode: DemoMode,
    figure: Figure,
    shapes: ShapesScene,
    camera: Camera,
    trackball: TrackballRotator,
    pose_controller: PoseController,
    cursor: Option<PhysicalPosition<f64>>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl DemoApp {
    pub async fn new(window: Arc<Window>, app_config: &AppConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
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
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shapes_renderer = Renderer::new(
            &device, config.format, WGSL_SHADER_SOURCE,
            config.width as f32, config.height as f32,
        );
        let figure_renderer = FigureRenderer::new(
            &device, config.format, FIGURE_SHADER_SOURCE,
            config.width, config.height,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let mut trackball = TrackballRotator::new(
            app_config.view_distance,
            Vec3::new(0.3, 0.2, 1.0),
            Vec3::Y,
        );
        trackball.set_viewport(config.width as f32, config.height as f32);

        Ok(Self {
            surface, device, queue, config, size,
            shapes_renderer, figure_renderer,
            mode: app_config.demo,
            figure: demo_scene::create_figure(),
            shapes: demo_scene::create_shapes_scene(app_config.pick_radius),
            camera: Camera::new(45.0, 0.5, 200.0),
            trackball,
            pose_controller: PoseController::new(app_config.angle_step_deg),
            cursor: None,
            egui_ctx, egui_state, egui_renderer,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.figure_renderer.resize(&self.device, new_size.width, new_size.height);
            self.trackball.set_viewport(new_size.width as f32, new_size.height as f32);
        }
    }

    fn set_mode(&mut self, mode: DemoMode) {
        if mode != self.mode {
            log::info!("Switching to {} demo", mode.label());
            // A drag in one demo must not leak into the other.
            self.trackball.pointer_up();
            self.shapes.pointer_up();
            self.mode = mode;
        }
    }

    fn set_view_distance(&mut self, distance: f32) {
        self.trackball
            .set_view_distance(distance.clamp(MIN_VIEW_DISTANCE, MAX_VIEW_DISTANCE));
    }

    fn apply_ui_actions(&mut self, actions: UiActions) -> bool {
        let mut changed = false;
        if let Some(mode) = actions.mode {
            self.set_mode(mode);
            changed = true;
        }
        if let Some(distance) = actions.view_distance {
            self.set_view_distance(distance);
            changed = true;
        }
        if actions.reset_pose {
            changed |= apply_pose_command(&mut self.figure, PoseCommand::Reset, self.pose_controller.angle_step_deg);
        }
        changed
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let width = self.config.width as f32;
        let height = self.config.height as f32;
        match self.mode {
            DemoMode::Figure => {
                let frame_view = FrameView {
                    view: self.trackball.view_matrix(),
                    projection: self.camera.projection_matrix(width, height),
                    light_position: self.camera.light_position,
                };
                self.figure_renderer.render_figure(
                    &self.queue, &mut encoder, &view,
                    &self.figure, &frame_view, FIGURE_CLEAR,
                );
            }
            DemoMode::Shapes => {
                self.shapes_renderer.render_shapes(
                    &self.queue, &mut encoder, &view,
                    &self.shapes, width, height, SHAPES_CLEAR,
                );
            }
        }

        let ui_model = UiModel {
            mode: self.mode,
            figure: &self.figure,
            view_distance: self.trackball.view_distance(),
            intersecting_pairs: self.shapes.intersecting_pairs(),
        };
        let mut actions = UiActions::default();
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| { actions = build_ui(ctx, &ui_model); });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();

        if self.apply_ui_actions(actions) {
            window.request_redraw();
        }
        Ok(())
    }

    fn pointer_position(&self) -> Option<(f32, f32)> {
        self.cursor.map(|p| (p.x as f32, p.y as f32))
    }

    fn handle_pointer_button(&mut self, state: ElementState) -> bool {
        let Some((x, y)) = self.pointer_position() else {
            return false;
        };
        match (self.mode, state) {
            (DemoMode::Figure, ElementState::Pressed) => self.trackball.pointer_down(x, y),
            (DemoMode::Shapes, ElementState::Pressed) => self.shapes.pointer_down(Point2::new(x, y)),
            (DemoMode::Figure, ElementState::Released) => {
                self.trackball.pointer_up();
                false
            }
            (DemoMode::Shapes, ElementState::Released) => {
                self.shapes.pointer_up();
                false
            }
        }
    }

    fn handle_pointer_move(&mut self, position: PhysicalPosition<f64>) -> bool {
        self.cursor = Some(position);
        let (x, y) = (position.x as f32, position.y as f32);
        match self.mode {
            DemoMode::Figure => self.trackball.pointer_move(x, y),
            DemoMode::Shapes => self.shapes.pointer_move(Point2::new(x, y)),
        }
    }

    /// Returns true if the event was consumed. Requests a redraw whenever
    /// visible state changed.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.repaint {
            window.request_redraw();
        }
        if response.consumed { return true; }

        let changed = match event {
            WindowEvent::KeyboardInput { event: key_event, .. }
                if key_event.state == ElementState::Pressed
                    && key_event.logical_key == Key::Named(NamedKey::Tab) =>
            {
                self.set_mode(self.mode.toggled());
                true
            }
            WindowEvent::KeyboardInput { .. } if self.mode == DemoMode::Figure => {
                self.pose_controller.handle_window_event(event, &mut self.figure)
            }
            WindowEvent::CursorMoved { position, .. } => self.handle_pointer_move(*position),
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.handle_pointer_button(*state)
            }
            WindowEvent::MouseWheel { delta, .. } if self.mode == DemoMode::Figure => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.set_view_distance(self.trackball.view_distance() - lines);
                true
            }
            _ => return false,
        };
        if changed {
            window.request_redraw();
        }
        changed
    }
}
