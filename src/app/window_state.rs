//! One top-level editor window: winit window, wgpu surface, egui, and the
//! [`MarkerWindow`] that holds its behavior.

use crate::app::ui::{self, UiCommand};
use crate::dialogs::FileChooser;
use crate::editor::Editor;
use crate::shell::WinitDisplay;
use crate::window::{MarkerWindow, WindowRequest};
use anyhow::{Context, Result};
use marker_config::Config;
use std::rc::Rc;
use std::sync::Arc;
use wgpu::SurfaceError;
use winit::event::{Modifiers, WindowEvent};
use winit::window::{Window, WindowId};

struct Gpu {
    /// Kept alive for the surface's lifetime
    #[allow(dead_code)]
    instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    surface_config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        // Platform-specific backend selection for better VM compatibility
        #[cfg(target_os = "windows")]
        let backends = wgpu::Backends::DX12;
        #[cfg(target_os = "macos")]
        let backends = wgpu::Backends::all();
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let backends = wgpu::Backends::VULKAN | wgpu::Backends::GL;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            instance,
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            surface_config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }
}

pub struct WindowState {
    window: Arc<Window>,
    window_id: WindowId,
    gpu: Gpu,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    modifiers: Modifiers,
    /// Title last pushed to the native window
    native_title: String,
    pub marker: MarkerWindow,
}

impl WindowState {
    pub async fn new(
        window: Window,
        editor: Editor,
        config: &Config,
        chooser: Rc<dyn FileChooser>,
    ) -> Result<Self> {
        let window = Arc::new(window);
        let window_id = window.id();
        let gpu = Gpu::new(Arc::clone(&window)).await?;

        let scale_factor = window.scale_factor() as f32;
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        let display = Box::new(WinitDisplay::new(Arc::clone(&window)));
        let marker = MarkerWindow::new(editor, config, display, chooser)?;

        let mut state = Self {
            window,
            window_id,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            modifiers: Modifiers::default(),
            native_title: String::new(),
            marker,
        };
        state.sync_native_title();
        state.window.request_redraw();
        Ok(state)
    }

    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn take_requests(&mut self) -> Vec<WindowRequest> {
        self.marker.take_requests()
    }

    /// Handle a window event. Returns true when the window asked to close.
    pub fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        // Shortcuts see the key first; the event still reaches egui
        if let WindowEvent::KeyboardInput { event: key, .. } = &event {
            self.marker.handle_key_event(key, &self.modifiers);
        }

        let response = self.egui_state.on_window_event(&self.window, &event);

        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers,
            WindowEvent::Resized(size) => {
                self.gpu.resize(size.width, size.height);
                self.window.request_redraw();
            }
            WindowEvent::RedrawRequested => self.render(),
            WindowEvent::KeyboardInput { .. } => self.window.request_redraw(),
            _ => {}
        }

        if response.repaint {
            self.window.request_redraw();
        }
        false
    }

    fn sync_native_title(&mut self) {
        let title = self
            .marker
            .shell()
            .with_header_bar(|bar| bar.title().to_string())
            .unwrap_or_default();
        if title != self.native_title {
            self.window.set_title(&format!("{} - Marker", title));
            self.native_title = title;
        }
    }

    fn render(&mut self) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.gpu
                    .surface
                    .configure(&self.gpu.device, &self.gpu.surface_config);
                self.window.request_redraw();
                return;
            }
            Err(SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let mut commands = Vec::new();
        let marker = &mut self.marker;
        let egui_output = self.egui_ctx.run(raw_input, |ctx| {
            commands = ui::draw(ctx, marker);
        });
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(egui_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Marker Window Encoder"),
            });
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.gpu.surface_config.width,
                self.gpu.surface_config.height,
            ],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Marker Window Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.11,
                            g: 0.11,
                            b: 0.12,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // egui_renderer.render() needs a 'static pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        // Buttons are dispatched after the frame so no widget is borrowed
        for command in commands {
            match command {
                UiCommand::Activate(id) => {
                    self.marker.activate(&id);
                }
                UiCommand::DragWindow => {
                    if let Err(e) = self.window.drag_window() {
                        log::debug!("Window drag failed: {}", e);
                    }
                }
                UiCommand::Minimize => self.window.set_minimized(true),
            }
            self.window.request_redraw();
        }
        self.sync_native_title();
    }
}
