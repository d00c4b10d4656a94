//! Application shell: window, event loop, and per-frame orchestration.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{camera::ViewCamera, render_engine::RenderEngine};
use crate::interaction::PointerInteraction;
use crate::room::{build_room_shell, RoomSession};
use crate::scene::Scene;
use crate::ui::{draw_panel, PanelAction, UiManager};

/// Top-level application. Owns the event loop until [`RoomStylerApp::run`]
/// consumes it.
pub struct RoomStylerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    session: RoomSession,
    interaction: PointerInteraction,
    cursor: (f32, f32),
}

impl RoomStylerApp {
    /// Creates the app with the starter room already furnished.
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;

        let mut scene = Scene::new(ViewCamera::room_view(1.5));
        build_room_shell(&mut scene);

        let mut session = RoomSession::new();
        session.add_selection_listener(Box::new(|item| match item {
            Some(item) => log::info!("selected {}", item.label),
            None => log::info!("selection cleared"),
        }));
        session.apply_default_layout(&mut scene);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                session,
                interaction: PointerInteraction::new(),
                cursor: (0.0, 0.0),
            },
        })
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    fn screen_size(&self) -> (f32, f32) {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                (size.width as f32, size.height as f32)
            })
            .unwrap_or((1.0, 1.0))
    }

    fn apply_panel_actions(&mut self, actions: Vec<PanelAction>) {
        for action in actions {
            match action {
                PanelAction::AddFurniture(kind) => {
                    self.session.add_furniture(&mut self.scene, kind);
                }
                PanelAction::RemoveSelected => {
                    self.session.delete_selected(&mut self.scene);
                }
                PanelAction::DefaultLayout => {
                    self.session.apply_default_layout(&mut self.scene);
                }
                PanelAction::SetGroupColor(group, color) => {
                    self.scene.materials.set_group_color(group, color);
                }
            }
        }
    }

    fn redraw(&mut self) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.clone() else {
            return;
        };

        self.scene.update();
        render_engine.update(self.scene.camera.uniform);
        self.scene
            .ensure_gpu_resources(render_engine.device(), render_engine.queue());
        self.scene.update_all_transforms(render_engine.queue());

        let mut actions = Vec::new();
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let window_clone = window.clone();
            let session = &self.session;
            let materials = &self.scene.materials;
            let actions_out = &mut actions;
            render_engine.render_frame_with_ui(
                &self.scene,
                |device, queue, encoder, color_attachment| {
                    ui_manager.draw(
                        device,
                        queue,
                        encoder,
                        &window_clone,
                        color_attachment,
                        |ui| {
                            actions_out.extend(draw_panel(ui, session, materials));
                        },
                    );
                },
            );
        }

        self.apply_panel_actions(actions);
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(
            WindowAttributes::default()
                .with_title("RoomStyler")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => {
                let window_handle = Arc::new(window);
                self.window = Some(window_handle.clone());

                let (width, height) = window_handle.inner_size().into();
                self.scene.camera.resize_projection(width, height);

                let window_clone = window_handle.clone();
                let renderer = pollster::block_on(async move {
                    RenderEngine::new(window_clone, width, height).await
                });

                let mut ui_manager = UiManager::new(
                    renderer.device(),
                    renderer.queue(),
                    renderer.surface_format(),
                    &window_handle,
                );
                ui_manager.update_display_size(width, height);

                self.ui_manager = Some(ui_manager);
                self.render_engine = Some(renderer);
            }
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first refusal on input events.
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                // A release over the panel must still end an active drag.
                if matches!(
                    event,
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        button: MouseButton::Left,
                        ..
                    }
                ) {
                    self.interaction.pointer_up();
                }
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key_code {
                winit::keyboard::KeyCode::Escape => event_loop.exit(),
                winit::keyboard::KeyCode::Delete | winit::keyboard::KeyCode::Backspace => {
                    self.session.delete_selected(&mut self.scene);
                }
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                if self.interaction.is_dragging() {
                    let size = self.screen_size();
                    self.interaction.pointer_move(
                        &mut self.session,
                        &mut self.scene,
                        self.cursor,
                        size,
                    );
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let size = self.screen_size();
                    self.interaction.pointer_down(
                        &mut self.session,
                        &mut self.scene,
                        self.cursor,
                        size,
                    );
                }
                ElementState::Released => self.interaction.pointer_up(),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
