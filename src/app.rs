//! # Application Core (`app.rs`)
//!
//! Main structure and associated implementation for running the engine on top of the `winit`
//! event loop. The `App` struct owns the window and every piece of per-window state, and is
//! the only place where raw window events are translated into calls on the engine's input,
//! layout and geometry types.
//!
//! ## Features and Components
//!
//! The `App` manages several components:
//!
//! - **Window Management**: Creates the window from [`Options`] when the event loop resumes.
//! - **Mouse State**: Feeds button events to a [`MouseState`] and polls it once per frame for
//!   double-clicks.
//! - **Keyboard State**: Tracks held keys in a [`KeyState`]; `Escape` closes the application.
//! - **Split Layout**: Routes cursor and button events that hit the spacer to a [`Splitter`]
//!   dividing the window into two panes.
//! - **Morph Animation**: Animates the weights of a [`MorphGeometry`] with more targets than
//!   the shader can receive, so the active set changes from frame to frame.
//! - **Frame Timing**: Paces redraws with a [`FrameRater`] through `ControlFlow::WaitUntil`.
//!
//! ## Ownership
//!
//! There is no global application instance. The caller builds an `App` from its options and
//! hands it to [`App::run`]:
//!
//! ```no_run
//! use engine_core::{App, Options};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     App::new(Options::default())?.run()?;
//!     Ok(())
//! }
//! ```

// Importing `Arc` (Atomic Reference Counted) from the standard library, used to share the
// `Window` handle with anything that needs to outlive a single event callback.
use std::sync::Arc;

// Importing `Instant` from the `web_time` crate, the same clock type `winit` uses for
// `ControlFlow::WaitUntil`. Every input event is stamped with it before it reaches the
// mouse state.
use web_time::Instant;

// Importing the `winit` types used for window creation and event handling:
// - `ApplicationHandler`: The trait through which the event loop drives the application.
// - `LogicalSize` / `PhysicalSize`: Requested window size and reported surface size.
// - `ElementState` / `WindowEvent`: Button/key state and the window events themselves.
// - `ActiveEventLoop` / `ControlFlow` / `EventLoop`: Loop creation, exit and frame pacing.
// - `KeyCode` / `PhysicalKey`: Keyboard keys by physical location.
// - `Fullscreen` / `Window` / `WindowId`: The window and its attributes.
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use nalgebra_glm::Vec2;

use crate::config::Options;
use crate::error::{AppError, MorphError};
use crate::frame_rater::FrameRater;
use crate::geometry::Geometry;
use crate::key_state::KeyState;
use crate::morph::MorphGeometry;
use crate::mouse_state::{MouseButton, MouseState};
use crate::splitter::{SplitType, Splitter};
use crate::vertex::{INDICES, VERTICES};

/// Number of morph targets in the demo geometry, more than fit into the shader at once.
const DEMO_MORPH_TARGETS: usize = 10;

/// Main application structure, driven by the `winit` event loop.
///
/// # Fields
///
/// - `options`: The validated options the application was created with.
/// - `window`: The application window, created on the first `resumed` call.
/// - `mouse_state` / `key_state`: Input state updated from window events.
/// - `frame_rater`: Frame pacing and timing statistics.
/// - `splitter`: Two-pane layout of the window surface.
/// - `morph`: The animated morph geometry.
/// - `cursor`: Last cursor position in physical pixels.
/// - `double_click_seen`: Whether the previous frame already reacted to the current
///   double-click, so each double-click is handled once.
/// - `morph_paused` / `animation_time`: Morph animation state.
pub struct App {
    options: Options,
    window: Option<Arc<Window>>,
    mouse_state: MouseState,
    key_state: KeyState,
    frame_rater: FrameRater,
    splitter: Splitter,
    morph: MorphGeometry,
    cursor: Vec2,
    double_click_seen: bool,
    morph_paused: bool,
    animation_time: f32,
}

impl App {
    /// Validates `options` and builds the application state. No window exists until the event
    /// loop starts.
    pub fn new(options: Options) -> Result<Self, AppError> {
        options.validate()?;

        let mouse_state = MouseState::with_double_click_duration(options.double_click_duration()?);
        let frame_rater = FrameRater::new(options.target_fps);
        let splitter = Splitter::new_horizontal(options.width as f32, options.height as f32);
        let morph = demo_morph_geometry()?;

        Ok(Self {
            options,
            window: None,
            mouse_state,
            key_state: KeyState::new(),
            frame_rater,
            splitter,
            morph,
            cursor: Vec2::zeros(),
            double_click_seen: false,
            morph_paused: false,
            animation_time: 0.0,
        })
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;

        log::info!(
            "Event loop finished after {} frames",
            self.frame_rater.frame_count()
        );
        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mouse_state(&self) -> &MouseState {
        &self.mouse_state
    }

    pub fn key_state(&self) -> &KeyState {
        &self.key_state
    }

    pub fn frame_rater(&self) -> &FrameRater {
        &self.frame_rater
    }

    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    pub fn morph(&self) -> &MorphGeometry {
        &self.morph
    }

    fn handle_mouse_input(&mut self, state: ElementState, button: winit::event::MouseButton) {
        let Some(button) = MouseButton::from_winit(button) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if self.splitter.layout().spacer.contains(&self.cursor) {
                    self.splitter.on_mouse_down(button, &self.cursor);
                }
            }
            ElementState::Released => {
                if self.splitter.is_dragging() {
                    self.splitter.on_mouse_up(button);
                    log::debug!("Split position: {}", self.splitter.split());
                }
            }
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Vec2::new(position.x as f32, position.y as f32);

        let over_spacer = self.splitter.layout().spacer.contains(&self.cursor);
        if over_spacer != self.splitter.is_mouse_over() {
            if over_spacer {
                self.splitter.on_cursor_enter();
            } else {
                self.splitter.on_cursor_leave();
            }
        }

        if self.splitter.on_cursor_move(&self.cursor) {
            log::trace!("Split moved to {}", self.splitter.split());
        }
    }

    fn handle_double_click(&mut self) {
        if self.splitter.layout().spacer.contains(&self.cursor) {
            if self.splitter.split_type() == SplitType::Relative {
                self.splitter.set_split(0.5);
                log::info!("Split reset to center");
            }
            return;
        }

        self.morph_paused = !self.morph_paused;
        log::info!(
            "Morph animation {}",
            if self.morph_paused { "paused" } else { "resumed" }
        );

        match self.morph.compute_morphed(self.morph.weights()) {
            Ok(snapshot) => {
                let vertices = snapshot.to_vertices([1.0, 1.0, 1.0, 1.0]);
                let bytes: &[u8] = bytemuck::cast_slice(&vertices);
                log::debug!("Morphed snapshot: {} vertices, {} bytes", vertices.len(), bytes.len());
            }
            Err(err) => log::warn!("Failed computing morphed snapshot: {err}"),
        }
    }

    fn redraw(&mut self, now: Instant) {
        self.frame_rater.start_frame(now);

        let double_clicked = self.mouse_state.is_double_clicked(MouseButton::Left);
        if double_clicked && !self.double_click_seen {
            self.handle_double_click();
        }
        self.double_click_seen = double_clicked;

        if !self.morph_paused {
            self.animation_time += self.frame_rater.frame_delta_seconds();
            let weights = animated_weights(self.animation_time, self.morph.targets().len());
            if let Err(err) = self.morph.set_weights(&weights) {
                log::warn!("Failed updating morph weights: {err}");
            }
        }

        let setup = self.morph.render_setup();
        if self.frame_rater.frame_count() % u64::from(self.options.target_fps) == 0 {
            log::debug!(
                "Frame {}: active morph targets {:?}, influences {:?}",
                self.frame_rater.frame_count(),
                setup.indices,
                setup.uniform.active_influences()
            );
        }
    }
}

/// Implements the `ApplicationHandler` trait for `App`: window creation on resume, event
/// dispatch into the engine state, and frame pacing between events.
impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height));
        if self.options.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let PhysicalSize { width, height } = window.inner_size();
                log::info!("Window created: ({width} x {height})");
                self.splitter.resize(width as f32, height as f32);

                let window = Arc::new(window);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let now = Instant::now();

        self.mouse_state.handle_window_event(&event, now);
        self.key_state.handle_window_event(&event);

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed. Exiting...");
                event_loop.exit();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_input(state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.splitter.on_cursor_leave();
            }
            WindowEvent::Focused(false) => {
                log::debug!("Focus lost, clearing input state");
                self.mouse_state.clear();
                self.key_state.clear();
                self.double_click_seen = false;
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing layout to: ({width}, {height})");
                self.splitter.resize(width as f32, height as f32);
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(now);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match self.frame_rater.next_frame_deadline() {
            Some(deadline) if Instant::now() < deadline => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
        }
    }
}

/// Builds the demo geometry: the colored triangle plus [`DEMO_MORPH_TARGETS`] targets that
/// each push one corner outwards by a different amount.
fn demo_morph_geometry() -> Result<MorphGeometry, MorphError> {
    let base = Geometry::from_vertices(&VERTICES);
    let corners = base.positions().to_vec();

    let deltas = (0..DEMO_MORPH_TARGETS).map(|i| {
        let corner = i % corners.len();
        let scale = 0.1 + 0.05 * i as f32;
        let positions = corners
            .iter()
            .enumerate()
            .map(|(j, position)| {
                if j == corner {
                    position * scale
                } else {
                    nalgebra_glm::Vec3::zeros()
                }
            })
            .collect();
        Geometry::new(positions)
    });

    let mut morph = MorphGeometry::new(base);
    morph.add_morph_target_deltas(deltas)?;
    morph.set_indices(INDICES.to_vec());
    Ok(morph)
}

/// Phase-shifted sine weights in `0..=1`, one per target.
fn animated_weights(time: f32, count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| 0.5 + 0.5 * (time * 1.3 + i as f32 * 0.7).sin())
        .collect()
}
