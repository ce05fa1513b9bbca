//! # Engine Core Library
//!
//! This library provides the input, layout and geometry core of a small 3D engine running on
//! the `winit` event loop. It is organized into modules that each own one concern and are tied
//! together by the [`App`] run loop.
//!
//! ## Modules
//!
//! - [`app`]: Application setup, event loop integration and per-frame polling.
//! - [`mouse_state`]: Mouse button tracking with press-triggered double-click detection.
//! - [`key_state`]: The set of held keyboard keys.
//! - [`frame_rater`]: Frame pacing towards a target frame rate and frame statistics.
//! - [`splitter`]: Two-pane split layout arithmetic with spacer dragging.
//! - [`active_set`]: Bounded top-K selection of weighted items.
//! - [`geometry`]: CPU-side mesh data and shader attribute naming.
//! - [`morph`]: Morph target geometry that forwards at most
//!   [`MAX_ACTIVE_MORPH_TARGETS`] targets per frame.
//! - [`morph_uniform`]: The plain-old-data block of active morph influences.
//! - [`vertex`]: The interleaved vertex layout.
//! - [`config`]: Application options loaded from TOML.
//! - [`error`]: Error types for configuration, morph data and the event loop.
//!
//! ## Usage
//!
//! 1. **Load Options**: Read [`Options`] from a TOML file or start from the defaults.
//! 2. **Create the App**: [`App::new`] validates the options and builds all engine state.
//! 3. **Run**: [`App::run`] opens the window and drives everything from window events.
//!
//! The input and geometry types also work without a window:
//!
//! ```rust
//! use engine_core::{select_active_set, MouseButton, MouseState};
//! use web_time::{Duration, Instant};
//!
//! let mut mouse = MouseState::new();
//! let t0 = Instant::now();
//! mouse.on_press(MouseButton::Left, t0);
//! mouse.on_release(MouseButton::Left, t0 + Duration::from_millis(50));
//! mouse.on_press(MouseButton::Left, t0 + Duration::from_millis(400));
//! assert!(!mouse.is_double_clicked(MouseButton::Left));
//! assert!(mouse.is_pressed(MouseButton::Left));
//!
//! let names = ["smile", "blink", "frown"];
//! let active = select_active_set(&names, &[0.2, 0.9, 0.5], 2);
//! assert_eq!(active.items, vec![&"blink", &"frown"]);
//! ```
//!
//! ## Dependencies
//!
//! This library relies on the following external crates:
//!
//! - `winit`: For window creation and event handling.
//! - `web-time`: For the `Instant` and `Duration` types shared with `winit`.
//! - `log` and `env_logger`: For logging.
//! - `nalgebra-glm`: For vector math.
//! - `bytemuck`: For viewing vertices and uniform blocks as bytes.
//! - `serde` and `toml`: For configuration files.
//! - `thiserror`: For error types.

pub mod active_set;
pub mod app;
pub mod config;
pub mod error;
pub mod frame_rater;
pub mod geometry;
pub mod key_state;
pub mod morph;
pub mod morph_uniform;
pub mod mouse_state;
pub mod splitter;
pub mod vertex;

pub use crate::active_set::{select_active_set, ActiveSet};
pub use crate::app::App;
pub use crate::config::Options;
pub use crate::error::{AppError, ConfigError, MorphError};
pub use crate::frame_rater::FrameRater;
pub use crate::geometry::{Geometry, VertexAttribute};
pub use crate::key_state::KeyState;
pub use crate::morph::{
    MorphGeometry, MorphSetup, MAX_ACTIVE_MORPH_TARGETS, MORPH_TARGETS_DEFINE,
};
pub use crate::morph_uniform::MorphUniform;
pub use crate::mouse_state::{
    ButtonState, ClickPhase, MouseButton, MouseState, DEFAULT_DOUBLE_CLICK_DURATION,
};
pub use crate::splitter::{
    Rect, SplitOrientation, SplitType, Splitter, SplitterLayout, SplitterStyle, SplitterStyles,
};
pub use crate::vertex::{Vertex, INDICES, VERTICES};
