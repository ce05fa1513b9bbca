//! # Mouse Button State (`mouse_state.rs`)
//!
//! Tracks which mouse buttons are held and whether the most recent press completed a
//! double-click. The tracker is fed raw press and release notifications (either directly
//! through [`MouseState::on_press`] / [`MouseState::on_release`] or from `winit` through
//! [`MouseState::handle_window_event`]) and answers two queries that a render loop can poll
//! once per frame:
//!
//! - [`MouseState::is_pressed`]: is the button currently held down?
//! - [`MouseState::is_double_clicked`]: did the latest press of this button finish a double-click?
//!
//! ## Click Trains
//!
//! Every button runs its own small state machine, a *click train*:
//!
//! ```text
//! Idle      --press--------------------> Pressed1  (deadline = now + duration)
//! Pressed1  --release------------------> Released1
//! Released1 --press, now <  deadline---> Pressed2  (deadline kept)
//! Released1 --press, now >= deadline---> Pressed1  (deadline restarted)
//! Pressed2  --release------------------> Released2
//! Released2 --press--------------------> Pressed1  (deadline restarted)
//! ```
//!
//! The double-click is reported on the *second press*, so a consumer polling once per frame
//! sees it without waiting for any timeout. Expiry is a plain comparison between the press
//! timestamp and the deadline stored by the first press; there is no timer running in the
//! background and nothing to stop when the tracker is dropped.
//!
//! ## Example
//!
//! ```
//! use engine_core::{MouseButton, MouseState};
//! use web_time::{Duration, Instant};
//!
//! let mut mouse = MouseState::new();
//! let t0 = Instant::now();
//!
//! mouse.on_press(MouseButton::Left, t0);
//! mouse.on_release(MouseButton::Left, t0 + Duration::from_millis(50));
//! mouse.on_press(MouseButton::Left, t0 + Duration::from_millis(200));
//!
//! assert!(mouse.is_pressed(MouseButton::Left));
//! assert!(mouse.is_double_clicked(MouseButton::Left));
//! ```

use web_time::{Duration, Instant};

use winit::event::{ElementState, WindowEvent};

use crate::error::ConfigError;

/// Default time window in which a second press counts as a double-click.
pub const DEFAULT_DOUBLE_CLICK_DURATION: Duration = Duration::from_millis(300);

/// The mouse buttons tracked by [`MouseState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// All tracked buttons, in registry order.
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    /// Maps a `winit` button onto a tracked button.
    ///
    /// Returns `None` for buttons that are not tracked (`Back`, `Forward`, `Other`).
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Position of a button inside its click train.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ClickPhase {
    /// No train active.
    #[default]
    Idle,
    /// Held down after the first click.
    Pressed1,
    /// Released after the first click; a second press may still complete a double-click.
    Released1,
    /// Held down after completing a double-click.
    Pressed2,
    /// Released after completing a double-click.
    Released2,
}

impl ClickPhase {
    /// Signed click count of the phase.
    ///
    /// The magnitude is the number of clicks in the train, the sign tells whether the button
    /// is held (`+`) or released (`-`), and `0` means idle.
    pub fn click_count(self) -> i8 {
        match self {
            ClickPhase::Idle => 0,
            ClickPhase::Pressed1 => 1,
            ClickPhase::Released1 => -1,
            ClickPhase::Pressed2 => 2,
            ClickPhase::Released2 => -2,
        }
    }

    fn released(self) -> Self {
        match self {
            ClickPhase::Pressed1 => ClickPhase::Released1,
            ClickPhase::Pressed2 => ClickPhase::Released2,
            other => other,
        }
    }
}

/// Click train state of a single button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    phase: ClickPhase,
    /// Set by the first press of a train. An open `Released1` train only continues into a
    /// double-click when the next press happens strictly before this instant.
    pending_expiry: Option<Instant>,
}

impl ButtonState {
    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    pub fn click_count(&self) -> i8 {
        self.phase.click_count()
    }

    pub fn pending_expiry(&self) -> Option<Instant> {
        self.pending_expiry
    }

    fn start_train(&mut self, now: Instant, duration: Duration) {
        self.phase = ClickPhase::Pressed1;
        self.pending_expiry = Some(now + duration);
    }

    fn press(&mut self, now: Instant, duration: Duration) {
        match (self.phase, self.pending_expiry) {
            (ClickPhase::Released1, Some(deadline)) if now < deadline => {
                self.phase = ClickPhase::Pressed2;
            }
            _ => self.start_train(now, duration),
        }
    }

    fn release(&mut self) {
        self.phase = self.phase.released();
    }
}

/// Press/release tracker with double-click detection for the left, middle and right buttons.
///
/// One [`ButtonState`] exists per tracked button for the whole lifetime of the tracker. The
/// tracker also remembers which button was pressed last: a double-click is only reported for
/// that button, so an older double-click on another button stops being reported as soon as a
/// different button is pressed.
#[derive(Clone, Debug)]
pub struct MouseState {
    buttons: [ButtonState; 3],
    last_button: Option<MouseButton>,
    double_click_duration: Duration,
}

impl MouseState {
    /// Creates a tracker with every button idle and the default double-click duration.
    pub fn new() -> Self {
        Self::with_double_click_duration(DEFAULT_DOUBLE_CLICK_DURATION)
    }

    pub fn with_double_click_duration(double_click_duration: Duration) -> Self {
        Self {
            buttons: [ButtonState::default(); 3],
            last_button: None,
            double_click_duration,
        }
    }

    pub fn double_click_duration(&self) -> Duration {
        self.double_click_duration
    }

    /// Sets the double-click window. Trains already open keep the deadline they started with.
    pub fn set_double_click_duration(&mut self, duration: Duration) {
        self.double_click_duration = duration;
    }

    /// Sets the double-click window from a signed millisecond value, as found in config files.
    pub fn set_double_click_millis(&mut self, millis: i64) -> Result<(), ConfigError> {
        let millis =
            u64::try_from(millis).map_err(|_| ConfigError::NegativeDoubleClickDuration(millis))?;
        self.set_double_click_duration(Duration::from_millis(millis));
        Ok(())
    }

    /// Advances the click train of `button` for a press at `now`.
    pub fn on_press(&mut self, button: MouseButton, now: Instant) {
        let duration = self.double_click_duration;
        let state = &mut self.buttons[button.index()];
        state.press(now, duration);
        self.last_button = Some(button);

        if state.phase == ClickPhase::Pressed2 {
            log::debug!("Double click detected on {button:?}");
        }
    }

    /// Advances the click train of `button` for a release.
    ///
    /// A release without a matching press is ignored.
    pub fn on_release(&mut self, button: MouseButton, _now: Instant) {
        self.buttons[button.index()].release();
    }

    /// Returns `true` while `button` is held down.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button.index()].click_count() > 0
    }

    /// Returns `true` when the latest press of `button` completed a double-click and no other
    /// button has been pressed since.
    pub fn is_double_clicked(&self, button: MouseButton) -> bool {
        self.last_button == Some(button) && self.buttons[button.index()].click_count().abs() == 2
    }

    pub fn last_button(&self) -> Option<MouseButton> {
        self.last_button
    }

    pub fn button_state(&self, button: MouseButton) -> &ButtonState {
        &self.buttons[button.index()]
    }

    /// Drops every open click train, e.g. when the window loses focus and release events
    /// can no longer be trusted to arrive.
    pub fn clear(&mut self) {
        self.buttons = [ButtonState::default(); 3];
        self.last_button = None;
    }

    /// Feeds a `winit` window event into the tracker.
    ///
    /// Only `MouseInput` events for tracked buttons change state; everything else is ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent, now: Instant) {
        let WindowEvent::MouseInput { state, button, .. } = event else {
            return;
        };

        let Some(button) = MouseButton::from_winit(*button) else {
            log::trace!("Ignoring untracked mouse button {button:?}");
            return;
        };

        match state {
            ElementState::Pressed => self.on_press(button, now),
            ElementState::Released => self.on_release(button, now),
        }
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new()
    }
}
