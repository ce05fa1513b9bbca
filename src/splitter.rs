//! # Splitter Layout (`splitter.rs`)
//!
//! Arithmetic behind a two-pane splitter: a content area divided into a first pane, a spacer
//! the user can drag, and a second pane. A horizontal splitter places the panes side by side
//! (the spacer moves along x), a vertical one stacks them (the spacer moves along y).
//!
//! The split position is interpreted according to [`SplitType`]:
//!
//! - [`SplitType::Relative`]: fraction `0..=1` of the content size at the spacer's center.
//! - [`SplitType::Absolute`]: pixels from the left/top edge to the spacer.
//! - [`SplitType::ReverseAbsolute`]: pixels from the right/bottom edge to the spacer.
//!
//! `min` and `max` bound the size in pixels of the pane the position is measured from.
//!
//! The spacer thickness comes from the active [`SplitterStyle`], which switches between
//! normal, hovered and dragged.

use nalgebra_glm::{Vec2, Vec4};

use crate::mouse_state::MouseButton;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SplitType {
    #[default]
    Relative,
    Absolute,
    ReverseAbsolute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SplitOrientation {
    /// Panes side by side.
    Horizontal,
    /// Panes stacked.
    Vertical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitterStyle {
    pub spacer_border_color: Vec4,
    pub spacer_color: Vec4,
    pub spacer_size: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SplitterStyles {
    pub normal: SplitterStyle,
    pub over: SplitterStyle,
    pub drag: SplitterStyle,
}

impl Default for SplitterStyles {
    fn default() -> Self {
        let border = Vec4::new(0.63, 0.63, 0.63, 1.0);
        Self {
            normal: SplitterStyle {
                spacer_border_color: border,
                spacer_color: Vec4::new(0.75, 0.75, 0.75, 1.0),
                spacer_size: 6.0,
            },
            over: SplitterStyle {
                spacer_border_color: border,
                spacer_color: Vec4::new(0.84, 0.84, 0.84, 1.0),
                spacer_size: 6.0,
            },
            drag: SplitterStyle {
                spacer_border_color: border,
                spacer_color: Vec4::new(0.55, 0.55, 0.55, 1.0),
                spacer_size: 6.0,
            },
        }
    }
}

/// Axis-aligned rectangle in pixels, origin at the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn contains(&self, point: &Vec2) -> bool {
        point.x >= self.position.x
            && point.y >= self.position.y
            && point.x < self.position.x + self.size.x
            && point.y < self.position.y + self.size.y
    }
}

/// Rectangles produced by [`Splitter::layout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SplitterLayout {
    pub first: Rect,
    pub spacer: Rect,
    pub second: Rect,
}

#[derive(Clone, Debug)]
pub struct Splitter {
    orientation: SplitOrientation,
    split_type: SplitType,
    styles: SplitterStyles,
    pos: f32,
    min: i32,
    max: i32,
    width: f32,
    height: f32,
    // Cursor coordinate along the split axis at the previous drag step.
    pos_last: f32,
    pressed: bool,
    mouse_over: bool,
}

impl Splitter {
    pub fn new(orientation: SplitOrientation, width: f32, height: f32) -> Self {
        Self {
            orientation,
            split_type: SplitType::Relative,
            styles: SplitterStyles::default(),
            pos: 0.5,
            min: 0,
            max: i32::MAX,
            width,
            height,
            pos_last: 0.0,
            pressed: false,
            mouse_over: false,
        }
    }

    pub fn new_horizontal(width: f32, height: f32) -> Self {
        Self::new(SplitOrientation::Horizontal, width, height)
    }

    pub fn new_vertical(width: f32, height: f32) -> Self {
        Self::new(SplitOrientation::Vertical, width, height)
    }

    pub fn orientation(&self) -> SplitOrientation {
        self.orientation
    }

    pub fn split_type(&self) -> SplitType {
        self.split_type
    }

    /// Changes how the split position is interpreted. The stored value is kept as is.
    pub fn set_split_type(&mut self, split_type: SplitType) {
        self.split_type = split_type;
    }

    pub fn split_min(&self) -> i32 {
        self.min
    }

    /// Sets the lower pixel bound. Negative values become zero; a value above the current
    /// maximum swaps roles with it.
    pub fn set_split_min(&mut self, min: i32) {
        if min < 0 {
            self.min = 0;
        } else if min > self.max {
            self.min = self.max;
            self.max = min;
        } else {
            self.min = min;
        }
        self.set_split(self.pos);
    }

    pub fn split_max(&self) -> i32 {
        self.max
    }

    /// Sets the upper pixel bound. Negative values become zero; a value below the current
    /// minimum swaps roles with it.
    pub fn set_split_max(&mut self, max: i32) {
        if max < 0 {
            self.max = 0;
        } else if max < self.min {
            self.max = self.min;
            self.min = max;
        } else {
            self.max = max;
        }
        self.set_split(self.pos);
    }

    pub fn split(&self) -> f32 {
        self.pos
    }

    /// Moves the split, clamped to the configured bounds.
    pub fn set_split(&mut self, pos: f32) {
        let min = self.min as f32;
        let max = self.max as f32;

        // Bounds can end up inverted (a negative max becomes 0 without swapping), so this
        // cannot use f32::clamp.
        if self.split_type != SplitType::Relative {
            self.pos = if pos < min {
                min
            } else if pos > max {
                max
            } else {
                pos
            };
            return;
        }

        let pos = pos.clamp(0.0, 1.0);
        let extent = self.extent();
        if extent == 0.0 {
            self.pos = pos;
            return;
        }

        let half_spacer = self.spacer_size() / 2.0;
        let edge = extent * pos - half_spacer;
        self.pos = if edge < min {
            (min + half_spacer) / extent
        } else if edge > max {
            (max + half_spacer) / extent
        } else {
            pos
        };
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn styles(&self) -> &SplitterStyles {
        &self.styles
    }

    pub fn set_styles(&mut self, styles: SplitterStyles) {
        self.styles = styles;
    }

    /// Style for the current interaction state: dragging wins over hovering.
    pub fn current_style(&self) -> &SplitterStyle {
        if self.pressed {
            &self.styles.drag
        } else if self.mouse_over {
            &self.styles.over
        } else {
            &self.styles.normal
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Computes the pane and spacer rectangles for the current size and split.
    pub fn layout(&self) -> SplitterLayout {
        let spacer = self.spacer_size();
        let extent = self.extent();

        let mut offset = match self.split_type {
            SplitType::Relative => extent * self.pos - spacer / 2.0,
            SplitType::Absolute => self.pos,
            SplitType::ReverseAbsolute => extent - self.pos - spacer,
        };
        if offset < 0.0 {
            offset = 0.0;
        } else if offset > extent - spacer {
            offset = extent - spacer;
        }
        let rest = extent - offset - spacer;

        match self.orientation {
            SplitOrientation::Horizontal => SplitterLayout {
                first: Rect::new(0.0, 0.0, offset, self.height),
                spacer: Rect::new(offset, 0.0, spacer, self.height),
                second: Rect::new(offset + spacer, 0.0, rest, self.height),
            },
            SplitOrientation::Vertical => SplitterLayout {
                first: Rect::new(0.0, 0.0, self.width, offset),
                spacer: Rect::new(0.0, offset, self.width, spacer),
                second: Rect::new(0.0, offset + spacer, self.width, rest),
            },
        }
    }

    /// Mouse button pressed over the spacer. The left button starts a drag.
    pub fn on_mouse_down(&mut self, button: MouseButton, cursor: &Vec2) {
        self.pressed = true;
        if button == MouseButton::Left {
            self.pos_last = self.along_axis(cursor);
        }
    }

    /// Mouse button released. Releasing the right button during a press snaps the split back
    /// to its minimum.
    pub fn on_mouse_up(&mut self, button: MouseButton) {
        if button == MouseButton::Right && self.pressed {
            self.set_split(self.min as f32);
        }
        self.pressed = false;
    }

    pub fn on_cursor_enter(&mut self) {
        self.mouse_over = true;
    }

    pub fn on_cursor_leave(&mut self) {
        self.mouse_over = false;
    }

    /// Cursor moved to `cursor`. Returns `true` when a drag moved the split.
    pub fn on_cursor_move(&mut self, cursor: &Vec2) -> bool {
        if !self.pressed {
            return false;
        }

        let coordinate = self.along_axis(cursor);
        let delta = coordinate - self.pos_last;
        self.pos_last = coordinate;

        let pos = match self.split_type {
            SplitType::Relative => {
                let extent = self.extent();
                if extent == 0.0 {
                    self.pos
                } else {
                    self.pos + delta / extent
                }
            }
            SplitType::Absolute => self.pos + delta,
            SplitType::ReverseAbsolute => self.pos - delta,
        };
        self.set_split(pos);
        true
    }

    fn spacer_size(&self) -> f32 {
        self.current_style().spacer_size
    }

    fn extent(&self) -> f32 {
        match self.orientation {
            SplitOrientation::Horizontal => self.width,
            SplitOrientation::Vertical => self.height,
        }
    }

    fn along_axis(&self, point: &Vec2) -> f32 {
        match self.orientation {
            SplitOrientation::Horizontal => point.x,
            SplitOrientation::Vertical => point.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_is_centered() {
        let splitter = Splitter::new_horizontal(100.0, 40.0);

        let layout = splitter.layout();

        assert_eq!(layout.first, Rect::new(0.0, 0.0, 47.0, 40.0));
        assert_eq!(layout.spacer, Rect::new(47.0, 0.0, 6.0, 40.0));
        assert_eq!(layout.second, Rect::new(53.0, 0.0, 47.0, 40.0));
    }

    #[test]
    fn vertical_split_stacks_panes() {
        let mut splitter = Splitter::new_vertical(30.0, 200.0);
        splitter.set_split_type(SplitType::Absolute);
        splitter.set_split(50.0);

        let layout = splitter.layout();

        assert_eq!(layout.first, Rect::new(0.0, 0.0, 30.0, 50.0));
        assert_eq!(layout.second, Rect::new(0.0, 56.0, 30.0, 144.0));
    }

    #[test]
    fn relative_split_respects_pixel_bounds() {
        let mut splitter = Splitter::new_horizontal(100.0, 10.0);
        splitter.set_split_min(20);

        splitter.set_split(0.0);
        assert_eq!(splitter.split(), 0.23);

        splitter.set_split_max(60);
        splitter.set_split(1.0);
        assert_eq!(splitter.split(), 0.63);
    }

    #[test]
    fn bounds_swap_when_crossed() {
        let mut splitter = Splitter::new_horizontal(100.0, 10.0);
        splitter.set_split_max(30);
        splitter.set_split_min(50);

        assert_eq!((splitter.split_min(), splitter.split_max()), (30, 50));

        splitter.set_split_max(-4);
        assert_eq!((splitter.split_min(), splitter.split_max()), (30, 0));
    }

    #[test]
    fn reverse_absolute_measures_from_far_edge() {
        let mut splitter = Splitter::new_horizontal(100.0, 10.0);
        splitter.set_split_type(SplitType::ReverseAbsolute);
        splitter.set_split(30.0);

        let layout = splitter.layout();

        assert_eq!(layout.second.size.x, 30.0);
        assert_eq!(layout.first.size.x, 64.0);
    }

    #[test]
    fn dragging_moves_the_split() {
        let mut splitter = Splitter::new_horizontal(200.0, 10.0);
        splitter.set_split_type(SplitType::Absolute);
        splitter.set_split(50.0);

        assert!(!splitter.on_cursor_move(&Vec2::new(70.0, 0.0)));

        splitter.on_mouse_down(MouseButton::Left, &Vec2::new(52.0, 5.0));
        assert!(splitter.is_dragging());
        assert!(splitter.on_cursor_move(&Vec2::new(72.0, 5.0)));
        assert_eq!(splitter.split(), 70.0);

        splitter.on_mouse_up(MouseButton::Left);
        assert!(!splitter.is_dragging());
        assert_eq!(splitter.split(), 70.0);
    }

    #[test]
    fn right_release_snaps_to_minimum() {
        let mut splitter = Splitter::new_horizontal(200.0, 10.0);
        splitter.set_split_type(SplitType::Absolute);
        splitter.set_split_min(15);
        splitter.set_split(80.0);

        splitter.on_mouse_down(MouseButton::Right, &Vec2::new(80.0, 0.0));
        splitter.on_mouse_up(MouseButton::Right);

        assert_eq!(splitter.split(), 15.0);
    }

    #[test]
    fn style_follows_interaction() {
        let mut styles = SplitterStyles::default();
        styles.drag.spacer_size = 10.0;
        let mut splitter = Splitter::new_horizontal(100.0, 10.0);
        splitter.set_styles(styles);

        splitter.on_cursor_enter();
        assert_eq!(splitter.current_style(), &splitter.styles().over);

        splitter.on_mouse_down(MouseButton::Left, &Vec2::new(50.0, 0.0));
        assert_eq!(splitter.layout().spacer.size.x, 10.0);

        splitter.on_mouse_up(MouseButton::Left);
        splitter.on_cursor_leave();
        assert_eq!(splitter.current_style(), &splitter.styles().normal);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(&Vec2::new(10.0, 14.9)));
        assert!(!rect.contains(&Vec2::new(15.0, 12.0)));
    }
}
