#![forbid(unsafe_code)]

//! Filler pane.
//!
//! A decorative leaf pane that floods its window with a single letter and
//! advances that letter by one (`'A'..='Z'`, wrapping) on every repaint, so
//! successive redraws produce a slow alphabet animation. Useful for marking
//! otherwise-unused screen space, e.g. a separator column between panes.

use std::any::Any;
use std::sync::Arc;

use wintree_core::surface::Surface;
use wintree_core::window::{
    Extent, Orientation, Pane, SizePolicy, Window, WindowActions, WindowKind, WindowState,
};
use wintree_style::Palette;

/// Longest line a single repaint will emit; wider windows get a truncated
/// line rather than an unbounded allocation.
pub const MAX_LINE_LEN: usize = 1023;

/// Private state of a filler window.
#[derive(Debug, Clone)]
pub struct Filler {
    /// Letter currently flooding the window. Always `'A'..='Z'`.
    fill_char: char,
    /// Quoted color group, resolved through the palette on every repaint.
    color_group: i32,
    palette: Arc<Palette>,
}

impl Filler {
    /// Create filler state starting at `'A'`.
    ///
    /// `color_group` is unbounded; the palette wraps it onto its quoted
    /// cycle.
    pub fn new(color_group: i32, palette: Arc<Palette>) -> Self {
        Self {
            fill_char: 'A',
            color_group,
            palette,
        }
    }

    /// The letter the next repaint will display.
    pub fn fill_char(&self) -> char {
        self.fill_char
    }

    /// The quoted color group this filler was created with.
    pub fn color_group(&self) -> i32 {
        self.color_group
    }

    fn advance(&mut self) {
        self.fill_char = match self.fill_char {
            'Z' => 'A',
            c => (c as u8 + 1) as char,
        };
    }
}

impl Pane for Filler {
    /// A filler never changes shape, so recalc only requests a repaint.
    fn recalc(&mut self, _state: &WindowState) -> WindowActions {
        WindowActions::REPAINT
    }

    /// Flood every row with the current letter, then advance it.
    ///
    /// Not idempotent: each call shifts the displayed letter by one. With
    /// degenerate geometry nothing is emitted, but the letter still
    /// advances.
    fn repaint(&mut self, state: &WindowState, surface: &mut dyn Surface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "pane_repaint",
            pane = "Filler",
            rows = state.rows,
            cols = state.cols,
            ch = %self.fill_char,
        )
        .entered();

        let len = (state.cols as usize).min(MAX_LINE_LEN);
        let line: String = std::iter::repeat_n(self.fill_char, len).collect();

        surface.set_attr(self.palette.quoted(self.color_group));
        for row in 0..state.rows {
            state.write_str(surface, row, 0, &line);
        }
        surface.reset_attr();

        self.advance();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create a filler window.
///
/// The window is vertical with a fixed row thickness of
/// `1 + color_group.rem_euclid(2)` — one cell for even groups, two for odd
/// ones — and unlimited width. The thickness/parity coupling is inherited
/// behavior; see DESIGN.md. The window comes back already marked
/// repaint-pending, so the first draw pass paints it.
pub fn filler_window(color_group: i32, palette: Arc<Palette>) -> Window {
    let thickness = 1 + color_group.rem_euclid(2) as u16;
    let mut win = Window::new(
        WindowKind::StatusBar,
        Orientation::Vertical,
        SizePolicy::Fixed,
        Extent::Unlimited,
        Extent::Fixed(thickness),
    );
    win.actions = WindowActions::REPAINT;
    win.set_pane(Box::new(Filler::new(color_group, palette)));
    win
}
