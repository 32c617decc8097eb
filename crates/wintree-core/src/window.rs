#![forbid(unsafe_code)]

//! Window tree nodes and the recalc/repaint lifecycle.
//!
//! A [`Window`] is a retained tree node: it carries geometry, orientation,
//! a size request, a pending-action set, child windows, and at most one
//! [`Pane`] — the widget-specific state behind the two-phase dispatch.
//!
//! # Lifecycle
//!
//! The embedding tree manager owns geometry negotiation. Each draw pass it
//! marks windows ([`WindowActions::RECALC`]) and calls [`Window::redraw`],
//! which runs the two phases in order on every visible node:
//!
//! 1. **recalc** — the pane decides what must change and requests follow-up
//!    actions (typically [`WindowActions::REPAINT`]).
//! 2. **repaint** — the pane emits its content to the shared [`Surface`].
//!
//! Repaint is *not* guaranteed to be pure: self-animating panes advance
//! their own state as a side effect of painting. Drive it a known number of
//! times and check the resulting state rather than assuming idempotence.
//!
//! A pane's lifetime is bounded by its window: attached after the window
//! exists, dropped exactly once when the window is dropped, unreachable
//! afterwards. There is no separate release callback to misuse.

use std::any::Any;

use crate::surface::Surface;
use unicode_width::UnicodeWidthChar;

bitflags::bitflags! {
    /// Pending lifecycle actions on a window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowActions: u8 {
        /// Contents must be recalculated.
        const RECALC  = 1 << 0;
        /// Contents must be repainted.
        const REPAINT = 1 << 1;
    }
}

/// What role a window plays in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Invisible structural node at the top of a tree.
    Root,
    /// Invisible node grouping child windows.
    Container,
    /// A thin informational bar or filler strip.
    StatusBar,
}

/// Layout axis along which a window's children are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children stack top to bottom.
    Vertical,
    /// Children stack left to right.
    Horizontal,
}

/// How the tree manager should treat a window's size request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Keep the requested extents.
    Fixed,
    /// Shrink to the children's needs.
    Minimise,
    /// Grow to fill remaining space.
    Maximise,
}

/// Requested extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// A caller-specified number of cells.
    Fixed(u16),
    /// Fill whatever space remains.
    Unlimited,
}

impl Extent {
    /// The fixed cell count, or 0 for unlimited extents.
    pub const fn cells(&self) -> u16 {
        match self {
            Extent::Fixed(n) => *n,
            Extent::Unlimited => 0,
        }
    }
}

/// A window's size request, consumed by the external layout negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRequest {
    pub policy: SizePolicy,
    pub cols: Extent,
    pub rows: Extent,
}

/// Current geometry and visibility of a window.
///
/// The tree manager guarantees `rows` and `cols` are current before the
/// lifecycle phases run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Height in cells.
    pub rows: u16,
    /// Width in cells.
    pub cols: u16,
    /// Absolute row of the window's top edge.
    pub row_offset: u16,
    /// Absolute column of the window's left edge.
    pub col_offset: u16,
    /// Hidden windows (and their subtrees) are skipped by redraw.
    pub visible: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            row_offset: 0,
            col_offset: 0,
            visible: true,
        }
    }
}

impl WindowState {
    /// Write `text` at a window-relative position, clipped to the window.
    ///
    /// Rows at or beyond `self.rows` are dropped entirely; text is truncated
    /// at the window's right edge by display width. Degenerate geometry
    /// means nothing is emitted.
    pub fn write_str(&self, surface: &mut dyn Surface, row: u16, col: u16, text: &str) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let budget = (self.cols - col) as usize;
        let mut used = 0usize;
        let mut end = text.len();
        for (i, ch) in text.char_indices() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                end = i;
                break;
            }
            used += w;
        }
        if end == 0 {
            return;
        }
        surface.put_str(
            self.row_offset.saturating_add(row),
            self.col_offset.saturating_add(col),
            &text[..end],
        );
    }
}

/// Widget-specific state and behavior attached to a [`Window`].
///
/// The two methods are the lifecycle dispatch slots. Both are total: they
/// handle degenerate geometry by doing nothing rather than failing.
pub trait Pane: Any {
    /// Phase one: decide what needs to happen on this pass.
    ///
    /// Returns the follow-up actions to merge into the window's pending set.
    /// Must not assume the surface is available and must not draw.
    fn recalc(&mut self, state: &WindowState) -> WindowActions;

    /// Phase two: emit content to the shared surface.
    ///
    /// Must leave the surface's active attribute as it found it. May mutate
    /// the pane's own state (self-animating panes do).
    fn repaint(&mut self, state: &WindowState, surface: &mut dyn Surface);

    /// Upcast for typed access through [`Window::pane_ref`].
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed access through [`Window::pane_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A retained window tree node.
pub struct Window {
    pub kind: WindowKind,
    pub orientation: Orientation,
    pub size: SizeRequest,
    pub state: WindowState,
    pub actions: WindowActions,
    pub children: Vec<Window>,
    pane: Option<Box<dyn Pane>>,
}

impl Window {
    /// Create a window with the given role, axis, and size request.
    ///
    /// Fixed extents seed the initial geometry; unlimited extents start at
    /// zero until the tree manager assigns real space.
    pub fn new(
        kind: WindowKind,
        orientation: Orientation,
        policy: SizePolicy,
        cols: Extent,
        rows: Extent,
    ) -> Self {
        Self {
            kind,
            orientation,
            size: SizeRequest { policy, cols, rows },
            state: WindowState {
                rows: rows.cells(),
                cols: cols.cells(),
                ..WindowState::default()
            },
            actions: WindowActions::empty(),
            children: Vec::new(),
            pane: None,
        }
    }

    /// Attach the pane. Replaces (and drops) any previous pane.
    pub fn set_pane(&mut self, pane: Box<dyn Pane>) {
        self.pane = Some(pane);
    }

    /// Whether a pane is attached.
    pub fn has_pane(&self) -> bool {
        self.pane.is_some()
    }

    /// Typed access to the attached pane.
    pub fn pane_ref<P: Pane>(&self) -> Option<&P> {
        self.pane.as_deref().and_then(|p| p.as_any().downcast_ref())
    }

    /// Typed mutable access to the attached pane.
    pub fn pane_mut<P: Pane>(&mut self) -> Option<&mut P> {
        self.pane
            .as_deref_mut()
            .and_then(|p| p.as_any_mut().downcast_mut())
    }

    /// Assign geometry. Normally called by the external layout negotiation.
    pub fn set_geometry(&mut self, row_offset: u16, col_offset: u16, rows: u16, cols: u16) {
        self.state.row_offset = row_offset;
        self.state.col_offset = col_offset;
        self.state.rows = rows;
        self.state.cols = cols;
    }

    /// Show or hide this window (and with it, its subtree).
    pub fn set_visible(&mut self, visible: bool) {
        self.state.visible = visible;
    }

    /// Append a child window.
    pub fn add_child(&mut self, child: Window) {
        self.children.push(child);
    }

    /// Run one draw pass over this window and its visible subtree.
    ///
    /// Executes pending recalc, merges the actions it requests, executes
    /// pending repaint, clears both flags, then recurses into children.
    /// Hidden subtrees keep their pending actions for when they reappear.
    pub fn redraw(&mut self, surface: &mut dyn Surface) {
        if !self.state.visible {
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "window_redraw",
            kind = ?self.kind,
            rows = self.state.rows,
            cols = self.state.cols,
            actions = ?self.actions,
        )
        .entered();

        if self.actions.contains(WindowActions::RECALC) {
            if let Some(pane) = self.pane.as_mut() {
                let requested = pane.recalc(&self.state);
                self.actions |= requested;
            }
            self.actions.remove(WindowActions::RECALC);
        }
        if self.actions.contains(WindowActions::REPAINT) {
            if let Some(pane) = self.pane.as_mut() {
                pane.repaint(&self.state, surface);
            }
            self.actions.remove(WindowActions::REPAINT);
        }

        for child in &mut self.children {
            child.redraw(surface);
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("kind", &self.kind)
            .field("orientation", &self.orientation)
            .field("size", &self.size)
            .field("state", &self.state)
            .field("actions", &self.actions)
            .field("children", &self.children.len())
            .field("pane", &self.pane.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::BufferSurface;

    /// Pane that counts phase invocations and paints a marker.
    struct CountingPane {
        recalcs: u32,
        repaints: u32,
    }

    impl CountingPane {
        fn new() -> Self {
            Self {
                recalcs: 0,
                repaints: 0,
            }
        }
    }

    impl Pane for CountingPane {
        fn recalc(&mut self, _state: &WindowState) -> WindowActions {
            self.recalcs += 1;
            WindowActions::REPAINT
        }

        fn repaint(&mut self, state: &WindowState, surface: &mut dyn Surface) {
            self.repaints += 1;
            state.write_str(surface, 0, 0, "#");
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    fn bar_window() -> Window {
        let mut win = Window::new(
            WindowKind::StatusBar,
            Orientation::Vertical,
            SizePolicy::Fixed,
            Extent::Unlimited,
            Extent::Fixed(1),
        );
        win.set_geometry(0, 0, 1, 8);
        win.set_pane(Box::new(CountingPane::new()));
        win
    }

    #[test]
    fn new_window_seeds_state_from_fixed_extents() {
        let win = Window::new(
            WindowKind::StatusBar,
            Orientation::Vertical,
            SizePolicy::Fixed,
            Extent::Unlimited,
            Extent::Fixed(2),
        );
        assert_eq!(win.state.rows, 2);
        assert_eq!(win.state.cols, 0);
        assert!(win.state.visible);
        assert!(win.actions.is_empty());
    }

    #[test]
    fn redraw_runs_recalc_then_repaint_once() {
        let mut win = bar_window();
        win.actions = WindowActions::RECALC;
        let mut surf = BufferSurface::new(1, 8);
        win.redraw(&mut surf);

        let pane = win.pane_ref::<CountingPane>().unwrap();
        assert_eq!(pane.recalcs, 1);
        assert_eq!(pane.repaints, 1);
        assert!(win.actions.is_empty());
        assert_eq!(surf.row_string(0), "#");
    }

    #[test]
    fn redraw_without_pending_actions_is_idle() {
        let mut win = bar_window();
        let mut surf = BufferSurface::new(1, 8);
        win.redraw(&mut surf);

        let pane = win.pane_ref::<CountingPane>().unwrap();
        assert_eq!(pane.recalcs, 0);
        assert_eq!(pane.repaints, 0);
    }

    #[test]
    fn repaint_only_pass_skips_recalc() {
        let mut win = bar_window();
        win.actions = WindowActions::REPAINT;
        let mut surf = BufferSurface::new(1, 8);
        win.redraw(&mut surf);

        let pane = win.pane_ref::<CountingPane>().unwrap();
        assert_eq!(pane.recalcs, 0);
        assert_eq!(pane.repaints, 1);
    }

    #[test]
    fn hidden_window_keeps_pending_actions() {
        let mut win = bar_window();
        win.actions = WindowActions::RECALC;
        win.set_visible(false);
        let mut surf = BufferSurface::new(1, 8);
        win.redraw(&mut surf);

        assert_eq!(win.actions, WindowActions::RECALC);
        assert_eq!(surf.row_string(0), "");
    }

    #[test]
    fn redraw_recurses_into_children() {
        let mut root = Window::new(
            WindowKind::Container,
            Orientation::Vertical,
            SizePolicy::Minimise,
            Extent::Unlimited,
            Extent::Fixed(2),
        );
        let mut top = bar_window();
        top.actions = WindowActions::RECALC;
        let mut bottom = bar_window();
        bottom.set_geometry(1, 0, 1, 8);
        bottom.actions = WindowActions::RECALC;
        root.add_child(top);
        root.add_child(bottom);

        let mut surf = BufferSurface::new(2, 8);
        root.redraw(&mut surf);
        assert_eq!(surf.row_string(0), "#");
        assert_eq!(surf.row_string(1), "#");
    }

    #[test]
    fn pane_mut_downcasts_to_concrete_type() {
        let mut win = bar_window();
        assert!(win.pane_mut::<CountingPane>().is_some());
        win.pane_mut::<CountingPane>().unwrap().recalcs = 7;
        assert_eq!(win.pane_ref::<CountingPane>().unwrap().recalcs, 7);
    }

    #[test]
    fn write_str_applies_window_offsets() {
        let state = WindowState {
            rows: 2,
            cols: 4,
            row_offset: 1,
            col_offset: 3,
            ..WindowState::default()
        };
        let mut surf = BufferSurface::new(3, 10);
        state.write_str(&mut surf, 1, 1, "ab");
        assert_eq!(surf.get(2, 4).unwrap().ch, 'a');
        assert_eq!(surf.get(2, 5).unwrap().ch, 'b');
    }

    #[test]
    fn write_str_truncates_at_window_edge() {
        let state = WindowState {
            rows: 1,
            cols: 3,
            ..WindowState::default()
        };
        let mut surf = BufferSurface::new(1, 10);
        state.write_str(&mut surf, 0, 0, "abcdef");
        assert_eq!(surf.row_string(0), "abc");
    }

    #[test]
    fn write_str_drops_rows_outside_window() {
        let state = WindowState {
            rows: 1,
            cols: 5,
            ..WindowState::default()
        };
        let mut surf = BufferSurface::new(5, 5);
        state.write_str(&mut surf, 3, 0, "x");
        assert_eq!(surf.row_string(3), "");
    }

    #[test]
    fn write_str_degenerate_geometry_is_noop() {
        let state = WindowState {
            rows: 0,
            cols: 0,
            ..WindowState::default()
        };
        let mut surf = BufferSurface::new(2, 2);
        state.write_str(&mut surf, 0, 0, "x");
        assert_eq!(surf.row_string(0), "");
    }

    #[test]
    fn extent_cells() {
        assert_eq!(Extent::Fixed(3).cells(), 3);
        assert_eq!(Extent::Unlimited.cells(), 0);
    }
}
