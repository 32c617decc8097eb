#![forbid(unsafe_code)]

//! Message container.
//!
//! A container window whose children form a stack of message windows: only
//! the top entry is visible. Pushing hides the previous top; popping
//! re-shows it. The bottom entry is permanent — pop refuses to remove the
//! last child so there is always a message window to draw into.

use wintree_core::window::{
    Extent, Orientation, SizePolicy, Window, WindowActions, WindowKind,
};

/// Create an empty message container.
pub fn container_window() -> Window {
    Window::new(
        WindowKind::Container,
        Orientation::Vertical,
        SizePolicy::Minimise,
        Extent::Unlimited,
        Extent::Fixed(1),
    )
}

/// Push a window onto the container stack.
///
/// The previous top is hidden; the new window becomes the visible top and
/// is marked recalc-pending so the next pass draws it.
pub fn push_window(container: &mut Window, mut win: Window) {
    if let Some(top) = container.children.last_mut() {
        top.set_visible(false);
    }
    win.actions |= WindowActions::RECALC;

    #[cfg(feature = "tracing")]
    tracing::trace!(depth = container.children.len() + 1, "message window pushed");

    container.add_child(win);
}

/// Remove the top window from the container stack.
///
/// Returns `None` when the stack holds at most one entry — the last window
/// is never popped. Otherwise the removed window is returned and the new
/// top is re-shown and marked recalc-pending.
pub fn pop_window(container: &mut Window) -> Option<Window> {
    if container.children.len() <= 1 {
        return None;
    }
    let win = container.children.pop()?;

    if let Some(top) = container.children.last_mut() {
        top.set_visible(true);
        top.actions |= WindowActions::RECALC;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(depth = container.children.len(), "message window popped");

    Some(win)
}
