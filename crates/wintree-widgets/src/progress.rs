#![forbid(unsafe_code)]

//! Progress bar window.
//!
//! The pane keeps two copies of its position: the *update* side, written by
//! [`progress_update`] as the driven operation reports progress, and the
//! *display* side, which recalc copies over once the tree manager schedules
//! a pass. Updates are throttled by a position increment (`size_inc`,
//! shifted into KiB when tracking bytes) and a wall-clock increment
//! (`time_inc`, milliseconds), so a tight loop cannot flood the screen.

use std::any::Any;
use std::sync::Arc;

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;
use wintree_core::surface::Surface;
use wintree_core::window::{
    Extent, Orientation, Pane, SizePolicy, Window, WindowActions, WindowKind, WindowState,
};
use wintree_style::Palette;

/// Private state of a progress window.
#[derive(Debug, Clone)]
pub struct Progress {
    msg: String,
    /// Expected total (records or bytes). 0 means unknown; the caller then
    /// supplies explicit percentages.
    size: u64,
    size_inc: u64,
    /// Minimum milliseconds between accepted updates. 0 disables the check.
    time_inc: u64,
    is_bytes: bool,

    update_pos: u64,
    update_percent: i32,
    update_time: u64,

    display_pos: u64,
    display_percent: i32,
    display_time: u64,

    pretty_pos: String,
    pretty_size: String,

    palette: Arc<Palette>,
}

impl Progress {
    fn new(
        msg: &str,
        size: u64,
        size_inc: u64,
        time_inc: u64,
        is_bytes: bool,
        palette: Arc<Palette>,
    ) -> Self {
        let pretty_size = if is_bytes {
            pretty_size(size)
        } else {
            String::new()
        };
        Self {
            msg: msg.to_string(),
            size,
            size_inc,
            time_inc,
            is_bytes,
            update_pos: 0,
            update_percent: 0,
            update_time: 0,
            display_pos: 0,
            display_percent: 0,
            display_time: 0,
            pretty_pos: String::new(),
            pretty_size,
            palette,
        }
    }

    /// Position currently on screen.
    pub fn display_pos(&self) -> u64 {
        self.display_pos
    }

    /// Percentage currently on screen.
    pub fn display_percent(&self) -> i32 {
        self.display_percent
    }

    fn percent_needs_update(&self, percent: i32) -> bool {
        percent > self.display_percent
    }

    fn pos_needs_update(&self, pos: u64) -> bool {
        let shift = if self.is_bytes { 10 } else { 0 };
        pos >= self.display_pos + (self.size_inc << shift)
    }

    fn time_needs_update(&self, now: u64) -> bool {
        if self.time_inc == 0 || now < self.display_time {
            return true;
        }
        self.time_inc < now - self.display_time
    }
}

impl Pane for Progress {
    /// Publish the latest update: copy the update side to the display side
    /// and derive the percentage to show.
    fn recalc(&mut self, _state: &WindowState) -> WindowActions {
        self.display_pos = self.update_pos;
        self.display_time = self.update_time;

        if self.is_bytes {
            self.pretty_pos = pretty_size(self.display_pos);
        }

        self.display_percent = if self.update_percent < 0 {
            if self.size == 0 {
                0
            } else {
                (100 * self.display_pos / self.size) as i32
            }
        } else {
            self.update_percent
        };

        WindowActions::REPAINT
    }

    fn repaint(&mut self, state: &WindowState, surface: &mut dyn Surface) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "pane_repaint",
            pane = "Progress",
            pos = self.display_pos,
            percent = self.display_percent,
        )
        .entered();

        let text = if self.size == 0 {
            format!("{} {} ({}%)", self.msg, self.display_pos, self.display_percent)
        } else if self.is_bytes {
            format!(
                "{} {}/{} ({}%)",
                self.msg, self.pretty_pos, self.pretty_size, self.display_percent
            )
        } else {
            format!(
                "{} {}/{} ({}%)",
                self.msg, self.display_pos, self.size, self.display_percent
            )
        };
        message_bar(state, surface, &self.palette, self.display_percent, &text);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Byte offset where `text` reaches `width` display cells, with the width
/// actually consumed (may stop short of a wide character).
fn width_trunc(text: &str, width: usize) -> (usize, usize) {
    let mut used = 0usize;
    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            return (i, used);
        }
        used += w;
    }
    (text.len(), used)
}

/// Draw one row: `text` over a colored bar spanning `percent` of the width.
///
/// When the palette has no progress attribute the text is written plainly.
/// Either way the rest of the row is cleared and the surface's attribute is
/// left neutral.
fn message_bar(
    state: &WindowState,
    surface: &mut dyn Surface,
    palette: &Palette,
    percent: i32,
    text: &str,
) {
    if state.rows == 0 || state.cols == 0 {
        return;
    }
    let cols = state.cols as usize;
    let bar = percent.clamp(0, 100) as usize * cols / 100;
    let text_width = text.width();

    match palette.progress() {
        Some(attr) if text_width < bar => {
            // The text fits inside the bar: pad the bar out with spaces.
            surface.set_attr(attr);
            state.write_str(surface, 0, 0, text);
            let pad: String = " ".repeat(bar - text_width);
            state.write_str(surface, 0, text_width as u16, &pad);
            surface.reset_attr();
            clear_to_eol(state, surface, bar);
        }
        Some(attr) => {
            // The text is longer than the bar: split it at the bar edge.
            let (off, head_width) = width_trunc(text, bar);
            surface.set_attr(attr);
            state.write_str(surface, 0, 0, &text[..off]);
            surface.reset_attr();
            state.write_str(surface, 0, head_width as u16, &text[off..]);
            clear_to_eol(state, surface, text_width.min(cols));
        }
        None => {
            state.write_str(surface, 0, 0, text);
            clear_to_eol(state, surface, text_width.min(cols));
        }
    }
}

fn clear_to_eol(state: &WindowState, surface: &mut dyn Surface, from: usize) {
    let cols = state.cols as usize;
    if from < cols {
        let blanks: String = " ".repeat(cols - from);
        state.write_str(surface, 0, from as u16, &blanks);
    }
}

/// Format a byte count the way humans read it ("3.4K", "128M").
pub fn pretty_size(n: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    const GIB: u64 = 1024 * 1024 * 1024;
    if n < KIB {
        format!("{n}")
    } else if n < 10 * KIB {
        format!("{:.1}K", n as f64 / KIB as f64)
    } else if n < MIB {
        format!("{}K", n / KIB)
    } else if n < 10 * MIB {
        format!("{:.1}M", n as f64 / MIB as f64)
    } else if n < GIB {
        format!("{}M", n / MIB)
    } else {
        format!("{:.1}G", n as f64 / GIB as f64)
    }
}

/// Create a progress window.
///
/// Returns `None` when `size_inc` is zero — the caller has disabled the
/// progress bar and should fall back to a plain message. The window comes
/// back recalc-pending so the first pass shows the initial state.
///
/// `size` is the expected total (records, or bytes when `is_bytes`);
/// `time_inc` is the minimum number of milliseconds between accepted
/// updates.
pub fn progress_window(
    msg: &str,
    size: u64,
    size_inc: u64,
    time_inc: u64,
    is_bytes: bool,
    palette: Arc<Palette>,
) -> Option<Window> {
    if size_inc == 0 {
        return None;
    }

    let mut win = Window::new(
        WindowKind::StatusBar,
        Orientation::Vertical,
        SizePolicy::Fixed,
        Extent::Unlimited,
        Extent::Fixed(1),
    );
    win.actions |= WindowActions::RECALC;
    win.set_pane(Box::new(Progress::new(
        msg, size, size_inc, time_inc, is_bytes, palette,
    )));
    Some(win)
}

/// Report progress to a window created by [`progress_window`].
///
/// `percent < 0` means "derive the percentage from `pos` and the size".
/// `now_ms` is the caller's monotonic clock in milliseconds. Returns `true`
/// when the update was accepted and a screen update is needed (the window
/// is then recalc-pending); throttled or misdirected updates return
/// `false`.
pub fn progress_update(win: &mut Window, pos: u64, percent: i32, now_ms: u64) -> bool {
    let Some(p) = win.pane_mut::<Progress>() else {
        return false;
    };

    let accept = if p.size == 0 {
        p.percent_needs_update(percent)
    } else {
        p.pos_needs_update(pos)
    };
    if !accept || !p.time_needs_update(now_ms) {
        return false;
    }

    p.update_pos = pos;
    p.update_percent = percent;
    p.update_time = now_ms;
    win.actions |= WindowActions::RECALC;
    true
}
