#![forbid(unsafe_code)]

//! Public facade for wintree.
//!
//! Re-exports the window tree core, the palette, and the bundled panes.
//! Most applications only need the [`prelude`].

pub use wintree_core as core;
pub use wintree_style as style;
pub use wintree_widgets as widgets;

/// The types most applications use.
pub mod prelude {
    pub use wintree_core::surface::{Attr, AttrFlags, BufferSurface, Rgb, Surface};
    pub use wintree_core::window::{
        Extent, Orientation, Pane, SizePolicy, Window, WindowActions, WindowKind, WindowState,
    };
    pub use wintree_style::Palette;
    pub use wintree_widgets::container::{container_window, pop_window, push_window};
    pub use wintree_widgets::filler::filler_window;
    pub use wintree_widgets::progress::{progress_update, progress_window};
}
