#![forbid(unsafe_code)]

//! Core: window tree nodes, the recalc/repaint lifecycle, and the display
//! surface boundary.
//!
//! A [`window::Window`] owns its geometry, a pending-action set, and at most
//! one [`window::Pane`] — the private, widget-specific state behind the
//! two-phase dispatch. Panes draw through the [`surface::Surface`] trait,
//! which the embedding application backs with a real terminal (see the
//! `crossterm` feature) or an offscreen [`surface::BufferSurface`].

pub mod surface;
pub mod window;

#[cfg(feature = "crossterm")]
pub mod term;

pub use surface::{Attr, AttrFlags, BufferSurface, Rgb, Surface};
pub use window::{
    Extent, Orientation, Pane, SizePolicy, SizeRequest, Window, WindowActions, WindowKind,
    WindowState,
};
