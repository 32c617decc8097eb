#![forbid(unsafe_code)]

//! Window panes for wintree.
//!
//! Each module pairs a [`wintree_core::Pane`] implementation with a factory
//! that returns a ready-to-use [`wintree_core::Window`].

pub mod container;
pub mod filler;
pub mod progress;

pub use container::{container_window, pop_window, push_window};
pub use filler::{Filler, MAX_LINE_LEN, filler_window};
pub use progress::{Progress, pretty_size, progress_update, progress_window};
