#![forbid(unsafe_code)]

//! Crossterm-backed terminal surface.
//!
//! Commands are queued on the wrapped writer; nothing reaches the terminal
//! until [`TerminalSurface::finish`] flushes. [`Surface`] methods are
//! infallible by contract, so the first I/O error is latched and every
//! later call becomes a no-op; `finish` reports it.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::surface::{Attr, AttrFlags, Rgb, Surface};

/// A [`Surface`] that queues crossterm commands on a writer.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    err: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    /// Wrap a writer (typically `io::stdout()`).
    pub fn new(out: W) -> Self {
        Self { out, err: None }
    }

    /// Flush queued commands and return the writer, or the first error that
    /// occurred while drawing.
    pub fn finish(mut self) -> io::Result<W> {
        match self.err.take() {
            Some(e) => Err(e),
            None => {
                self.out.flush()?;
                Ok(self.out)
            }
        }
    }

    fn run(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.err.is_none()
            && let Err(e) = f(&mut self.out)
        {
            self.err = Some(e);
        }
    }
}

const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn set_attr(&mut self, attr: Attr) {
        self.run(|out| {
            queue!(out, SetAttribute(Attribute::Reset))?;
            if let Some(fg) = attr.fg {
                queue!(out, SetForegroundColor(to_color(fg)))?;
            }
            if let Some(bg) = attr.bg {
                queue!(out, SetBackgroundColor(to_color(bg)))?;
            }
            for (flag, term) in [
                (AttrFlags::BOLD, Attribute::Bold),
                (AttrFlags::DIM, Attribute::Dim),
                (AttrFlags::ITALIC, Attribute::Italic),
                (AttrFlags::UNDERLINE, Attribute::Underlined),
                (AttrFlags::REVERSE, Attribute::Reverse),
            ] {
                if attr.flags.contains(flag) {
                    queue!(out, SetAttribute(term))?;
                }
            }
            Ok(())
        });
    }

    fn reset_attr(&mut self) {
        self.run(|out| queue!(out, ResetColor, SetAttribute(Attribute::Reset)));
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str) {
        self.run(|out| queue!(out, MoveTo(col, row), Print(text)));
    }
}
