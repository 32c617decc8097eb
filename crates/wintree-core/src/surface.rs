#![forbid(unsafe_code)]

//! Display surface boundary.
//!
//! Panes never talk to a terminal directly. They draw through [`Surface`]:
//! set an attribute, write strings at absolute cell positions, reset the
//! attribute. [`BufferSurface`] is the offscreen implementation used by
//! tests and composition; a crossterm-backed implementation lives behind the
//! `crossterm` feature.

use unicode_width::UnicodeWidthChar;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

bitflags::bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttrFlags: u8 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE   = 1 << 4;
    }
}

/// A concrete display attribute: optional foreground/background colors plus
/// attribute flags.
///
/// The default value is the terminal's neutral state. Surfaces must render
/// `Attr::default()` and a [`Surface::reset_attr`] call identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attr {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: AttrFlags,
}

impl Attr {
    /// The neutral attribute.
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: AttrFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[must_use]
    pub const fn flags(mut self, flags: AttrFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether this is the neutral attribute.
    pub const fn is_neutral(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.flags.is_empty()
    }
}

/// Where panes draw.
///
/// Coordinates are absolute screen cells, row first, 0-indexed. The active
/// attribute applies to every cell written until it is changed or reset.
/// Writes outside the surface are silently clipped.
pub trait Surface {
    /// Set the active draw attribute.
    fn set_attr(&mut self, attr: Attr);

    /// Restore the neutral attribute.
    fn reset_attr(&mut self);

    /// Write `text` starting at the given absolute cell.
    fn put_str(&mut self, row: u16, col: u16, text: &str);
}

/// One cell of a [`BufferSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub attr: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attr: Attr::default(),
        }
    }
}

/// An offscreen grid of cells.
///
/// Stores one `char` per cell. A multi-width character occupies its head
/// cell; the cells it spills into are blanked. Writes that would cross the
/// right edge stop at the first character that does not fully fit.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
    attr: Attr,
}

impl BufferSurface {
    /// Create a surface of the given size, filled with blank cells.
    pub fn new(rows: u16, cols: u16) -> Self {
        let size = rows as usize * cols as usize;
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); size],
            attr: Attr::default(),
        }
    }

    /// Surface height in cells.
    #[inline]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Surface width in cells.
    #[inline]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// The attribute currently in effect.
    #[inline]
    pub const fn current_attr(&self) -> Attr {
        self.attr
    }

    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// The cell at the given position, or `None` out of bounds.
    pub fn get(&self, row: u16, col: u16) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// The content of a row as a string, trailing blanks trimmed.
    pub fn row_string(&self, row: u16) -> String {
        let s: String = (0..self.cols)
            .filter_map(|col| self.get(row, col).map(|c| c.ch))
            .collect();
        s.trim_end().to_string()
    }
}

impl Surface for BufferSurface {
    fn set_attr(&mut self, attr: Attr) {
        self.attr = attr;
    }

    fn reset_attr(&mut self) {
        self.attr = Attr::default();
    }

    fn put_str(&mut self, row: u16, mut col: u16, text: &str) {
        if row >= self.rows {
            return;
        }
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > self.cols {
                break;
            }
            let Some(idx) = self.index(row, col) else {
                break;
            };
            self.cells[idx] = Cell { ch, attr: self.attr };
            for k in 1..w {
                if let Some(tail) = self.index(row, col + k) {
                    self.cells[tail] = Cell {
                        ch: ' ',
                        attr: self.attr,
                    };
                }
            }
            col += w;
        }
    }
}
