#![forbid(unsafe_code)]

//! Logical colors for wintree.
//!
//! Widgets name colors by *role*, not by value: a cycling "quoted" group
//! index, the neutral text color, or the progress-bar color. A [`Palette`]
//! resolves those roles to concrete [`Attr`]s. Group indices are unbounded
//! on the widget side; the palette wraps them onto its fixed set of quoted
//! attributes, so any `i32` (negatives included) resolves to something
//! sensible.

use wintree_core::surface::{Attr, AttrFlags, Rgb};

const CYAN: Rgb = Rgb::new(0, 205, 205);
const YELLOW: Rgb = Rgb::new(205, 205, 0);
const GREEN: Rgb = Rgb::new(0, 205, 0);
const MAGENTA: Rgb = Rgb::new(205, 0, 205);
const BLUE: Rgb = Rgb::new(92, 92, 255);
const RED: Rgb = Rgb::new(205, 0, 0);
const WHITE: Rgb = Rgb::new(229, 229, 229);

/// Resolves logical color roles to concrete display attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    normal: Attr,
    progress: Option<Attr>,
    quoted: Vec<Attr>,
}

impl Default for Palette {
    /// The stock palette: six cycling quoted colors, a reverse-video
    /// progress bar, and a neutral normal attribute.
    fn default() -> Self {
        Self {
            normal: Attr::new(),
            progress: Some(Attr::new().fg(WHITE).bg(BLUE)),
            quoted: vec![
                Attr::new().fg(CYAN),
                Attr::new().fg(YELLOW),
                Attr::new().fg(GREEN),
                Attr::new().fg(MAGENTA),
                Attr::new().fg(BLUE).flags(AttrFlags::BOLD),
                Attr::new().fg(RED),
            ],
        }
    }
}

impl Palette {
    /// An empty palette: everything resolves to the neutral attribute and
    /// the progress bar is uncolored.
    pub fn plain() -> Self {
        Self {
            normal: Attr::new(),
            progress: None,
            quoted: Vec::new(),
        }
    }

    /// Replace the neutral attribute.
    #[must_use]
    pub fn with_normal(mut self, attr: Attr) -> Self {
        self.normal = attr;
        self
    }

    /// Set or clear the progress-bar attribute.
    #[must_use]
    pub fn with_progress(mut self, attr: Option<Attr>) -> Self {
        self.progress = attr;
        self
    }

    /// Replace the quoted-group cycle.
    #[must_use]
    pub fn with_quoted(mut self, quoted: Vec<Attr>) -> Self {
        self.quoted = quoted;
        self
    }

    /// Resolve a quoted group index to its attribute.
    ///
    /// The index wraps onto the quoted cycle (Euclidean modulo, so negative
    /// groups are valid). An empty cycle resolves to the neutral attribute.
    pub fn quoted(&self, group: i32) -> Attr {
        if self.quoted.is_empty() {
            return self.normal;
        }
        let idx = group.rem_euclid(self.quoted.len() as i32) as usize;
        self.quoted[idx]
    }

    /// Number of attributes in the quoted cycle.
    pub fn quoted_len(&self) -> usize {
        self.quoted.len()
    }

    /// The neutral text attribute.
    pub fn normal(&self) -> Attr {
        self.normal
    }

    /// The progress-bar attribute, if one is configured.
    pub fn progress(&self) -> Option<Attr> {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quoted_wraps_modulo_cycle_length() {
        let palette = Palette::default();
        let n = palette.quoted_len() as i32;
        assert!(n > 0);
        assert_eq!(palette.quoted(0), palette.quoted(n));
        assert_eq!(palette.quoted(1), palette.quoted(n + 1));
    }

    #[test]
    fn quoted_accepts_negative_groups() {
        let palette = Palette::default();
        let n = palette.quoted_len() as i32;
        assert_eq!(palette.quoted(-1), palette.quoted(n - 1));
        assert_eq!(palette.quoted(-n), palette.quoted(0));
    }

    #[test]
    fn empty_cycle_falls_back_to_normal() {
        let palette = Palette::plain();
        assert_eq!(palette.quoted(3), palette.normal());
        assert_eq!(palette.progress(), None);
    }

    #[test]
    fn builder_replaces_slots() {
        let red = Attr::new().fg(Rgb::new(255, 0, 0));
        let palette = Palette::plain()
            .with_normal(red)
            .with_progress(Some(red))
            .with_quoted(vec![red]);
        assert_eq!(palette.normal(), red);
        assert_eq!(palette.progress(), Some(red));
        assert_eq!(palette.quoted(17), red);
    }

    proptest! {
        #[test]
        fn quoted_total_over_i32(group in any::<i32>()) {
            let palette = Palette::default();
            let attr = palette.quoted(group);
            prop_assert!(palette.quoted(group) == attr);
        }

        #[test]
        fn quoted_is_periodic(group in -10_000i32..10_000) {
            let palette = Palette::default();
            let n = palette.quoted_len() as i32;
            prop_assert_eq!(palette.quoted(group), palette.quoted(group + n));
        }
    }
}
