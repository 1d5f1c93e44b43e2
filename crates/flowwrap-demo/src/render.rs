#![forbid(unsafe_code)]

//! Plain-text canvas for drawing a placement.

use flowwrap_layout::{Rect, Size};
use unicode_width::UnicodeWidthChar;

/// Marks the second column of a wide character.
const CONTINUATION: char = '\0';

/// A grid of character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    rows: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            rows: vec![vec![' '; usize::from(size.width)]; usize::from(size.height)],
        }
    }

    /// Write `text` into the first row of `rect`, clipped to the rect and canvas.
    ///
    /// A wide character that would straddle the clip edge is dropped.
    pub fn put(&mut self, rect: Rect, text: &str) {
        let Some(row) = self.rows.get_mut(usize::from(rect.y)) else {
            return;
        };
        let right = rect.right().min(self.width);
        let mut x = rect.x;
        for ch in text.chars() {
            let w = u16::try_from(ch.width().unwrap_or(0)).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > right {
                break;
            }
            let col = usize::from(x);
            row[col] = ch;
            if w == 2 {
                row[col + 1] = CONTINUATION;
            }
            x += w;
        }
    }

    /// Draw a chip: its label in brackets, shortened to fit the rect.
    pub fn put_chip(&mut self, rect: Rect, label: &str) {
        if rect.width < 2 {
            self.put(rect, label);
            return;
        }
        self.put(rect, "[");
        let inner = Rect::new(rect.x + 1, rect.y, rect.width - 2, rect.height);
        self.put(inner, label);
        self.put(Rect::new(rect.right() - 1, rect.y, 1, rect.height), "]");
    }

    /// The canvas as lines, trailing blanks removed.
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&ch| ch != CONTINUATION).collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
