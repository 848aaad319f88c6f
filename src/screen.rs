//! Drawing surface the terminal renders onto.
//!
//! The host owns the real screen; the core only calls through [`Screen`].
//! Calls are synchronous and always succeed.  [`TextScreen`] is an in‑memory
//! character grid implementation used by the CLI and the tests.

use log::debug;

/// Rendering collaborator.  Columns and rows are fixed‑width cells; colours
/// are palette indices.
pub trait Screen {
    /// Draw `text` starting at (`col`, `row`).  Off‑screen cells are clipped.
    fn draw_text(&mut self, text: &str, color: u8, col: i32, row: i32);

    /// Blank the whole screen.
    fn clear(&mut self);

    /// Draw a bordered box whose top‑left corner is (`col`, `row`).
    fn draw_box(&mut self, color: u8, col: i32, row: i32, width: i32, height: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: u8,
}

const BLANK: Cell = Cell { ch: ' ', color: 0 };

/// A `width` × `height` grid of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct TextScreen {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TextScreen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Row contents with trailing blanks removed.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }

        let start: usize = row * self.width;
        let text: String = self.cells[start..start + self.width]
            .iter()
            .map(|c| c.ch)
            .collect();

        text.trim_end().to_string()
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    fn put(&mut self, ch: char, color: u8, col: i32, row: i32) {
        let (Ok(c), Ok(r)) = (usize::try_from(col), usize::try_from(row)) else {
            return;
        };

        if c < self.width && r < self.height {
            self.cells[r * self.width + c] = Cell { ch, color };
        }
    }
}

impl Screen for TextScreen {
    fn draw_text(&mut self, text: &str, color: u8, col: i32, row: i32) {
        for (i, ch) in text.chars().enumerate() {
            let offset: i32 = i32::try_from(i).unwrap_or(i32::MAX);
            self.put(ch, color, col.saturating_add(offset), row);
        }
    }

    fn clear(&mut self) {
        debug!("Clearing {}x{} text screen", self.width, self.height);

        self.cells.fill(BLANK);
    }

    fn draw_box(&mut self, color: u8, col: i32, row: i32, width: i32, height: i32) {
        if width < 2 || height < 2 {
            return;
        }

        let (right, bottom) = (col + width - 1, row + height - 1);

        for c in col + 1..right {
            self.put('─', color, c, row);
            self.put('─', color, c, bottom);
        }

        for r in row + 1..bottom {
            self.put('│', color, col, r);
            self.put('│', color, right, r);
        }

        self.put('┌', color, col, row);
        self.put('┐', color, right, row);
        self.put('└', color, col, bottom);
        self.put('┘', color, right, bottom);
    }
}
