//! Character-grid output targets.
//!
//! The view never talks to a terminal directly. It writes text through a
//! [`Surface`], which either records into memory ([`GridSurface`]) or into a
//! ratatui frame buffer ([`BufferSurface`]).

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn cursor_row(&self) -> usize;

    /// Writes `text` at the cursor and advances the cursor past it.
    fn write(&mut self, text: &str);

    /// Moves the cursor to column 0 of the next row.
    fn new_line(&mut self);

    /// Moves the cursor to `(col, row)` and writes `text` there.
    fn write_at(&mut self, col: usize, row: usize, text: &str);

    /// Explicit placement that never starts outside the grid and never runs
    /// past its right edge.
    fn put(&mut self, col: usize, row: usize, text: &str) {
        if col >= self.width() || row >= self.height() {
            return;
        }
        let room = self.width() - col;
        if text.chars().count() > room {
            let clipped: String = text.chars().take(room).collect();
            self.write_at(col, row, &clipped);
        } else {
            self.write_at(col, row, text);
        }
    }

    /// Writes a whole line at the cursor row, then starts a new one.
    fn put_line(&mut self, text: &str) {
        let row = self.cursor_row();
        self.put(0, row, text);
        self.new_line();
    }
}

/// One write issued against a [`GridSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub col: usize,
    pub row: usize,
    pub text: String,
}

/// In-memory surface that keeps the resulting grid and a log of writes.
#[derive(Debug, Clone)]
pub struct GridSurface {
    width: usize,
    height: usize,
    cells: Vec<Vec<char>>,
    cursor_col: usize,
    cursor_row: usize,
    writes: Vec<WriteRecord>,
}

impl GridSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width]; height],
            cursor_col: 0,
            cursor_row: 0,
            writes: Vec::new(),
        }
    }

    pub fn writes(&self) -> &[WriteRecord] {
        &self.writes
    }

    /// Row contents with trailing blanks removed. Out-of-range rows are empty.
    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    /// First row whose text contains `needle`.
    pub fn find_row(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.writes.clear();
    }
}

impl Surface for GridSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    fn write(&mut self, text: &str) {
        self.writes.push(WriteRecord {
            col: self.cursor_col,
            row: self.cursor_row,
            text: text.to_string(),
        });

        for ch in text.chars() {
            if self.cursor_row < self.height && self.cursor_col < self.width {
                self.cells[self.cursor_row][self.cursor_col] = ch;
            }
            self.cursor_col += 1;
        }
    }

    fn new_line(&mut self) {
        self.cursor_col = 0;
        self.cursor_row += 1;
    }

    fn write_at(&mut self, col: usize, row: usize, text: &str) {
        self.cursor_col = col;
        self.cursor_row = row;
        self.write(text);
    }
}

/// Surface backed by a region of a ratatui [`Buffer`].
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cursor_col: usize,
    cursor_row: usize,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        // Keep the area inside the buffer so writes never index out of it
        let area = area.intersection(buf.area);
        Self {
            buf,
            area,
            cursor_col: 0,
            cursor_row: 0,
        }
    }
}

impl Surface for BufferSurface<'_> {
    fn width(&self) -> usize {
        usize::from(self.area.width)
    }

    fn height(&self) -> usize {
        usize::from(self.area.height)
    }

    fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    fn write(&mut self, text: &str) {
        let len = text.chars().count();
        if self.cursor_row < self.height() && self.cursor_col < self.width() {
            let x = self.area.x + self.cursor_col as u16;
            let y = self.area.y + self.cursor_row as u16;
            let room = self.width() - self.cursor_col;
            self.buf.set_stringn(x, y, text, room, Style::default());
        }
        self.cursor_col += len;
    }

    fn new_line(&mut self) {
        self.cursor_col = 0;
        self.cursor_row += 1;
    }

    fn write_at(&mut self, col: usize, row: usize, text: &str) {
        self.cursor_col = col;
        self.cursor_row = row;
        self.write(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_clips_at_right_edge() {
        let mut surface = GridSurface::new(5, 2);
        surface.put(2, 1, "abcdef");
        assert_eq!(surface.row_text(1), "  abc");
        assert_eq!(surface.writes()[0].text, "abc");
    }

    #[test]
    fn put_outside_grid_is_dropped() {
        let mut surface = GridSurface::new(5, 2);
        surface.put(5, 0, "x");
        surface.put(0, 2, "x");
        assert!(surface.writes().is_empty());
    }

    #[test]
    fn put_line_advances_rows() {
        let mut surface = GridSurface::new(10, 3);
        surface.put_line("one");
        surface.put_line("two");
        assert_eq!(surface.cursor_row(), 2);
        assert_eq!(surface.lines(), vec!["one", "two", ""]);
    }

    #[test]
    fn buffer_surface_writes_into_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 4));
        {
            let mut surface = BufferSurface::new(&mut buf, Rect::new(2, 1, 6, 3));
            assert_eq!(surface.width(), 6);
            assert_eq!(surface.height(), 3);
            surface.put(0, 0, "hello world");
            surface.put(1, 2, "x");
        }
        assert_eq!(buf[(2, 1)].symbol(), "h");
        assert_eq!(buf[(7, 1)].symbol(), " ");
        assert_eq!(buf[(8, 1)].symbol(), " ");
        assert_eq!(buf[(3, 3)].symbol(), "x");
    }
}
