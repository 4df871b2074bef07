use super::buffer::TextBuffer;
use super::wrap::{LineMetrics, PreferredTarget};

/// Character coordinate into the line buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cursor over a [`TextBuffer`]. Horizontal moves refresh the preferred
/// target; vertical and page moves consume it so that repeated up/down stays
/// visually straight. All motion clamps into the buffer, so the cursor is the
/// sanctioned producer of valid positions.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pos: Position,
    preferred: PreferredTarget,
}

impl Cursor {
    pub fn new(metrics: &dyn LineMetrics) -> Self {
        Self {
            pos: Position::default(),
            preferred: metrics.target_at("", 0),
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn preferred(&self) -> PreferredTarget {
        self.preferred
    }

    fn refresh_target(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        self.preferred = metrics.target_at(buffer.line(self.pos.row), self.pos.col);
    }

    /// Absolute jump, clamped into the buffer.
    pub fn move_to(&mut self, pos: Position, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        let row = pos.row.min(buffer.line_count() - 1);
        let col = pos.col.min(buffer.line_len(row));
        self.pos = Position::new(row, col);
        self.refresh_target(buffer, metrics);
    }

    pub fn move_left(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        if self.pos.col > 0 {
            self.pos.col -= 1;
        } else if self.pos.row > 0 {
            self.pos.row -= 1;
            self.pos.col = buffer.line_len(self.pos.row);
        }
        self.refresh_target(buffer, metrics);
    }

    pub fn move_right(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        if self.pos.col < buffer.line_len(self.pos.row) {
            self.pos.col += 1;
        } else if self.pos.row + 1 < buffer.line_count() {
            self.pos.row += 1;
            self.pos.col = 0;
        }
        self.refresh_target(buffer, metrics);
    }

    pub fn move_up(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        let (pos, reset) = metrics.move_up(buffer, self.pos, self.preferred);
        self.pos = pos;
        if let Some(target) = reset {
            self.preferred = target;
        }
    }

    pub fn move_down(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        let (pos, reset) = metrics.move_down(buffer, self.pos, self.preferred);
        self.pos = pos;
        if let Some(target) = reset {
            self.preferred = target;
        }
    }

    /// Home. With `whole_document`, jump to the document start; otherwise
    /// the metrics strategy picks the visual-row or line boundary.
    pub fn move_home(
        &mut self,
        buffer: &TextBuffer,
        metrics: &dyn LineMetrics,
        whole_document: bool,
    ) {
        if whole_document {
            self.pos = Position::new(0, 0);
        } else {
            self.pos.col = metrics.home_col(buffer.line(self.pos.row), self.pos.col);
        }
        self.refresh_target(buffer, metrics);
    }

    pub fn move_end(
        &mut self,
        buffer: &TextBuffer,
        metrics: &dyn LineMetrics,
        whole_document: bool,
    ) {
        if whole_document {
            self.pos.row = buffer.line_count() - 1;
            self.pos.col = buffer.line_len(self.pos.row);
        } else {
            self.pos.col = metrics.end_col(buffer.line(self.pos.row), self.pos.col);
        }
        self.refresh_target(buffer, metrics);
    }

    /// Shift the row by `page` lines and re-resolve the column from the
    /// preferred target, which is left untouched.
    pub fn page_up(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics, page: usize) {
        self.pos.row = self.pos.row.saturating_sub(page);
        self.pos.col = metrics.resolve_target(buffer.line(self.pos.row), self.preferred);
    }

    pub fn page_down(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics, page: usize) {
        self.pos.row = (self.pos.row + page).min(buffer.line_count() - 1);
        self.pos.col = metrics.resolve_target(buffer.line(self.pos.row), self.preferred);
    }

    pub fn move_word_left(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        let mut row = self.pos.row;
        let mut col = self.pos.col;
        if col == 0 {
            if row == 0 {
                return;
            }
            row -= 1;
            col = buffer.line_len(row);
        }
        self.pos = Position::new(row, word_boundary_left(buffer.line(row), col));
        self.refresh_target(buffer, metrics);
    }

    pub fn move_word_right(&mut self, buffer: &TextBuffer, metrics: &dyn LineMetrics) {
        let mut row = self.pos.row;
        let mut col = self.pos.col;
        if col == buffer.line_len(row) {
            if row + 1 >= buffer.line_count() {
                return;
            }
            row += 1;
            col = 0;
        }
        self.pos = Position::new(row, word_boundary_right(buffer.line(row), col));
        self.refresh_target(buffer, metrics);
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Boundary reached by skipping a run of non-word characters and then a run
/// of word characters, leftward from `col`.
pub fn word_boundary_left(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = col.min(chars.len());

    while pos > 0 && !is_word_char(chars[pos - 1]) {
        pos -= 1;
    }
    while pos > 0 && is_word_char(chars[pos - 1]) {
        pos -= 1;
    }
    pos
}

/// Mirror of [`word_boundary_left`], rightward from `col`.
pub fn word_boundary_right(line: &str, col: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut pos = col.min(len);

    while pos < len && !is_word_char(chars[pos]) {
        pos += 1;
    }
    while pos < len && is_word_char(chars[pos]) {
        pos += 1;
    }
    pos
}
