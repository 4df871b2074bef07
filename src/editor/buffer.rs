use super::cursor::Position;

/// Line-array text storage. Rows and columns are character offsets; byte
/// offsets are derived internally when splicing UTF-8 content.
///
/// The buffer is never empty: any delete that would drop the last line
/// re-seeds it with one empty line. Mutators clamp their positions, so every
/// operation is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::default()
        } else {
            Self { lines }
        }
    }

    /// Split on `\n`, so a trailing newline produces a trailing empty line.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(String::from).collect())
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    /// Length of the line in characters, not bytes.
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole contents, e.g. from a history snapshot.
    pub fn restore(&mut self, lines: &[String]) {
        self.lines = lines.to_vec();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    fn clamp_row(&self, row: usize) -> usize {
        row.min(self.lines.len() - 1)
    }

    /// Insert `text` at `pos`, splitting it on newlines. Returns the cursor
    /// position just past the inserted content.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        let row = self.clamp_row(pos.row);
        let col = pos.col.min(self.line_len(row));
        let at = byte_index(&self.lines[row], col);
        let segments: Vec<&str> = text.split('\n').collect();

        if segments.len() == 1 {
            self.lines[row].insert_str(at, text);
            return Position::new(row, col + text.chars().count());
        }

        let tail = self.lines[row].split_off(at);
        self.lines[row].push_str(segments[0]);
        for (i, segment) in segments[1..segments.len() - 1].iter().enumerate() {
            self.lines.insert(row + 1 + i, (*segment).to_string());
        }
        let last = segments[segments.len() - 1];
        self.lines.insert(row + segments.len() - 1, format!("{last}{tail}"));
        Position::new(row + segments.len() - 1, last.chars().count())
    }

    /// Delete the span `[start, end)`. The range must already be normalized
    /// (start before-or-equal end in row-major order). Returns the cursor
    /// position after the deletion.
    pub fn delete(&mut self, start: Position, end: Position) -> Position {
        let start_row = self.clamp_row(start.row);
        let end_row = self.clamp_row(end.row);
        let start_col = start.col.min(self.line_len(start_row));
        let end_col = end.col.min(self.line_len(end_row));

        if start_row == end_row {
            let from = byte_index(&self.lines[start_row], start_col);
            let to = byte_index(&self.lines[start_row], end_col);
            self.lines[start_row].replace_range(from..to, "");
        } else {
            let from = byte_index(&self.lines[start_row], start_col);
            let to = byte_index(&self.lines[end_row], end_col);
            let tail = self.lines[end_row][to..].to_string();
            self.lines[start_row].truncate(from);
            self.lines[start_row].push_str(&tail);
            self.lines.drain(start_row + 1..=end_row);
        }

        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        Position::new(start_row, start_col)
    }

    /// Remove one character before `pos`, joining onto the previous line at
    /// column 0. No-op at the start of the document.
    pub fn backspace(&mut self, pos: Position) -> Position {
        let row = self.clamp_row(pos.row);
        let col = pos.col.min(self.line_len(row));

        if col > 0 {
            let from = byte_index(&self.lines[row], col - 1);
            let to = byte_index(&self.lines[row], col);
            self.lines[row].replace_range(from..to, "");
            Position::new(row, col - 1)
        } else if row > 0 {
            let removed = self.lines.remove(row);
            let new_col = self.line_len(row - 1);
            self.lines[row - 1].push_str(&removed);
            Position::new(row - 1, new_col)
        } else {
            Position::new(row, col)
        }
    }

    /// Remove one character after `pos`, joining the next line upward at the
    /// end of the line. The cursor stays put. No-op at the end of the
    /// document.
    pub fn delete_forward(&mut self, pos: Position) -> Position {
        let row = self.clamp_row(pos.row);
        let col = pos.col.min(self.line_len(row));

        if col < self.line_len(row) {
            let from = byte_index(&self.lines[row], col);
            let to = byte_index(&self.lines[row], col + 1);
            self.lines[row].replace_range(from..to, "");
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
        Position::new(row, col)
    }

    /// Text covered by the normalized span `[start, end)`, with interior
    /// line breaks rendered as `\n`.
    pub fn slice(&self, start: Position, end: Position) -> String {
        if start.row == end.row {
            let line = self.line(start.row);
            let from = byte_index(line, start.col);
            let to = byte_index(line, end.col);
            return line[from..to].to_string();
        }

        let mut parts = Vec::with_capacity(end.row - start.row + 1);
        let first = self.line(start.row);
        parts.push(&first[byte_index(first, start.col)..]);
        for row in start.row + 1..end.row {
            parts.push(self.line(row));
        }
        let last = self.line(end.row);
        parts.push(&last[..byte_index(last, end.col)]);
        parts.join("\n")
    }

    /// Remove a whole line, or clear it when it is the only one. Returns the
    /// removed content.
    pub fn remove_line(&mut self, row: usize) -> String {
        let row = self.clamp_row(row);
        if self.lines.len() > 1 {
            self.lines.remove(row)
        } else {
            std::mem::take(&mut self.lines[0])
        }
    }
}

/// Character offset to byte offset within `line`, clamped to the line end.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(index, _)| index)
}
