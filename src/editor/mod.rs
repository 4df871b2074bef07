mod buffer;
mod cursor;
mod history;
mod input;
mod selection;
mod wrap;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};
pub use history::{History, Snapshot};
pub use input::{shifted_char, Key};
pub use selection::{Range, Selection};
pub use wrap::{CharacterMetrics, LineMetrics, PixelMetrics, PreferredTarget};

use crate::config::{EditorConfig, WrapMode};

/// One renderable row of the viewport: a slice of a logical line, described
/// by character offsets. This is the only data handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFragment {
    pub logical_row: usize,
    pub display_row: usize,
    /// Char offset of the first visible character.
    pub start: usize,
    /// Char offset one past the last visible character.
    pub end: usize,
}

/// The editing engine. Consumes keystroke identifiers from a virtual
/// keyboard (no release events, so modifiers latch) and produces
/// [`LineFragment`] descriptors for an external renderer.
///
/// One keystroke is fully processed (selection handling, buffer mutation,
/// cursor update, history snapshot, viewport update) before the next is
/// accepted.
pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    selection: Selection,
    history: History,
    metrics: Box<dyn LineMetrics>,
    insert_mode: bool,
    control: bool,
    shift: bool,
    caps_lock: bool,
    clipboard: String,
    max_lines: usize,
    max_columns: usize,
    page_size: usize,
    scroll_offset: usize,
    h_scroll_offset: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_text(config, "")
    }

    pub fn with_text(config: EditorConfig, text: &str) -> Self {
        let metrics: Box<dyn LineMetrics> = match config.wrap {
            WrapMode::Character => Box::new(CharacterMetrics::new(config.max_columns)),
            WrapMode::Pixel => Box::new(PixelMetrics::new(config.base_char_width)),
        };
        let buffer = TextBuffer::from_text(text);
        let cursor = Cursor::new(&*metrics);
        let history = History::new(buffer.lines(), cursor.pos(), config.max_history);
        Self {
            buffer,
            cursor,
            selection: Selection::new(),
            history,
            metrics,
            insert_mode: true,
            control: false,
            shift: false,
            caps_lock: false,
            clipboard: String::new(),
            max_lines: config.max_lines.max(1),
            max_columns: config.max_columns.max(1),
            page_size: config.page_size.max(1),
            scroll_offset: 0,
            h_scroll_offset: 0,
        }
    }

    /// Process one keystroke. `key` is either a single printable character
    /// or a named key identifier; anything else is ignored.
    pub fn press_key(&mut self, key: &str) {
        match Key::parse(key) {
            Some(Key::Enter) => self.key_enter(),
            Some(Key::Tab) => self.key_tab(),
            Some(Key::Backspace) => self.key_backspace(),
            Some(Key::Delete) => self.key_delete(),
            Some(Key::Insert) => self.insert_mode = !self.insert_mode,
            Some(Key::Home) => self.key_home(),
            Some(Key::End) => self.key_end(),
            Some(Key::ArrowLeft) => self.key_arrow_left(),
            Some(Key::ArrowRight) => self.key_arrow_right(),
            Some(Key::ArrowUp) => self.key_arrow_up(),
            Some(Key::ArrowDown) => self.key_arrow_down(),
            Some(Key::PageUp) => self.key_page_up(),
            Some(Key::PageDown) => self.key_page_down(),
            Some(Key::Control) => self.control = !self.control,
            Some(Key::Shift) => self.key_shift(),
            Some(Key::CapsLock) => self.caps_lock = !self.caps_lock,
            Some(Key::Char(c)) => {
                self.key_char(c);
                self.control = false;
            }
            None => log::trace!("ignored key {key:?}"),
        }
    }

    // ==================== Key handlers ====================

    fn key_char(&mut self, c: char) {
        if self.control {
            match c {
                'a' => self.select_all(),
                'c' => self.copy(),
                'x' => self.cut(),
                'v' => self.paste(),
                'z' => self.undo(),
                'y' => self.redo(),
                _ => self.default_input(c),
            }
        } else {
            self.default_input(c);
        }
    }

    fn default_input(&mut self, c: char) {
        let mut c = c;
        if c.is_ascii_alphabetic() {
            // Control chords over unbound letters insert nothing.
            if self.control {
                return;
            }
            c = if self.shift && self.caps_lock {
                c.to_ascii_lowercase()
            } else if self.shift || self.caps_lock {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
        } else if self.shift {
            c = shifted_char(c);
        }
        self.handle_input(&c.to_string());
    }

    /// Commit `text` at the cursor: replace the selection if one exists,
    /// overwrite forward in non-insert mode, snapshot, reposition.
    fn handle_input(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if let Some(range) = self.selection.normalized() {
            self.buffer.delete(range.start, range.end);
            self.cursor.move_to(range.start, &self.buffer, &*self.metrics);
            self.selection.clear();
        }

        let pos = self.cursor.pos();
        let new_pos = if self.insert_mode || text == "\n" {
            self.buffer.insert(pos, text)
        } else {
            // Overwrite consumes characters ahead of the cursor on the
            // current line only, never crossing to the next line.
            let line_len = self.buffer.line_len(pos.row);
            let overwrite = text.chars().count().min(line_len.saturating_sub(pos.col));
            if overwrite > 0 {
                self.buffer
                    .delete(pos, Position::new(pos.row, pos.col + overwrite));
            }
            self.buffer.insert(pos, text)
        };
        self.cursor.move_to(new_pos, &self.buffer, &*self.metrics);
        self.history.save_state(self.buffer.lines(), self.cursor.pos());
        self.ensure_cursor_visible();
        self.shift = false;
    }

    fn key_enter(&mut self) {
        if self.control {
            // Open a new line below the current one, regardless of column.
            let row = self.cursor.pos().row;
            let end = Position::new(row, self.buffer.line_len(row));
            let new_pos = self.buffer.insert(end, "\n");
            self.cursor
                .move_to(Position::new(new_pos.row, 0), &self.buffer, &*self.metrics);
            self.history.save_state(self.buffer.lines(), self.cursor.pos());
            self.ensure_cursor_visible();
        } else {
            self.handle_input("\n");
        }
        self.control = false;
        self.shift = false;
    }

    fn key_tab(&mut self) {
        self.handle_input("    ");
        self.control = false;
        self.shift = false;
    }

    fn key_backspace(&mut self) {
        let range = self.selection.normalized();
        if self.control && range.is_none() {
            // Delete the word to the left of the cursor.
            let original = self.cursor.pos();
            self.cursor.move_word_left(&self.buffer, &*self.metrics);
            let word_start = self.cursor.pos();
            self.buffer.delete(word_start, original);
            self.cursor.move_to(word_start, &self.buffer, &*self.metrics);
        } else if let Some(range) = range {
            self.buffer.delete(range.start, range.end);
            self.cursor.move_to(range.start, &self.buffer, &*self.metrics);
            self.selection.clear();
        } else {
            let new_pos = self.buffer.backspace(self.cursor.pos());
            self.cursor.move_to(new_pos, &self.buffer, &*self.metrics);
        }
        self.history.save_state(self.buffer.lines(), self.cursor.pos());
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    fn key_delete(&mut self) {
        if let Some(range) = self.selection.normalized() {
            self.buffer.delete(range.start, range.end);
            self.cursor.move_to(range.start, &self.buffer, &*self.metrics);
            self.selection.clear();
        } else {
            let new_pos = self.buffer.delete_forward(self.cursor.pos());
            self.cursor.move_to(new_pos, &self.buffer, &*self.metrics);
        }
        self.history.save_state(self.buffer.lines(), self.cursor.pos());
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    fn key_home(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.move_home(&self.buffer, &*self.metrics, self.control);
            self.selection.update(self.cursor.pos());
        } else {
            self.cursor.move_home(&self.buffer, &*self.metrics, self.control);
            self.selection.clear();
        }
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    fn key_end(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.move_end(&self.buffer, &*self.metrics, self.control);
            self.selection.update(self.cursor.pos());
        } else {
            self.cursor.move_end(&self.buffer, &*self.metrics, self.control);
            self.selection.clear();
        }
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    // Shift stays latched across arrow navigation so a tap-only keyboard
    // can grow a selection over several presses; control likewise persists
    // through horizontal word-hops.

    fn key_arrow_left(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            if self.control {
                self.cursor.move_word_left(&self.buffer, &*self.metrics);
            } else {
                self.cursor.move_left(&self.buffer, &*self.metrics);
            }
            self.selection.update(self.cursor.pos());
        } else if let Some(range) = self.selection.normalized() {
            // A plain arrow collapses the selection onto its near edge.
            self.cursor.move_to(range.start, &self.buffer, &*self.metrics);
            self.selection.clear();
        } else if self.control {
            self.cursor.move_word_left(&self.buffer, &*self.metrics);
        } else {
            self.cursor.move_left(&self.buffer, &*self.metrics);
        }
        self.ensure_cursor_visible();
    }

    fn key_arrow_right(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            if self.control {
                self.cursor.move_word_right(&self.buffer, &*self.metrics);
            } else {
                self.cursor.move_right(&self.buffer, &*self.metrics);
            }
            self.selection.update(self.cursor.pos());
        } else if let Some(range) = self.selection.normalized() {
            self.cursor.move_to(range.end, &self.buffer, &*self.metrics);
            self.selection.clear();
        } else if self.control {
            self.cursor.move_word_right(&self.buffer, &*self.metrics);
        } else {
            self.cursor.move_right(&self.buffer, &*self.metrics);
        }
        self.ensure_cursor_visible();
    }

    fn key_arrow_up(&mut self) {
        if self.control {
            // Scroll the viewport one visual row without moving the cursor.
            self.scroll_offset = self.scroll_offset.saturating_sub(1);
        } else if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.move_up(&self.buffer, &*self.metrics);
            self.selection.update(self.cursor.pos());
            self.ensure_cursor_visible();
        } else {
            self.cursor.move_up(&self.buffer, &*self.metrics);
            self.selection.clear();
            self.ensure_cursor_visible();
        }
        self.control = false;
    }

    fn key_arrow_down(&mut self) {
        if self.control {
            let max_scroll = self.total_visual_rows().saturating_sub(self.max_lines);
            self.scroll_offset = (self.scroll_offset + 1).min(max_scroll);
        } else if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.move_down(&self.buffer, &*self.metrics);
            self.selection.update(self.cursor.pos());
            self.ensure_cursor_visible();
        } else {
            self.cursor.move_down(&self.buffer, &*self.metrics);
            self.selection.clear();
            self.ensure_cursor_visible();
        }
        self.control = false;
    }

    fn key_page_up(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.page_up(&self.buffer, &*self.metrics, self.page_size);
            self.selection.update(self.cursor.pos());
        } else {
            self.cursor.page_up(&self.buffer, &*self.metrics, self.page_size);
            self.selection.clear();
        }
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    fn key_page_down(&mut self) {
        if self.shift {
            if !self.selection.is_active() {
                self.selection.start(self.cursor.pos());
            }
            self.cursor.page_down(&self.buffer, &*self.metrics, self.page_size);
            self.selection.update(self.cursor.pos());
        } else {
            self.cursor.page_down(&self.buffer, &*self.metrics, self.page_size);
            self.selection.clear();
        }
        self.ensure_cursor_visible();
        self.control = false;
        self.shift = false;
    }

    fn key_shift(&mut self) {
        self.shift = !self.shift;
        // Toggling shift off abandons a selection that never grew.
        if !self.shift {
            if let Some(range) = self.selection.normalized() {
                if range.is_empty() {
                    self.selection.clear();
                }
            }
        }
    }

    // ==================== Clipboard and history ====================

    fn select_all(&mut self) {
        self.selection.clear();
        self.cursor.move_to(Position::new(0, 0), &self.buffer, &*self.metrics);
        self.selection.start(self.cursor.pos());
        let last = self.buffer.line_count() - 1;
        self.cursor.move_to(
            Position::new(last, self.buffer.line_len(last)),
            &self.buffer,
            &*self.metrics,
        );
        self.selection.update(self.cursor.pos());
        self.ensure_cursor_visible();
    }

    fn copy(&mut self) {
        let text = match self.selection.normalized() {
            Some(range) => self.buffer.slice(range.start, range.end),
            // No selection: copy the whole current line.
            None => self.buffer.line(self.cursor.pos().row).to_string(),
        };
        self.clipboard = text.clone();
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            let _ = clipboard.set_text(&text);
        }
    }

    fn cut(&mut self) {
        if let Some(range) = self.selection.normalized() {
            self.clipboard = self.buffer.slice(range.start, range.end);
            self.buffer.delete(range.start, range.end);
            self.cursor.move_to(range.start, &self.buffer, &*self.metrics);
            self.selection.clear();
        } else {
            // No selection: cut the whole current line.
            let row = self.cursor.pos().row;
            self.clipboard = self.buffer.remove_line(row);
            let row = row.min(self.buffer.line_count() - 1);
            self.cursor.move_to(Position::new(row, 0), &self.buffer, &*self.metrics);
        }
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            let _ = clipboard.set_text(&self.clipboard);
        }
        self.history.save_state(self.buffer.lines(), self.cursor.pos());
        self.ensure_cursor_visible();
    }

    fn paste(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let text = self.clipboard.clone();
        self.handle_input(&text);
    }

    fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.buffer.restore(&snapshot.lines);
            self.cursor.move_to(snapshot.pos, &self.buffer, &*self.metrics);
            self.selection.clear();
            self.ensure_cursor_visible();
        }
    }

    fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.buffer.restore(&snapshot.lines);
            self.cursor.move_to(snapshot.pos, &self.buffer, &*self.metrics);
            self.selection.clear();
            self.ensure_cursor_visible();
        }
    }

    // ==================== Viewport ====================

    fn total_visual_rows(&self) -> usize {
        self.buffer
            .lines()
            .iter()
            .map(|line| self.metrics.visual_rows(line))
            .sum()
    }

    /// Visual row of the cursor, counting the wrapped rows of every line
    /// above it.
    fn cursor_visual_row(&self) -> usize {
        let pos = self.cursor.pos();
        let mut row = 0;
        for line in &self.buffer.lines()[..pos.row] {
            row += self.metrics.visual_rows(line);
        }
        row + self.metrics.visual_row_of(self.buffer.line(pos.row), pos.col)
    }

    fn ensure_cursor_visible(&mut self) {
        let cursor_row = self.cursor_visual_row();
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        }
        if cursor_row >= self.scroll_offset + self.max_lines {
            self.scroll_offset = cursor_row - self.max_lines + 1;
        }
        if !self.metrics.wraps() {
            self.scroll_horizontally_to_cursor();
        }
    }

    fn scroll_horizontally_to_cursor(&mut self) {
        let pos = self.cursor.pos();
        let line = self.buffer.line(pos.row);
        let cursor_x = self.metrics.width_to(line, pos.col);
        let window = self.max_columns * self.metrics.cell_width();
        let scroll_x = self.metrics.width_to(line, self.h_scroll_offset);

        if cursor_x < scroll_x {
            self.h_scroll_offset = self.metrics.col_at_width(line, cursor_x);
        } else if cursor_x >= scroll_x + window {
            // Keep a two-cell margin when scrolling right.
            let margin = 2 * self.metrics.cell_width();
            let target = (cursor_x + margin).saturating_sub(window);
            self.h_scroll_offset = self.metrics.col_at_width(line, target);
        }
    }

    /// Fragment descriptors for the visible window, one per visual row.
    pub fn visible_lines(&self) -> Vec<LineFragment> {
        let window_end = self.scroll_offset + self.max_lines;
        let mut fragments = Vec::new();
        let mut visual_row = 0;

        for (logical_row, line) in self.buffer.lines().iter().enumerate() {
            if visual_row >= window_end {
                break;
            }
            for vr in 0..self.metrics.visual_rows(line) {
                if visual_row >= self.scroll_offset && visual_row < window_end {
                    let (start, end) = if self.metrics.wraps() {
                        self.metrics.visual_row_bounds(line, vr)
                    } else {
                        let len = line.chars().count();
                        (
                            self.h_scroll_offset.min(len),
                            (self.h_scroll_offset + self.max_columns).min(len),
                        )
                    };
                    fragments.push(LineFragment {
                        logical_row,
                        display_row: visual_row - self.scroll_offset,
                        start,
                        end,
                    });
                }
                visual_row += 1;
            }
        }
        fragments
    }

    // ==================== Queries ====================

    pub fn cursor_pos(&self) -> Position {
        self.cursor.pos()
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn selection_range(&self) -> Option<Range> {
        self.selection.normalized()
    }

    pub fn insert_mode(&self) -> bool {
        self.insert_mode
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn h_scroll_offset(&self) -> usize {
        self.h_scroll_offset
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Latched modifier states, for keyboard UIs that highlight them.
    pub fn control_latched(&self) -> bool {
        self.control
    }

    pub fn shift_latched(&self) -> bool {
        self.shift
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// The shifted form of a punctuation key, or the key itself.
    pub fn shifted_char(&self, c: char) -> char {
        shifted_char(c)
    }
}
