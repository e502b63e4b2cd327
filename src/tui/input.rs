//! Text entry widgets for the terminal user interface.
//!
//! Cursors count characters, not bytes, so pasted notes with bullets and
//! dashes edit correctly.

/// Byte offset of the `char_idx`-th character of `s` (or `s.len()` past the end).
fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}

/// A single-line text input field with a cursor.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = byte_offset(&self.value, self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = byte_offset(&self.value, self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = byte_offset(&self.value, self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// A multi-line text area used for pasting notes.
#[derive(Clone)]
pub struct TextArea {
    lines: Vec<String>,
    cursor_x: usize,
    cursor_y: usize,
    pub scroll_y: usize,
    pub scroll_x: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_x: 0,
            cursor_y: 0,
            scroll_y: 0,
            scroll_x: 0,
        }
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full text with lines joined by newlines.
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// Cursor as (column, row), both in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    fn line_len(&self, y: usize) -> usize {
        self.lines.get(y).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let line = &mut self.lines[self.cursor_y];
        let at = byte_offset(line, self.cursor_x);
        line.insert(at, c);
        self.cursor_x += 1;
    }

    /// Insert pasted text, splitting on line breaks.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            self.insert_char(c);
        }
    }

    /// Split the current line at the cursor.
    pub fn newline(&mut self) {
        let line = &mut self.lines[self.cursor_y];
        let at = byte_offset(line, self.cursor_x);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor_y + 1, rest);
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    /// Remove the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.cursor_x > 0 {
            let line = &mut self.lines[self.cursor_y];
            let at = byte_offset(line, self.cursor_x - 1);
            line.remove(at);
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            let current = self.lines.remove(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
            self.lines[self.cursor_y].push_str(&current);
        }
    }

    /// Remove the character at the cursor, joining the next line at line end.
    pub fn delete(&mut self) {
        if self.cursor_x < self.line_len(self.cursor_y) {
            let line = &mut self.lines[self.cursor_y];
            let at = byte_offset(line, self.cursor_x);
            line.remove(at);
        } else if self.cursor_y + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_y + 1);
            self.lines[self.cursor_y].push_str(&next);
        }
    }

    /// Move the cursor left by one character.
    pub fn move_left(&mut self) {
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            // Move to end of previous line
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
        }
    }

    /// Move the cursor right by one character.
    pub fn move_right(&mut self) {
        if self.cursor_x < self.line_len(self.cursor_y) {
            self.cursor_x += 1;
        } else if self.cursor_y + 1 < self.lines.len() {
            // Move to beginning of next line
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
    }

    /// Move the cursor up by one line.
    pub fn move_up(&mut self) {
        if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.cursor_x.min(self.line_len(self.cursor_y));
        }
    }

    /// Move the cursor down by one line.
    pub fn move_down(&mut self) {
        if self.cursor_y + 1 < self.lines.len() {
            self.cursor_y += 1;
            self.cursor_x = self.cursor_x.min(self.line_len(self.cursor_y));
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_x = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_x = self.line_len(self.cursor_y);
    }

    /// Empty the text area.
    pub fn clear(&mut self) {
        *self = TextArea::default();
    }

    /// Keep the cursor inside a viewport of `visible_width` columns by
    /// `visible_height` rows. The cursor may sit one past the last character,
    /// so that column must fit too.
    pub fn adjust_scroll(&mut self, visible_width: usize, visible_height: usize) {
        if visible_height > 0 {
            if self.cursor_y >= self.scroll_y + visible_height {
                self.scroll_y = self.cursor_y + 1 - visible_height;
            } else if self.cursor_y < self.scroll_y {
                self.scroll_y = self.cursor_y;
            }
        }
        if visible_width > 0 {
            if self.cursor_x >= self.scroll_x + visible_width {
                self.scroll_x = self.cursor_x + 1 - visible_width;
            } else if self.cursor_x < self.scroll_x {
                self.scroll_x = self.cursor_x;
            }
        }
    }
}
