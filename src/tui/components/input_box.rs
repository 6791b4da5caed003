//! # InputBox Component
//!
//! Editable text field used for the chat composer and the calendar search.
//!
//! The buffer and cursor are internal state; the title and the `disabled`
//! flag are props set by the parent each frame. While disabled (a chat
//! request is in flight) the box is dimmed and ignores edits and Enter, so
//! the draft survives until the reply lands.
//!
//! Text is wrapped by character cells rather than words, which keeps the
//! cursor position trivially in sync with what is drawn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders (top + bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Borders (left + right).
const HORIZONTAL_OVERHEAD: u16 = 2;
/// The box grows with its content up to this many text rows.
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with non-blank text; the buffer has been cleared.
    Submit(String),
    /// Buffer or cursor changed.
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Border title (Prop)
    pub title: String,
    /// Dim and ignore input (Prop)
    pub disabled: bool,
    /// Cursor position as byte offset in buffer
    cursor: usize,
    /// Enter submits; otherwise Enter is ignored (search field)
    submit_on_enter: bool,
}

impl InputBox {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            disabled: false,
            cursor: 0,
            submit_on_enter: true,
        }
    }

    /// A single-purpose filter field: every keystroke is a `ContentChanged`,
    /// Enter does nothing.
    pub fn search(title: impl Into<String>) -> Self {
        Self {
            submit_on_enter: false,
            ..Self::new(title)
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Height for the current content, clamped to `MAX_VISIBLE_LINES` rows.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let width = inner_width(width);
        let (end_row, _) = cursor_cell(&self.buffer, self.buffer.len(), width);
        let rows = wrap_rows(&self.buffer, width).len().max(end_row + 1) as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

fn inner_width(width: u16) -> usize {
    width.saturating_sub(HORIZONTAL_OVERHEAD) as usize
}

/// Splits `text` into display rows of at most `width` cells.
///
/// Returns `(row_text, byte_start)` pairs; there is always at least one row.
fn wrap_rows(text: &str, width: usize) -> Vec<(String, usize)> {
    let mut rows = vec![(String::new(), 0)];
    if width == 0 {
        return rows;
    }

    let mut used = 0;
    for (idx, c) in text.char_indices() {
        if c == '\n' {
            rows.push((String::new(), idx + 1));
            used = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if used + w > width {
            rows.push((String::new(), idx));
            used = 0;
        }
        if let Some((row, _)) = rows.last_mut() {
            row.push(c);
        }
        used += w;
    }
    rows
}

/// Row and column (in cells) of the byte offset `pos`.
fn cursor_cell(text: &str, pos: usize, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let mut row = 0;
    let mut col = 0;
    for c in text[..pos].chars() {
        if c == '\n' {
            row += 1;
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width {
            row += 1;
            col = 0;
        }
        col += w;
    }
    // A full row pushes the cursor onto the next one.
    if col >= width {
        row += 1;
        col = 0;
    }
    (row, col)
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1) as usize;
        let rows = wrap_rows(&self.buffer, width);
        let (cursor_row, cursor_col) = cursor_cell(&self.buffer, self.cursor, width);

        // Keep the cursor row on screen.
        let first = (cursor_row + 1).saturating_sub(visible);
        let text = rows
            .iter()
            .skip(first)
            .take(visible)
            .map(|(row, _)| row.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let style = if self.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str())
            .border_style(style);

        frame.render_widget(Paragraph::new(text).block(block).style(style), area);

        if !self.disabled {
            let x = area.x + 1 + cursor_col as u16;
            let y = area.y + 1 + (cursor_row - first) as u16;
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar('\n') if !self.submit_on_enter => None,
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Paste(text) if !self.submit_on_enter => {
                let flat = text.replace(['\r', '\n'], " ");
                self.insert(&flat)
            }
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit if self.submit_on_enter && !self.buffer.trim().is_empty() => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
