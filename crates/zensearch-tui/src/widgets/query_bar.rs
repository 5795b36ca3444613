//! Query bar: text input plus the semantic / fuzzy option flags.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` / `Delete` remove the character before / under the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const FLAGS_WIDTH: u16 = 26;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Replace the whole query and put the cursor at the end.
    pub fn set(&mut self, text: &str) {
        self.query = text.to_string();
        self.cursor = self.query.len();
    }

    /// Apply an editing event. Returns whether the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.query.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Delete if self.cursor < self.query.len() => {
                self.query.remove(self.cursor);
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = self.next_boundary();
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.query[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.query.len())
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    semantic: bool,
    fuzzy: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        focused: bool,
        semantic: bool,
        fuzzy: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, focused, semantic, fuzzy, theme }
    }

    /// Absolute terminal position of the text cursor within `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col: usize = self.state.query[..self.state.cursor]
            .chars()
            .map(display_width)
            .sum();
        let x = (area.x + 1 + col as u16).min(area.right().saturating_sub(FLAGS_WIDTH + 2));
        (x, area.y + 1)
    }
}

/// Terminal cells taken by `c`. CJK ideographs and fullwidth forms take two.
fn display_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 搜索 ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(FLAGS_WIDTH)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let flags = Line::from(vec![
            Span::styled(flag_label("semantic", self.semantic), self.theme.flag(self.semantic)),
            Span::raw(" "),
            Span::styled(flag_label("fuzzy", self.fuzzy), self.theme.flag(self.fuzzy)),
        ]);
        Paragraph::new(flags).render(chunks[1], buf);
    }
}

fn flag_label(name: &str, on: bool) -> String {
    format!("[{}] {name}", if on { "x" } else { " " })
}
