//! Suggestion dropdown shown under the query bar while typing.
//!
//! `↑` / `↓` move the selection, `Enter` accepts it, `Escape` hides the list.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};
use zensearch_core::search::suggest::Suggestion;

#[derive(Debug, Default)]
pub struct SuggestionsState {
    pub items: Vec<Suggestion>,
    pub selected: Option<usize>,
}

impl SuggestionsState {
    pub fn replace(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn is_visible(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.items.get(i)).map(|s| s.text.as_str())
    }

    /// Move the selection. Returns false when the event is not a vertical
    /// move or there is nothing to select.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }
        self.selected = match (event, self.selected) {
            (AppEvent::Nav(Direction::Down), None) => Some(0),
            (AppEvent::Nav(Direction::Down), Some(i)) => Some((i + 1).min(len - 1)),
            (AppEvent::Nav(Direction::Up), Some(0) | None) => None,
            (AppEvent::Nav(Direction::Up), Some(i)) => Some(i - 1),
            _ => return false,
        };
        true
    }

    /// Rows the dropdown needs, borders included.
    pub fn height(&self) -> u16 {
        self.items.len() as u16 + 2
    }
}

pub struct SuggestionList<'a> {
    state: &'a SuggestionsState,
    theme: &'a Theme,
}

impl<'a> SuggestionList<'a> {
    pub fn new(state: &'a SuggestionsState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered().border_style(self.theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let line = Line::from(vec![
                    Span::raw(s.text.as_str()),
                    Span::raw(" "),
                    Span::styled(s.kind.label(), self.theme.suggestion(s.kind)),
                ]);
                if self.state.selected == Some(i) {
                    line.patch_style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
