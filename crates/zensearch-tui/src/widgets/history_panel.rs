//! Recent searches, newest first.

use crate::history::History;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct HistoryPanel<'a> {
    history: &'a History,
    visible: usize,
    theme: &'a Theme,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(history: &'a History, visible: usize, theme: &'a Theme) -> Self {
        Self { history, visible, theme }
    }
}

impl Widget for HistoryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 搜索历史 ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            Paragraph::new(Line::from(Span::styled("无搜索历史", self.theme.result_meta)))
                .render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .history
            .recent(self.visible)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.searched_at.with_timezone(&chrono::Local).format("%H:%M")),
                        self.theme.result_meta,
                    ),
                    Span::styled(entry.query.as_str(), self.theme.suggestion_history),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
