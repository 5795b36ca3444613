//! One-line status bar: result count, page position and page selector.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use zensearch_core::search::facade::PageSlot;
use zensearch_core::SearchResponse;

pub struct StatusBar<'a> {
    response: Option<&'a SearchResponse>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(response: Option<&'a SearchResponse>, theme: &'a Theme) -> Self {
        Self { response, theme }
    }

    fn line(&self) -> Line<'static> {
        let text = self.theme.status_text;
        let Some(response) = self.response else {
            return Line::from(Span::styled(" ? help  / search  q quit", text));
        };

        let mut spans = vec![Span::styled(format!(" found {} results", response.total), text)];
        if let Some(page) = response.page_info().filter(|p| p.total_pages > 0) {
            spans.push(Span::styled(
                format!("  page {}/{}  ", page.current, page.total_pages),
                text,
            ));
            if page.has_prev() {
                spans.push(Span::styled("‹ ", text));
            }
            for slot in page.window() {
                spans.push(match slot {
                    PageSlot::Current(n) => Span::styled(n.to_string(), self.theme.status_current_page),
                    PageSlot::Page(n) => Span::styled(n.to_string(), text),
                    PageSlot::Ellipsis => Span::styled("…", text),
                });
                spans.push(Span::raw(" "));
            }
            if page.has_next() {
                spans.push(Span::styled("›", text));
            }
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
