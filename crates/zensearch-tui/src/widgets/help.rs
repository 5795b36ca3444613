//! Help popup: centred overlay listing the keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Switch focus: query ↔ results"),
    ("/", "Focus query bar"),
    ("Escape", "Hide suggestions / leave query bar"),
    ("Enter", "Search (or accept suggestion)"),
    ("↑ k  /  ↓ j", "Select result or suggestion"),
    ("s  /  F2", "Toggle semantic search"),
    ("f  /  F3", "Toggle fuzzy matching"),
    ("n  /  PageDown", "Next page"),
    ("p  /  PageUp", "Previous page"),
    ("t", "Next colour theme"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(64, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" zensearch keybindings (? to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<18}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
