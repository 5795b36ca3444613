//! Insights pane: related terms, category and level counts for the page on
//! screen. Only populated for semantic searches.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use zensearch_core::search::insights::SearchInsights;

pub struct InsightsPanel<'a> {
    insights: Option<&'a SearchInsights>,
    theme: &'a Theme,
}

impl<'a> InsightsPanel<'a> {
    pub fn new(insights: Option<&'a SearchInsights>, theme: &'a Theme) -> Self {
        Self { insights, theme }
    }
}

impl Widget for InsightsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 搜索洞察 ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(insights) = self.insights.filter(|i| !i.is_empty()) else {
            Paragraph::new(Line::from(Span::styled("开启语义搜索 (s) 查看", self.theme.result_meta)))
                .render(inner, buf);
            return;
        };

        let mut lines = Vec::new();
        if !insights.related_terms.is_empty() {
            lines.push(Line::from(Span::styled("扩展为以下相关概念：", self.theme.result_meta)));
            lines.push(Line::from(Span::styled(
                insights.related_terms.join(" · "),
                self.theme.highlight_semantic,
            )));
            lines.push(Line::default());
        }
        push_counts(&mut lines, "搜索结果分类：", &insights.categories, self.theme);
        push_counts(&mut lines, "难度级别分布：", &insights.levels, self.theme);

        Paragraph::new(lines).wrap(Wrap { trim: true }).render(inner, buf);
    }
}

fn push_counts(lines: &mut Vec<Line<'static>>, heading: &'static str, counts: &[(String, usize)], theme: &Theme) {
    if counts.is_empty() {
        return;
    }
    lines.push(Line::from(Span::styled(heading, theme.result_meta)));
    lines.extend(
        counts
            .iter()
            .map(|(name, n)| Line::from(format!("  {name} ({n})"))),
    );
    lines.push(Line::default());
}
