//! Result list: one five-row card per course on the current page.
//!
//! `↑`/`k` and `↓`/`j` move the selection; the view scrolls to keep it
//! visible. Direct query hits and expanded-term hits are highlighted with
//! different styles.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use zensearch_core::search::highlight::highlight_ranges;
use zensearch_core::{ScoredCourse, SearchResponse};

const ITEM_HEIGHT: usize = 5;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    pub response: Option<SearchResponse>,
    /// Set when the last search failed; cleared by the next success.
    pub error: Option<String>,
    /// Index into the current page.
    pub selected: usize,
    /// First visible item.
    scroll: usize,
    /// Items that fit, cached from the last render.
    last_capacity: Cell<usize>,
}

impl ResultListState {
    pub fn show(&mut self, response: SearchResponse) {
        self.response = Some(response);
        self.error = None;
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn items(&self) -> &[ScoredCourse] {
        match &self.response {
            Some(r) => &r.items,
            None => &[],
        }
    }

    fn capacity(&self) -> usize {
        self.last_capacity.get().max(1)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.selected = self.selected.saturating_sub(1);
                if self.selected < self.scroll {
                    self.scroll = self.selected;
                }
            }
            AppEvent::Nav(Direction::Down) => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                if self.selected >= self.scroll + self.capacity() {
                    self.scroll = self.selected + 1 - self.capacity();
                }
            }
            _ => return,
        }
        tracing::debug!(selected = self.selected, scroll = self.scroll, "results: selection moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    state: &'a ResultListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" 结果 ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let capacity = (inner.height as usize / ITEM_HEIGHT).max(1);
        self.state.last_capacity.set(capacity);

        if let Some(err) = &self.state.error {
            Paragraph::new(Line::from(Span::styled(format!("搜索失败: {err}"), self.theme.error)))
                .render(inner, buf);
            return;
        }

        let Some(response) = &self.state.response else {
            Paragraph::new(Line::from(Span::styled(
                "输入关键词后按 Enter 搜索",
                self.theme.result_meta,
            )))
            .render(inner, buf);
            return;
        };

        if response.items.is_empty() {
            let msg = if response.query.is_empty() { "" } else { "没有找到匹配的结果" };
            Paragraph::new(Line::from(Span::styled(msg, self.theme.result_meta))).render(inner, buf);
            return;
        }

        let expanded: &[String] = response.expanded_terms.as_deref().unwrap_or(&[]);
        let start = self.state.scroll.min(response.items.len().saturating_sub(1));
        let lines: Vec<Line<'static>> = response
            .items
            .iter()
            .enumerate()
            .skip(start)
            .take(capacity)
            .flat_map(|(idx, item)| {
                let mut card = render_card(item, &response.query, expanded, self.theme);
                if self.focused && idx == self.state.selected {
                    for line in &mut card[..ITEM_HEIGHT - 1] {
                        *line = std::mem::take(line).patch_style(self.theme.result_selected);
                    }
                }
                card
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };
        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(response.items.len())
            .position(start)
            .viewport_content_length(capacity);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

fn render_card(item: &ScoredCourse, query: &str, expanded: &[String], theme: &Theme) -> Vec<Line<'static>> {
    let course = &item.course;

    let (badge, badge_style) = if item.semantic_match {
        ("语义匹配", theme.badge_semantic)
    } else {
        ("直接匹配", theme.badge_direct)
    };
    let level = if course.level.is_empty() { "不限" } else { course.level.as_str() };
    let duration = if course.duration == 0 { "--".to_string() } else { course.duration.to_string() };
    let teacher = if course.teacher.is_empty() { "Now团队" } else { course.teacher.as_str() };

    let meta = Line::from(vec![
        Span::styled(format!("相关度: {:.1}", item.score), theme.result_score),
        Span::raw("  "),
        Span::styled(format!(" {badge} "), badge_style),
        Span::raw("  "),
        Span::styled(format!("{level} · {duration}分钟 · {teacher}"), theme.result_meta),
    ]);

    vec![
        highlighted(&course.title, query, expanded, theme.result_title, theme),
        meta,
        highlighted(&course.keywords, query, expanded, theme.result_keywords, theme),
        highlighted(&course.description, query, expanded, Style::default(), theme),
        Line::default(),
    ]
}

/// `content` as one line with query and expanded-term hits styled.
pub fn highlighted(
    content: &str,
    query: &str,
    expanded: &[String],
    base: Style,
    theme: &Theme,
) -> Line<'static> {
    let mut spans = Vec::new();
    let mut pos = 0;
    for hit in highlight_ranges(content, query, expanded) {
        if hit.range.start > pos {
            spans.push(Span::styled(content[pos..hit.range.start].to_string(), base));
        }
        spans.push(Span::styled(
            content[hit.range.clone()].to_string(),
            base.patch(theme.highlight(hit.kind)),
        ));
        pos = hit.range.end;
    }
    if pos < content.len() {
        spans.push(Span::styled(content[pos..].to_string(), base));
    }
    Line::from(spans)
}
