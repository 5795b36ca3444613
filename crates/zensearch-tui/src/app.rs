//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Every search goes
//! through [`SearchEngine::execute`], so paging and option toggles simply
//! re-run the last query with a new request.

use crate::{
    event::{self, AppEvent, Direction},
    history::History,
    theme::Theme,
    widgets::{
        help::HelpPopup,
        history_panel::HistoryPanel,
        insights::InsightsPanel,
        query_bar::{QueryBar, QueryBarState},
        result_list::{ResultList, ResultListState},
        status_bar::StatusBar,
        suggestions::{SuggestionList, SuggestionsState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use zensearch_core::config::{Config, UiConfig};
use zensearch_core::search::insights::{summarize, SearchInsights};
use zensearch_core::search::suggest::suggest;
use zensearch_core::{CorpusProvider, SearchEngine, SearchRequest};

const SIDEBAR_WIDTH: u16 = 34;
const SUGGESTIONS_WIDTH: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Results,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub focus: Focus,
    pub query: QueryBarState,
    pub results: ResultListState,
    pub suggestions: SuggestionsState,
    /// Present after a semantic search.
    pub insights: Option<SearchInsights>,
    pub history: History,
    pub semantic: bool,
    pub fuzzy: bool,
    pub limit: usize,
    pub ui: UiConfig,
    pub theme: Theme,
    pub show_help: bool,
    pub quit: bool,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    engine: SearchEngine,
    provider: Box<dyn CorpusProvider>,
}

impl App {
    pub fn new(
        config: &Config,
        engine: SearchEngine,
        provider: Box<dyn CorpusProvider>,
        history: History,
    ) -> Self {
        let state = AppState {
            focus: Focus::Query,
            query: QueryBarState::default(),
            results: ResultListState::default(),
            suggestions: SuggestionsState::default(),
            insights: None,
            history,
            semantic: config.search.semantic,
            fuzzy: config.search.fuzzy,
            limit: config.search.limit.max(1),
            ui: config.ui.clone(),
            theme: Theme::by_name(&config.ui.theme),
            show_help: false,
            quit: false,
        };
        App { state, engine, provider }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if self.state.focus == Focus::Query {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.state.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.state.show_help = false;
            }
            return;
        }

        match event {
            AppEvent::Char('?') if self.state.focus != Focus::Query => {
                tracing::debug!("help popup opened");
                self.state.show_help = true;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.state.quit = true;
            }

            AppEvent::Escape => {
                let s = &mut self.state;
                if s.suggestions.is_visible() {
                    s.suggestions.clear();
                } else if s.focus == Focus::Query {
                    s.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => {
                let s = &mut self.state;
                let next = match s.focus {
                    Focus::Query => Focus::Results,
                    Focus::Results => Focus::Query,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
                s.suggestions.clear();
            }

            AppEvent::QueryFocus => self.state.focus = Focus::Query,

            AppEvent::ToggleSemantic => {
                self.state.semantic = !self.state.semantic;
                tracing::debug!(semantic = self.state.semantic, "semantic toggled");
                self.rerun();
            }

            AppEvent::ToggleFuzzy => {
                self.state.fuzzy = !self.state.fuzzy;
                tracing::debug!(fuzzy = self.state.fuzzy, "fuzzy toggled");
                self.rerun();
            }

            AppEvent::NextPage | AppEvent::PrevPage => self.turn_page(&event),

            AppEvent::CycleTheme => {
                self.state.theme = self.state.theme.next();
                tracing::debug!(theme = %self.state.theme.name, "theme switched");
            }

            AppEvent::Enter if self.state.focus == Focus::Query => {
                if let Some(text) = self.state.suggestions.selected_text().map(str::to_string) {
                    self.state.query.set(&text);
                }
                self.submit();
            }

            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Run the query bar text as a new search from the first page.
    fn submit(&mut self) {
        let query = self.state.query.query.trim().to_string();
        self.state.suggestions.clear();
        if !query.is_empty() {
            self.state.history.record(&query, chrono::Utc::now());
            if let Err(err) = self.state.history.save() {
                tracing::warn!(error = %err, "could not save search history");
            }
        }
        self.search(&query, 0);
        if !self.state.results.items().is_empty() {
            self.state.focus = Focus::Results;
        }
    }

    /// Repeat the last search from the first page with the current options.
    fn rerun(&mut self) {
        if let Some(query) = self.last_query() {
            self.search(&query, 0);
        }
    }

    fn turn_page(&mut self, event: &AppEvent) {
        let Some(page) = self.state.results.response.as_ref().and_then(|r| r.page_info()) else {
            return;
        };
        let target = match event {
            AppEvent::NextPage if page.has_next() => page.current + 1,
            AppEvent::PrevPage if page.has_prev() => page.current - 1,
            _ => return,
        };
        if let Some(query) = self.last_query() {
            self.search(&query, page.offset_of(target));
        }
    }

    fn last_query(&self) -> Option<String> {
        self.state
            .results
            .response
            .as_ref()
            .map(|r| r.query.clone())
            .filter(|q| !q.is_empty())
    }

    fn search(&mut self, query: &str, offset: usize) {
        let s = &mut self.state;
        let request = SearchRequest::new(query)
            .semantic(s.semantic)
            .fuzzy(s.fuzzy)
            .page(s.limit, offset);

        match self.engine.execute(&request, self.provider.as_ref()) {
            Ok(response) => {
                s.insights = response.semantic.then(|| {
                    summarize(
                        &response.query,
                        &response.items,
                        response.expanded_terms.as_deref().unwrap_or(&[]),
                    )
                });
                s.results.show(response);
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "search failed");
                s.insights = None;
                s.results.fail(err.to_string());
            }
        }
    }

    fn refresh_suggestions(&mut self) {
        let s = &mut self.state;
        let items = suggest(
            s.query.query.trim(),
            &s.history.queries(),
            self.engine.synonyms(),
            s.ui.suggestion_limit,
        );
        s.suggestions.replace(items);
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.state.focus {
            Focus::Query => {
                if matches!(event, AppEvent::Nav(Direction::Up | Direction::Down)) {
                    self.state.suggestions.handle(&event);
                } else if self.state.query.handle(&event) {
                    self.refresh_suggestions();
                }
            }
            Focus::Results => self.state.results.handle(&event),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | body | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let body = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let sidebar = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(state.ui.history_visible as u16 + 2),
            Constraint::Fill(1),
        ])
        .split(body[1]);

    let response = state.results.response.as_ref();
    let query_focused = state.focus == Focus::Query;

    frame.render_widget(
        QueryBar::new(&state.query, query_focused, state.semantic, state.fuzzy, &state.theme),
        vert[0],
    );
    frame.render_widget(
        ResultList::new(&state.results, state.focus == Focus::Results, &state.theme),
        body[0],
    );
    frame.render_widget(
        HistoryPanel::new(&state.history, state.ui.history_visible, &state.theme),
        sidebar[0],
    );
    frame.render_widget(InsightsPanel::new(state.insights.as_ref(), &state.theme), sidebar[1]);
    frame.render_widget(StatusBar::new(response, &state.theme), vert[2]);

    if query_focused && state.suggestions.is_visible() {
        let dropdown = Rect {
            x: vert[0].x + 1,
            y: vert[0].bottom(),
            width: SUGGESTIONS_WIDTH.min(area.width.saturating_sub(1)),
            height: state.suggestions.height().min(vert[1].height),
        };
        frame.render_widget(SuggestionList::new(&state.suggestions, &state.theme), dropdown);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
        return;
    }

    if query_focused {
        let qb = QueryBar::new(&state.query, true, state.semantic, state.fuzzy, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[0]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use zensearch_core::{Corpus, Course, SearchError};

    fn course(id: u64, title: &str, keywords: &str, category: &str, level: &str) -> Course {
        Course {
            id,
            title: title.to_string(),
            keywords: keywords.to_string(),
            description: format!("{title}的练习"),
            level: level.to_string(),
            duration: 10,
            teacher: "Now团队".to_string(),
            category: category.to_string(),
        }
    }

    fn corpus() -> Arc<Corpus> {
        Arc::new(
            Corpus::new(vec![
                course(1, "7天舒眠冥想", "睡眠, 放松", "睡眠改善", "初级"),
                course(2, "深度睡眠引导", "深度睡眠, 助眠", "睡眠改善", "高级"),
                course(3, "缓解焦虑", "焦虑, 情绪", "情绪管理", "初级"),
                course(4, "专注冥想", "专注, 注意力", "专注力", "初级"),
                course(5, "减压冥想", "减压, 放松", "压力管理", "初级"),
            ])
            .unwrap(),
        )
    }

    fn app_with_limit(limit: usize) -> App {
        let mut config = Config::defaults();
        config.search.limit = limit;
        App::new(&config, SearchEngine::default(), Box::new(corpus()), History::in_memory(20))
    }

    fn app() -> App {
        app_with_limit(20)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app.state())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn enter_runs_search_and_records_history() {
        let mut app = app();
        type_text(&mut app, "冥想");
        app.handle(AppEvent::Enter);

        let s = app.state();
        let ids: Vec<u64> = s.results.items().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![1, 4, 5]);
        assert_eq!(s.history.queries(), vec!["冥想"]);
        assert_eq!(s.focus, Focus::Results);
        assert!(s.insights.is_none());
    }

    #[test]
    fn semantic_toggle_reruns_with_insights() {
        let mut app = app();
        type_text(&mut app, "睡眠");
        app.handle(AppEvent::Enter);
        let direct_total = app.state().results.response.as_ref().unwrap().total;

        app.handle(AppEvent::ToggleSemantic);
        let s = app.state();
        let response = s.results.response.as_ref().unwrap();
        assert!(response.semantic);
        assert!(response.total >= direct_total);
        let insights = s.insights.as_ref().unwrap();
        assert!(!insights.related_terms.iter().any(|t| t == "睡眠"));
        assert!(insights.categories.iter().any(|(c, _)| c == "睡眠改善"));
    }

    #[test]
    fn paging_moves_offset_and_stops_at_ends() {
        let mut app = app_with_limit(2);
        type_text(&mut app, "冥想");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().results.response.as_ref().unwrap().total, 3);

        app.handle(AppEvent::NextPage);
        let response = app.state().results.response.as_ref().unwrap();
        assert_eq!(response.offset, Some(2));
        assert_eq!(response.items.len(), 1);

        app.handle(AppEvent::NextPage);
        assert_eq!(app.state().results.response.as_ref().unwrap().offset, Some(2));

        app.handle(AppEvent::PrevPage);
        app.handle(AppEvent::PrevPage);
        assert_eq!(app.state().results.response.as_ref().unwrap().offset, Some(0));
    }

    #[test]
    fn suggestion_can_be_selected_and_searched() {
        let mut app = app();
        type_text(&mut app, "助眠");
        assert!(app.state().suggestions.is_visible());

        app.handle(AppEvent::Nav(Direction::Down));
        let picked = app.state().suggestions.selected_text().unwrap().to_string();
        app.handle(AppEvent::Enter);

        assert_eq!(app.state().query.query, picked);
        assert!(!app.state().suggestions.is_visible());
        assert_eq!(app.state().results.response.as_ref().unwrap().query, picked);
    }

    #[test]
    fn escape_hides_suggestions_before_leaving_query_bar() {
        let mut app = app();
        type_text(&mut app, "放松");
        app.handle(AppEvent::Escape);
        assert!(!app.state().suggestions.is_visible());
        assert_eq!(app.state().focus, Focus::Query);
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().focus, Focus::Results);
    }

    #[test]
    fn help_popup_swallows_events() {
        let mut app = app();
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::Char('?'));
        assert!(app.state().show_help);
        app.handle(AppEvent::Quit);
        assert!(!app.state().show_help);
        assert!(!app.state().quit);
    }

    #[test]
    fn provider_failure_is_shown_not_fatal() {
        struct Broken;
        impl CorpusProvider for Broken {
            fn corpus(&self) -> zensearch_core::Result<Arc<Corpus>> {
                Err(SearchError::data_unavailable("offline"))
            }
        }

        let config = Config::defaults();
        let mut app = App::new(&config, SearchEngine::default(), Box::new(Broken), History::in_memory(5));
        type_text(&mut app, "冥想");
        app.handle(AppEvent::Enter);
        assert!(app.state().results.error.as_deref().unwrap().contains("offline"));
        assert!(screen(&app).contains("offline"));
    }

    #[test]
    fn status_bar_renders_result_count() {
        let mut app = app();
        type_text(&mut app, "冥想");
        app.handle(AppEvent::Enter);
        let text = screen(&app);
        assert!(text.contains("found 3 results"));
        assert!(text.contains("page 1/1"));
    }
}
