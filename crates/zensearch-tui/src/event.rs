//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                       | Event                |
//! |------------------------------|----------------------|
//! | `q`, `Ctrl+c`                | `Quit`               |
//! | `Tab`                        | `FocusNext`          |
//! | `/`                          | `QueryFocus`         |
//! | `s`, `F2`                    | `ToggleSemantic`     |
//! | `f`, `F3`                    | `ToggleFuzzy`        |
//! | `n`, `PageDown`, `Ctrl+d`    | `NextPage`           |
//! | `p`, `PageUp`, `Ctrl+u`      | `PrevPage`           |
//! | `t`                          | `CycleTheme`         |
//! | `↑` / `k`, `↓` / `j`         | `Nav(Up/Down)`       |
//! | `←` / `h`, `→` / `l`         | `Nav(Left/Right)`    |
//! | printable char               | `Char(c)`            |
//! | `Backspace`, `Delete`        | `Backspace`, `Delete`|
//! | `Enter`                      | `Enter`              |
//! | terminal resize              | `Resize(w, h)`       |
//!
//! ## Insert mode
//!
//! While the query bar is focused the event loop calls
//! [`to_app_event_insert`] instead. Letters type themselves; only `Ctrl+c`,
//! the function keys, page keys, arrows, `Tab`, `Escape`, `Enter`,
//! `Backspace` and `Delete` keep special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list and cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Transfer focus to the query bar.
    QueryFocus,
    ToggleSemantic,
    ToggleFuzzy,
    NextPage,
    PrevPage,
    /// Switch to the next embedded colour theme.
    CycleTheme,
    Nav(Direction),
    /// A printable character forwarded to the query bar.
    Char(char),
    Backspace,
    Delete,
    /// Run the search, or accept the selected suggestion.
    Enter,
    Resize(u16, u16),
    /// Dismiss suggestions, the help popup, or leave the query bar.
    Escape,
}

/// Map a raw crossterm [`Event`] in normal (navigation) mode.
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] while the query bar has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        Char('s') if key.modifiers == Mod::NONE => Some(AppEvent::ToggleSemantic),
        F(2) => Some(AppEvent::ToggleSemantic),
        Char('f') if key.modifiers == Mod::NONE => Some(AppEvent::ToggleFuzzy),
        F(3) => Some(AppEvent::ToggleFuzzy),

        Char('n') if key.modifiers == Mod::NONE => Some(AppEvent::NextPage),
        PageDown => Some(AppEvent::NextPage),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::NextPage),
        Char('p') if key.modifiers == Mod::NONE => Some(AppEvent::PrevPage),
        PageUp => Some(AppEvent::PrevPage),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PrevPage),

        Char('t') if key.modifiers == Mod::NONE => Some(AppEvent::CycleTheme),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Delete if key.modifiers == Mod::NONE => Some(AppEvent::Delete),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        F(2) => Some(AppEvent::ToggleSemantic),
        F(3) => Some(AppEvent::ToggleFuzzy),
        PageDown => Some(AppEvent::NextPage),
        PageUp => Some(AppEvent::PrevPage),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Delete if key.modifiers == Mod::NONE => Some(AppEvent::Delete),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
