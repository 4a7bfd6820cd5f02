//! Input handling for the TUI.
//!
//! Keyboard input is dispatched by mode (search prompt or browsing); mouse
//! motion drives the card hover state.

use crate::app::App;
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent, MouseEventKind};

use super::Action;

/// Card rows scrolled per page key.
const PAGE_ROWS: isize = 3;

/// Main input dispatch function.
pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.search_mode {
        handle_search_input(app, code);
        return Action::Continue;
    }

    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.select_category_offset(1),
        KeyCode::Char('k') | KeyCode::Up => app.select_category_offset(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_category_offset(isize::MIN),
        KeyCode::Char('G') | KeyCode::End => app.select_category_offset(isize::MAX),
        KeyCode::PageDown => app.surface.scroll_by(PAGE_ROWS),
        KeyCode::PageUp => app.surface.scroll_by(-PAGE_ROWS),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('r') => {
            if app.loading {
                app.set_status("Already loading");
            } else {
                app.spawn_load();
            }
        }
        _ => {}
    }
    Action::Continue
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            if app.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
        }
        _ => {}
    }
}

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(event.column, event.row);
        }
        MouseEventKind::ScrollDown => {
            app.surface.scroll_by(1);
            app.needs_redraw = true;
        }
        MouseEventKind::ScrollUp => {
            app.surface.scroll_by(-1);
            app.needs_redraw = true;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::catalog::{CatalogIndex, DataSource};
    use crate::config::Config;
    use crate::router::ViewState;
    use crate::ui::handle_app_event;
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(DataSource::File("x.json".into()), &Config::default(), tx).unwrap();
        app.install_catalog(
            CatalogIndex::load(
                br#"{"A": {"name_tw": "Alpha", "skills": [{"id": "a", "name_tw": "Fire", "level": 1}]},
                     "B": {"name_tw": "Bravo", "skills": []}}"#,
            )
            .unwrap(),
        );
        while let Ok(event) = rx.try_recv() {
            handle_app_event(&mut app, event);
        }
        (app, rx)
    }

    fn pump(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppEvent>) {
        while let Ok(event) = rx.try_recv() {
            handle_app_event(app, event);
        }
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _rx) = app();
        assert!(matches!(handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit));
        assert!(matches!(
            handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn test_q_in_search_prompt_is_text() {
        let (mut app, _rx) = app();
        handle_key(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        let action = handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(action, Action::Continue));
        assert_eq!(app.search_input, "q");
    }

    #[tokio::test]
    async fn test_search_prompt_flow() {
        let (mut app, mut rx) = app();
        handle_key(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        type_str(&mut app, "fir");
        handle_key(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        type_str(&mut app, "re");
        handle_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        pump(&mut app, &mut rx);

        assert!(!app.search_mode);
        assert_eq!(app.view, Some(ViewState::Search("fire".into())));
    }

    #[tokio::test]
    async fn test_escape_cancels_search() {
        let (mut app, mut rx) = app();
        handle_key(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        type_str(&mut app, "fire");
        handle_key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        pump(&mut app, &mut rx);

        assert!(!app.search_mode);
        assert_eq!(app.view, Some(ViewState::Category("A".into())));
    }

    #[tokio::test]
    async fn test_category_keys() {
        let (mut app, mut rx) = app();
        handle_key(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        pump(&mut app, &mut rx);
        assert_eq!(app.view, Some(ViewState::Category("B".into())));

        handle_key(&mut app, KeyCode::Char('g'), KeyModifiers::NONE);
        pump(&mut app, &mut rx);
        assert_eq!(app.view, Some(ViewState::Category("A".into())));
    }
}
