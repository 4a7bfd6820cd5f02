//! Frame layout.
//!
//! ```text
//! ┌ title ─────────────────────────────────┐
//! │ description                            │
//! ├ jobs ──────┬ skills ───────────────────┤
//! │            │ [card] [card] [card]      │
//! │            │ [card] [card]             │
//! └────────────┴───────────────────────────┘
//!  status bar
//! ```

use crate::app::App;
use crate::render::CardDescriptor;
use crate::util::{sanitize, truncate_to_width, wrap_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::cards::{render_popout, render_tile, CARD_HEIGHT, CARD_WIDTH};
use super::{nav, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

const NAV_WIDTH: u16 = 28;
const HEADER_HEIGHT: u16 = 4;

pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.surface.viewport_width = area.width;

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        app.surface.card_areas.clear();
        app.surface.popout = None;
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    nav::render(f, app, body[0]);
    render_cards(f, app, body[1], rows[1]);
    status::render(f, app, rows[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let title = sanitize(app.surface.title());

    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&title, width).into_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let description = sanitize(app.surface.description());
    lines.extend(
        wrap_to_width(&description, width)
            .into_iter()
            .take(usize::from(HEADER_HEIGHT.saturating_sub(2)))
            .map(Line::from),
    );

    let header = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Draw the card grid and the popout of the highlighted card, recording
/// their areas on the surface.
fn render_cards(f: &mut Frame, app: &mut App, area: Rect, popout_bounds: Rect) {
    let skills = app
        .surface
        .cards()
        .iter()
        .filter(|c| c.as_skill().is_some())
        .count();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Skills ({})", skills));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 1 || inner.height < 1 {
        app.surface.card_areas.clear();
        app.surface.popout = None;
        return;
    }

    let columns = usize::from((inner.width / CARD_WIDTH).max(1));
    let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
    let total_rows = app.surface.card_count().div_ceil(columns);
    let scroll = app
        .surface
        .scroll
        .min(total_rows.saturating_sub(visible_rows));
    app.surface.scroll = scroll;

    let mut areas = Vec::new();
    let cards = app.surface.cards();
    for (i, card) in cards
        .iter()
        .enumerate()
        .skip(scroll * columns)
        .take(visible_rows * columns)
    {
        let pos = i - scroll * columns;
        let cell = match card {
            CardDescriptor::NoResults { .. } => Rect::new(inner.x, inner.y, inner.width, 3),
            CardDescriptor::Skill(_) => Rect::new(
                inner.x + (pos % columns) as u16 * CARD_WIDTH,
                inner.y + (pos / columns) as u16 * CARD_HEIGHT,
                CARD_WIDTH,
                CARD_HEIGHT,
            ),
        }
        .intersection(inner);
        if cell.is_empty() {
            continue;
        }

        render_tile(f, card, app.hover.state(i), cell);
        areas.push((i, cell));
    }

    let popout = areas.iter().find_map(|&(i, cell)| {
        let hover = app.hover.state(i);
        let card = cards[i].as_skill().filter(|_| hover.highlighted)?;
        render_popout(f, card, hover, cell, popout_bounds, app.hover.popout_width())
            .map(|area| (i, area))
    });

    app.surface.card_areas = areas;
    app.surface.popout = popout;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::catalog::{CatalogIndex, DataSource};
    use crate::config::Config;
    use crate::ui::handle_app_event;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn loaded_app(width: u16, height: u16) -> (App, mpsc::UnboundedReceiver<AppEvent>, Terminal<TestBackend>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(DataSource::File("x.json".into()), &Config::default(), tx).unwrap();
        app.install_catalog(
            CatalogIndex::load(
                br#"{"A": {"name_tw": "Alpha", "description_tw": "First job", "skills": [
                        {"id": "a1", "name_tw": "Fireball", "level": 1, "cooldown": 2.5},
                        {"id": "a2", "name_tw": "Ice Lance", "level": 4},
                        {"id": "a3", "name_tw": "Wind Shear", "level": 9}]}}"#,
            )
            .unwrap(),
        );
        while let Ok(event) = rx.try_recv() {
            handle_app_event(&mut app, event);
        }
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        (app, rx, terminal)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_records_card_areas() {
        let (mut app, _rx, mut terminal) = loaded_app(120, 30);
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert_eq!(app.surface.card_areas.len(), 3);
        assert_eq!(app.surface.viewport_width(), 120);
        let text = buffer_text(&terminal);
        assert!(text.contains("Alpha (A)"));
        assert!(text.contains("Fireball"));
        assert!(text.contains("Jobs (1)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_over_card_opens_popout() {
        let (mut app, mut rx, mut terminal) = loaded_app(120, 30);
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let (_, area) = app.surface.card_areas[0];
        app.pointer_moved(area.x + 1, area.y + 1);
        assert!(app.hover.state(0).highlighted);
        assert_eq!(app.hovered, Some(0));

        terminal.draw(|f| render(f, &mut app)).unwrap();
        let (card, popout) = app.surface.popout.unwrap();
        assert_eq!(card, 0);
        assert!(buffer_text(&terminal).contains("Recast   2.5"));

        // Moving into the popout keeps the card highlighted
        app.pointer_moved(popout.x + 1, popout.y + 1);
        assert_eq!(app.hovered, Some(0));
        assert!(!app.hover.has_pending());

        // Leaving both hides the card once the delay passes
        app.pointer_moved(0, 0);
        assert!(app.hover.state(0).highlighted);
        let event = rx.recv().await.unwrap();
        handle_app_event(&mut app, event);
        assert!(!app.hover.state(0).highlighted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_terminal_shows_message() {
        let (mut app, _rx, mut terminal) = loaded_app(40, 8);
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(buffer_text(&terminal).contains("Too small") || buffer_text(&terminal).contains("too small"));
        assert!(app.surface.card_areas.is_empty());
    }
}
