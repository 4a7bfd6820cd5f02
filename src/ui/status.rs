use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if app.search_mode {
        Cow::Owned(format!("/{}▏ ENTER search | ESC cancel", app.search_input))
    } else if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.loading {
        Cow::Borrowed("Loading...")
    } else {
        Cow::Borrowed("[j/k]job [/]search [PgUp/PgDn]scroll [r]eload [q]uit")
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}
