use crate::app::App;
use crate::util::{sanitize, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the job list panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.surface.nav();
    let inner_width = usize::from(area.width.saturating_sub(4));

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new("No jobs loaded")]
    } else {
        entries
            .iter()
            .map(|entry| {
                let selected = app.surface.highlighted() == Some(entry.id.as_str());
                let label = sanitize(&entry.label);
                let label = truncate_to_width(&label, inner_width).into_owned();

                let (marker, style) = if selected {
                    (
                        "▸ ",
                        Style::default()
                            .bg(Color::DarkGray)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(label, style),
                ]))
            })
            .collect()
    };

    let title = format!("Jobs ({})", entries.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}
