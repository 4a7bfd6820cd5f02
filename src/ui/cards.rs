use crate::hover::CardHover;
use crate::render::{CardDescriptor, SkillCard};
use crate::util::{sanitize, truncate_to_width, wrap_to_width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Card tile size, borders included.
pub(super) const CARD_WIDTH: u16 = 26;
pub(super) const CARD_HEIGHT: u16 = 5;

/// Render one tile of the card grid.
pub fn render_tile(f: &mut Frame, card: &CardDescriptor, hover: CardHover, area: Rect) {
    match card {
        CardDescriptor::Skill(card) => render_skill_tile(f, card, hover, area),
        CardDescriptor::NoResults { query } => {
            let text = format!("No skills match \"{}\"", sanitize(query));
            let paragraph = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(paragraph, area);
        }
    }
}

fn render_skill_tile(f: &mut Frame, card: &SkillCard, hover: CardHover, area: Rect) {
    let inner_width = usize::from(area.width.saturating_sub(2));

    let border_style = if hover.highlighted {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let name = sanitize(&card.name);
    let title = truncate_to_width(&name, inner_width).into_owned();

    let kind = card.kind.as_deref().map(sanitize).unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Lv. {}", card.level),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::raw(truncate_to_width(&kind, inner_width.saturating_sub(8)).into_owned()),
    ])];
    if let Some(category) = &card.category {
        let category = sanitize(category);
        lines.push(Line::from(Span::styled(
            truncate_to_width(&category, inner_width).into_owned(),
            Style::default().fg(Color::Magenta),
        )));
    }
    if let Some(recast) = card.stat("Recast") {
        lines.push(Line::from(Span::styled(
            format!("Recast {}", recast),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    f.render_widget(paragraph, area);
}

/// Lines of the detail popout for `card`, wrapped to `width` columns.
pub fn popout_lines(card: &SkillCard, width: usize) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&sanitize(&card.name), width).into_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(category) = &card.category {
        lines.push(Line::from(Span::styled(
            format!("[{}]", sanitize(category)),
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled("Icon ", label),
        Span::raw(truncate_to_width(&sanitize(&card.icon), width.saturating_sub(5)).into_owned()),
    ]));

    for stat in &card.stats {
        lines.push(field(stat.label, &stat.value, width));
    }

    if let Some(combo) = &card.combo {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Combo",
            Style::default().fg(Color::Cyan),
        )));
        lines.push(field("After", &combo.condition, width));
        lines.push(field("Potency", &combo.potency, width));
        if let Some(duration) = &combo.duration {
            lines.push(field("Duration", duration, width));
        }
        for effect in &combo.effects {
            push_wrapped(&mut lines, effect, width, Style::default());
        }
    }

    if !card.additional_effects.is_empty() {
        lines.push(Line::default());
        for effect in &card.additional_effects {
            let text = match &effect.duration {
                Some(d) => format!("+ {} ({})", effect.text, d),
                None => format!("+ {}", effect.text),
            };
            push_wrapped(&mut lines, &text, width, Style::default().fg(Color::Green));
        }
    }

    if let Some(effect) = &card.effect {
        lines.push(Line::default());
        push_wrapped(&mut lines, effect, width, Style::default());
    }
    if let Some(notice) = &card.notice {
        lines.push(Line::default());
        push_wrapped(&mut lines, notice, width, Style::default().fg(Color::Yellow));
    }

    lines
}

/// A `label value` row with the label padded to a fixed column.
fn field(label: &str, value: &str, width: usize) -> Line<'static> {
    let value = sanitize(value);
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(truncate_to_width(&value, width.saturating_sub(9)).into_owned()),
    ])
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    lines.extend(
        wrap_to_width(&sanitize(text), width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, style))),
    );
}

/// Draw the popout for `card` next to `anchor`, inside `bounds`.
///
/// Returns the area actually drawn, for hit testing.
pub fn render_popout(
    f: &mut Frame,
    card: &SkillCard,
    hover: CardHover,
    anchor: Rect,
    bounds: Rect,
    width: u16,
) -> Option<Rect> {
    let width = width.min(bounds.width);
    if width < 4 {
        return None;
    }

    let lines = popout_lines(card, usize::from(width - 2));
    let height = (lines.len() as u16).saturating_add(2).min(bounds.height);

    let x = if hover.anchor_left {
        anchor.x.saturating_sub(width).max(bounds.x)
    } else {
        anchor.right().min(bounds.right().saturating_sub(width))
    };
    let y = anchor.y.min(bounds.bottom().saturating_sub(height));
    let area = Rect::new(x, y, width, height);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
    Some(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use crate::render::RenderEngine;
    use crate::router::ViewState;

    fn card(json: &str) -> SkillCard {
        let index = CatalogIndex::load(
            format!(r#"{{"A": {{"name_tw": "Alpha", "skills": [{}]}}}}"#, json).as_bytes(),
        )
        .unwrap();
        let out = RenderEngine::default().render(&ViewState::Search("s".into()), &index);
        out.cards[0].as_skill().unwrap().clone()
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_popout_lists_stats_and_combo() {
        let card = card(
            r#"{"id":"s","name_tw":"Syphon Strike","level":2,"combo_req":"Hard Slash",
                "combo_potency":300,"notice":"Cannot be used \u001b[2Jnow"}"#,
        );
        let lines = text(&popout_lines(&card, 30));
        assert_eq!(lines[0], "Syphon Strike");
        assert_eq!(lines[1], "[Alpha]");
        assert!(lines.contains(&"Level    Lv. 2".to_string()));
        assert!(lines.contains(&"After    Hard Slash".to_string()));
        assert!(lines.contains(&"Potency  300".to_string()));
        assert!(lines.contains(&"Cannot be used now".to_string()));
    }

    #[test]
    fn test_popout_wraps_long_effect() {
        let card = card(
            r#"{"id":"s","name_tw":"Slash","level":1,
                "effect_tw":"Delivers an attack with a potency of 200 to all nearby enemies"}"#,
        );
        let lines = popout_lines(&card, 20);
        assert!(lines.iter().all(|l| l.width() <= 20));
    }
}
