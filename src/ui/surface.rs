//! Render target backing the terminal view.
//!
//! Holds the region contents written by the render engine, and records where
//! the last frame placed each card so pointer positions can be mapped back to
//! cards.

use ratatui::layout::{Position, Rect};

use crate::hover::CardBounds;
use crate::render::{CardDescriptor, NavEntry, Region, RegionContent, RenderTarget};

const LOADING_TITLE: &str = "Loading skill data...";

#[derive(Debug)]
pub struct Surface {
    title: String,
    description: String,
    cards: Vec<CardDescriptor>,
    nav: Vec<NavEntry>,
    highlighted: Option<String>,
    renders: u64,

    /// First visible card row.
    pub(super) scroll: usize,
    /// Cards drawn in the last frame, with their screen areas.
    pub(super) card_areas: Vec<(usize, Rect)>,
    /// Detail popout drawn in the last frame, with the card it belongs to.
    pub(super) popout: Option<(usize, Rect)>,
    pub(super) viewport_width: u16,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            title: LOADING_TITLE.to_owned(),
            description: String::new(),
            cards: Vec::new(),
            nav: Vec::new(),
            highlighted: None,
            renders: 0,
            scroll: 0,
            card_areas: Vec::new(),
            popout: None,
            viewport_width: 0,
        }
    }
}

impl RenderTarget for Surface {
    fn set_region(&mut self, region: Region, content: RegionContent) {
        match (region, content) {
            (Region::Title, RegionContent::Text(text)) => self.title = text,
            (Region::Description, RegionContent::Text(text)) => self.description = text,
            (Region::CardList, RegionContent::Cards(cards)) => {
                self.cards = cards;
                self.renders += 1;
                self.scroll = 0;
                self.card_areas.clear();
                self.popout = None;
            }
            (Region::NavList, RegionContent::Nav(entries)) => self.nav = entries,
            (region, content) => {
                tracing::warn!(?region, ?content, "Content does not fit region, ignoring");
            }
        }
    }

    fn set_highlighted(&mut self, category_id: Option<&str>) {
        self.highlighted = category_id.map(str::to_owned);
    }
}

impl Surface {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cards(&self) -> &[CardDescriptor] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn nav(&self) -> &[NavEntry] {
        &self.nav
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    /// Number of card lists written so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    /// Scroll the card grid by `rows`, never past the first row.
    pub fn scroll_by(&mut self, rows: isize) {
        self.scroll = self.scroll.saturating_add_signed(rows);
    }

    /// Card under a screen position. The popout counts as part of its card
    /// and sits above the grid.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(usize, CardBounds)> {
        let pos = Position::new(column, row);
        let card = match self.popout {
            Some((card, area)) if area.contains(pos) => card,
            _ => self
                .card_areas
                .iter()
                .find(|(_, area)| area.contains(pos))
                .map(|(card, _)| *card)?,
        };
        self.card_area(card).map(|area| (card, bounds(area)))
    }

    pub(super) fn card_area(&self, card: usize) -> Option<Rect> {
        self.card_areas
            .iter()
            .find(|(c, _)| *c == card)
            .map(|(_, area)| *area)
    }
}

fn bounds(area: Rect) -> CardBounds {
    CardBounds {
        x: area.x,
        width: area.width,
    }
}
