//! Render engine.
//!
//! Turns a resolved [`ViewState`] into a [`RenderInstruction`]: the title,
//! description, card list and navigation highlight that replace whatever was
//! displayed before. Every render is a full re-render of those four parts.

mod card;
mod target;

pub use card::{CardDescriptor, ComboInfo, EffectLine, SkillCard, StatLine, DASH};
pub use target::{apply, apply_nav, Region, RegionContent, RenderTarget};

use crate::catalog::{search, CatalogIndex};
use crate::router::ViewState;

/// Icon used for skills without an `icon_url`.
pub const DEFAULT_ICON: &str = "default_icon.png";

pub const NOT_FOUND_TITLE: &str = "Job data not found";
pub const LOAD_ERROR_TITLE: &str = "Failed to load skill data";
pub const SEARCH_DESCRIPTION: &str = "Matching skills across all jobs";

/// Everything one render writes to the render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    pub title: String,
    pub description: String,
    pub cards: Vec<CardDescriptor>,
    /// Category to mark in the navigation list, if any.
    pub highlight: Option<String>,
}

impl RenderInstruction {
    /// The failure surface shown in place of any catalog content.
    pub fn load_error(source: &str, detail: &str) -> Self {
        Self {
            title: LOAD_ERROR_TITLE.to_owned(),
            description: format!(
                "Could not load the skill catalog from '{}'. Check that it exists and is valid JSON. ({})",
                source, detail
            ),
            cards: Vec::new(),
            highlight: None,
        }
    }

    fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_owned(),
            description: String::new(),
            cards: Vec::new(),
            highlight: None,
        }
    }
}

/// A sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct RenderEngine {
    default_icon: String,
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ICON)
    }
}

impl RenderEngine {
    pub fn new(default_icon: impl Into<String>) -> Self {
        Self {
            default_icon: default_icon.into(),
        }
    }

    /// Produce the instruction for `view`.
    ///
    /// - Category: `"<name> (<id>)"`, its description, its skills in order.
    /// - Search: a results header, every skill whose name contains the query
    ///   (tagged with its job), or a single no-results card.
    /// - NotFound: a not-found header and nothing else.
    pub fn render(&self, view: &ViewState, index: &CatalogIndex) -> RenderInstruction {
        match view {
            ViewState::Category(id) => {
                let Some(category) = index.category(id) else {
                    tracing::warn!(category = %id, "Rendering a category missing from the index");
                    return RenderInstruction::not_found();
                };
                RenderInstruction {
                    title: format!("{} ({})", category.name, category.id),
                    description: category
                        .description
                        .clone()
                        .or_else(|| category.role.clone())
                        .unwrap_or_default(),
                    cards: category
                        .skills
                        .iter()
                        .map(|skill| self.card(skill, false))
                        .collect(),
                    highlight: Some(category.id.clone()),
                }
            }
            ViewState::Search(query) => {
                let matches = search(query, index.flat());
                let cards = if matches.is_empty() {
                    vec![CardDescriptor::NoResults {
                        query: query.clone(),
                    }]
                } else {
                    matches.into_iter().map(|s| self.card(s, true)).collect()
                };
                RenderInstruction {
                    title: format!("Search results for \"{}\"", query),
                    description: SEARCH_DESCRIPTION.to_owned(),
                    cards,
                    highlight: None,
                }
            }
            ViewState::NotFound => RenderInstruction::not_found(),
        }
    }

    /// Sidebar entries in catalog order.
    pub fn nav_entries(&self, index: &CatalogIndex) -> Vec<NavEntry> {
        index
            .categories()
            .map(|c| NavEntry {
                id: c.id.clone(),
                label: format!("{} ({})", c.name, c.id),
            })
            .collect()
    }

    fn card(&self, skill: &crate::catalog::Skill, tag_category: bool) -> CardDescriptor {
        CardDescriptor::Skill(Box::new(SkillCard::build(
            skill,
            &self.default_icon,
            tag_category,
        )))
    }
}
