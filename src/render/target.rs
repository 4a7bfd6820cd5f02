use super::card::CardDescriptor;
use super::{NavEntry, RenderInstruction};

/// Regions of the page that a render writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Title,
    Description,
    CardList,
    NavList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionContent {
    Text(String),
    Cards(Vec<CardDescriptor>),
    Nav(Vec<NavEntry>),
}

/// Surface that displays render output.
///
/// The core never touches presentation elements; it only replaces whole
/// regions and moves the navigation highlight.
pub trait RenderTarget {
    fn set_region(&mut self, region: Region, content: RegionContent);
    fn set_highlighted(&mut self, category_id: Option<&str>);
}

/// Write a full instruction to `target`: title, description, card list and nav
/// highlight, all in one call.
pub fn apply<T: RenderTarget + ?Sized>(instruction: RenderInstruction, target: &mut T) {
    let RenderInstruction {
        title,
        description,
        cards,
        highlight,
    } = instruction;
    target.set_region(Region::Title, RegionContent::Text(title));
    target.set_region(Region::Description, RegionContent::Text(description));
    target.set_region(Region::CardList, RegionContent::Cards(cards));
    target.set_highlighted(highlight.as_deref());
}

/// Replace the navigation list. Done once per successful load.
pub fn apply_nav<T: RenderTarget + ?Sized>(entries: Vec<NavEntry>, target: &mut T) {
    target.set_region(Region::NavList, RegionContent::Nav(entries));
}
