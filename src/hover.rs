//! Hover highlight for skill cards.
//!
//! Entering a card highlights it at once. Leaving schedules a hide after a short
//! delay so the pointer can cross the gap between a card and its popout; entering
//! again before the delay cancels the hide. Only one hide timer exists at a time.
//!
//! Timers run as tokio tasks that post [`AppEvent::HoverExpired`] back to the event
//! loop. Each event carries the render generation and the timer sequence number it
//! was scheduled under, so an event that outlived its card set or was superseded
//! by a newer timer is ignored.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::AppEvent;

pub const DEFAULT_HOVER_DELAY: Duration = Duration::from_millis(100);

/// Display state of one card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardHover {
    pub highlighted: bool,
    /// Open the popout on the left side of the card instead of the right.
    pub anchor_left: bool,
}

/// Horizontal placement of a card on screen, in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardBounds {
    pub x: u16,
    pub width: u16,
}

/// Whether a popout placed right of `bounds` would overflow the viewport.
pub fn anchor_left(bounds: CardBounds, viewport_width: u16, popout_width: u16) -> bool {
    u32::from(bounds.x) + u32::from(bounds.width) + u32::from(popout_width)
        > u32::from(viewport_width)
}

#[derive(Debug)]
struct PendingHide {
    seq: u64,
    card: usize,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
pub struct HoverController {
    delay: Duration,
    popout_width: u16,
    events: mpsc::UnboundedSender<AppEvent>,
    cards: Vec<CardHover>,
    generation: u64,
    seq: u64,
    pending: Option<PendingHide>,
}

impl HoverController {
    pub fn new(delay: Duration, popout_width: u16, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            delay,
            popout_width,
            events,
            cards: Vec::new(),
            generation: 0,
            seq: 0,
            pending: None,
        }
    }

    /// Start tracking a freshly rendered card set. Everything from the previous
    /// set, including a pending hide, is discarded.
    pub fn attach(&mut self, card_count: usize) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        self.cards = vec![CardHover::default(); card_count];
        tracing::trace!(generation = self.generation, card_count, "Hover attached");
    }

    pub fn on_enter(&mut self, card: usize, bounds: CardBounds, viewport_width: u16) {
        if card >= self.cards.len() {
            return;
        }
        self.cancel_pending(card);

        let anchor_left = anchor_left(bounds, viewport_width, self.popout_width);
        self.cards[card] = CardHover {
            highlighted: true,
            anchor_left,
        };
    }

    pub fn on_leave(&mut self, card: usize) {
        if !self.cards.get(card).is_some_and(|c| c.highlighted) {
            return;
        }
        self.cancel_pending(card);

        self.seq = self.seq.wrapping_add(1);
        let (generation, seq, delay) = (self.generation, self.seq, self.delay);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = events.send(AppEvent::HoverExpired {
                generation,
                seq,
                card,
            });
        });
        self.pending = Some(PendingHide { seq, card, handle });
    }

    /// Apply an expired hide timer. Returns whether anything changed.
    pub fn on_expired(&mut self, generation: u64, seq: u64, card: usize) -> bool {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "Stale hover timer");
            return false;
        }
        match &self.pending {
            Some(p) if p.seq == seq && p.card == card => {}
            _ => return false,
        }
        self.pending = None;
        self.hide(card)
    }

    pub fn state(&self, card: usize) -> CardHover {
        self.cards.get(card).copied().unwrap_or_default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn popout_width(&self) -> u16 {
        self.popout_width
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Abort the pending hide. If it targeted a card other than `keep`, that
    /// card is hidden right away instead of being left highlighted.
    fn cancel_pending(&mut self, keep: usize) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            if pending.card != keep {
                self.hide(pending.card);
            }
        }
    }

    fn hide(&mut self, card: usize) -> bool {
        match self.cards.get_mut(card) {
            Some(c) if c.highlighted => {
                c.highlighted = false;
                true
            }
            _ => false,
        }
    }
}

impl Drop for HoverController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}
