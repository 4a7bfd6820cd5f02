use tokio::sync::mpsc;

use super::token::strip_fragment;
use crate::app::AppEvent;

/// Holder of the current navigation token.
///
/// Every real change posts [`AppEvent::TokenChanged`] to the event loop, which
/// is what triggers routing. Setting the token it already holds is a no-op and
/// posts nothing, so a redirect to the current token cannot loop.
#[derive(Debug)]
pub struct Location {
    token: String,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl Location {
    /// Start at `initial` without announcing it; the first routing pass after
    /// the catalog loads reads it directly.
    pub fn new(initial: &str, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            token: strip_fragment(initial).to_owned(),
            events,
        }
    }

    pub fn current(&self) -> &str {
        &self.token
    }

    /// Replace the token, announcing the change. Returns whether it changed.
    pub fn set(&mut self, token: &str) -> bool {
        let token = strip_fragment(token);
        if token == self.token {
            return false;
        }

        tracing::debug!(from = %self.token, to = %token, "Navigation token changed");
        self.token = token.to_owned();
        if self
            .events
            .send(AppEvent::TokenChanged(self.token.clone()))
            .is_err()
        {
            tracing::warn!(token = %self.token, "Token change dropped (event loop gone)");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_announces_change() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut location = Location::new("", tx);

        assert!(location.set("Samurai"));
        assert_eq!(location.current(), "Samurai");
        assert!(matches!(rx.try_recv(), Ok(AppEvent::TokenChanged(t)) if t == "Samurai"));
    }

    #[test]
    fn test_same_token_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut location = Location::new("#Samurai", tx);
        assert_eq!(location.current(), "Samurai");

        assert!(!location.set("Samurai"));
        assert!(!location.set("#Samurai"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_changes_arrive_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut location = Location::new("", tx);
        location.set("A");
        location.set("B");

        let order: Vec<String> = std::iter::from_fn(|| match rx.try_recv() {
            Ok(AppEvent::TokenChanged(t)) => Some(t),
            _ => None,
        })
        .collect();
        assert_eq!(order, vec!["A", "B"]);
    }
}
