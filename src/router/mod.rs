//! Navigation routing.
//!
//! A navigation token (the fragment part of an address: empty, a category key,
//! or `search?q=<encoded>`) is the single input that decides what is on screen.
//! [`resolve`] maps a token plus the loaded catalog to a [`ViewState`], and
//! [`Location`] owns the current token and announces changes to it.

mod location;
mod token;

pub use location::Location;
pub use token::{encode_search_token, parse_token, strip_fragment, Token, SEARCH_PREFIX};

use crate::catalog::{normalize_query, CatalogIndex};
use thiserror::Error;

/// Token anomalies. These are always recovered by falling back to the default
/// category and never reach the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid navigation token: {0}")]
    InvalidToken(String),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// What is currently displayed. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// An existing category, by identifier.
    Category(String),
    /// A non-blank, trimmed search query.
    Search(String),
    /// Nothing can be shown (the catalog is empty).
    NotFound,
}

/// Outcome of resolving a token.
///
/// `redirect` is set when the token was normalized to the default category;
/// the caller rewrites the token to it instead of rendering `view` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub view: ViewState,
    pub redirect: Option<String>,
}

impl Resolution {
    fn show(view: ViewState) -> Self {
        Self {
            view,
            redirect: None,
        }
    }
}

/// Map a navigation token to the view it denotes.
///
/// In order:
/// 1. a search token with a non-blank query is a search view;
/// 2. a token naming an existing category is that category;
/// 3. anything else falls back to the first category, with a redirect;
/// 4. with no categories at all the result is [`ViewState::NotFound`].
///
/// Resolving the redirect target again yields the same view with no further
/// redirect.
pub fn resolve(token: &str, index: &CatalogIndex) -> Resolution {
    match parse_token(token) {
        Ok(Token::Search(query)) => {
            if let Some(query) = normalize_query(&query) {
                return Resolution::show(ViewState::Search(query.to_owned()));
            }
            tracing::debug!(token, "Blank search query, using default category");
        }
        Ok(Token::Category(key)) => match lookup_category(key, index) {
            Ok(id) => return Resolution::show(ViewState::Category(id.to_owned())),
            Err(e) => tracing::debug!(error = %e, "Using default category"),
        },
        Ok(Token::Empty) => {}
        Err(e) => tracing::debug!(error = %e, "Using default category"),
    }

    match index.default_category_id() {
        Ok(id) => Resolution {
            view: ViewState::Category(id.to_owned()),
            redirect: Some(id.to_owned()),
        },
        Err(e) => {
            tracing::debug!(error = %e, "Nothing to show");
            Resolution::show(ViewState::NotFound)
        }
    }
}

fn lookup_category<'a>(key: &str, index: &'a CatalogIndex) -> Result<&'a str, RouteError> {
    index
        .category(key)
        .map(|c| c.id.as_str())
        .ok_or_else(|| RouteError::UnknownCategory(key.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn index() -> CatalogIndex {
        CatalogIndex::load(
            br#"{
                "A": {"name_tw": "Alpha", "skills": [{"id": "a1", "name_tw": "Fireball", "level": 1}]},
                "C": {"name_tw": "Charlie", "skills": []}
            }"#,
        )
        .unwrap()
    }

    fn category(id: &str) -> ViewState {
        ViewState::Category(id.to_owned())
    }

    #[test]
    fn test_empty_token_redirects_to_first_category() {
        let r = resolve("", &index());
        assert_eq!(r.view, category("A"));
        assert_eq!(r.redirect.as_deref(), Some("A"));
    }

    #[test]
    fn test_existing_category_has_no_redirect() {
        let r = resolve("C", &index());
        assert_eq!(r, Resolution::show(category("C")));
    }

    #[test]
    fn test_unknown_category_redirects() {
        let r = resolve("B", &index());
        assert_eq!(r.view, category("A"));
        assert_eq!(r.redirect.as_deref(), Some("A"));
    }

    #[test]
    fn test_search_token() {
        let r = resolve("search?q=fire", &index());
        assert_eq!(r, Resolution::show(ViewState::Search("fire".into())));
    }

    #[test]
    fn test_search_query_is_trimmed() {
        let r = resolve("search?q=%20fire%20", &index());
        assert_eq!(r.view, ViewState::Search("fire".into()));
    }

    #[test]
    fn test_blank_search_falls_back() {
        for token in ["search?q=", "search?q=%20%20", "search?q=%09"] {
            let r = resolve(token, &index());
            assert_eq!(r.view, category("A"), "token {token:?}");
            assert_eq!(r.redirect.as_deref(), Some("A"));
        }
    }

    #[test]
    fn test_undecodable_search_falls_back() {
        let r = resolve("search?q=%E0%A4%A", &index());
        assert_eq!(r.view, category("A"));
        assert!(r.redirect.is_some());
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let empty = CatalogIndex::load(b"{}").unwrap();
        assert_eq!(resolve("", &empty), Resolution::show(ViewState::NotFound));
        assert_eq!(resolve("A", &empty), Resolution::show(ViewState::NotFound));
    }

    #[test]
    fn test_search_in_empty_catalog_is_still_search() {
        let empty = CatalogIndex::load(b"{}").unwrap();
        assert_eq!(
            resolve("search?q=x", &empty).view,
            ViewState::Search("x".into())
        );
    }

    #[test]
    fn test_redirect_converges() {
        let index = index();
        let first = resolve("nope", &index);
        let target = first.redirect.unwrap();
        let second = resolve(&target, &index);
        assert_eq!(second, Resolution::show(first.view));
    }

    proptest! {
        #[test]
        fn prop_resolve_never_panics_and_redirect_is_stable(token in ".{0,24}") {
            let index = index();
            let r = resolve(&token, &index);
            if let Some(target) = r.redirect {
                let again = resolve(&target, &index);
                prop_assert!(again.redirect.is_none());
                prop_assert_eq!(again.view, r.view);
            }
        }

        #[test]
        fn prop_encoded_search_round_trips(query in "[^\\s]{1,12}") {
            let index = index();
            let r = resolve(&encode_search_token(&query), &index);
            prop_assert_eq!(r, Resolution::show(ViewState::Search(query)));
        }
    }
}
