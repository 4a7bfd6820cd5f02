use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::RouteError;

/// Prefix of a search token; the rest is the percent-encoded query.
pub const SEARCH_PREFIX: &str = "search?q=";

/// Bytes left unescaped in an encoded query (the URI component set).
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A navigation token split into its grammatical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Empty,
    /// A raw category key. Whether it exists is decided by the router.
    Category(&'a str),
    /// A decoded search query, not yet trimmed.
    Search(String),
}

/// Drop the fragment marker, if the token still carries one.
pub fn strip_fragment(raw: &str) -> &str {
    raw.strip_prefix('#').unwrap_or(raw)
}

/// Split a token into its form, decoding the query of a search token.
///
/// Malformed percent escapes and escapes that do not decode to UTF-8 are
/// reported as [`RouteError::InvalidToken`].
pub fn parse_token(raw: &str) -> Result<Token<'_>, RouteError> {
    let raw = strip_fragment(raw);
    if raw.is_empty() {
        return Ok(Token::Empty);
    }
    match raw.strip_prefix(SEARCH_PREFIX) {
        Some(encoded) => decode_component(encoded).map(Token::Search),
        None => Ok(Token::Category(raw)),
    }
}

/// Build the token for a search over `query`.
pub fn encode_search_token(query: &str) -> String {
    format!("{}{}", SEARCH_PREFIX, utf8_percent_encode(query, QUERY_ESCAPE))
}

fn decode_component(encoded: &str) -> Result<String, RouteError> {
    let invalid = || RouteError::InvalidToken(format!("{}{}", SEARCH_PREFIX, encoded));

    // percent_decode passes broken escapes through verbatim, so check them first
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'%') {
        let at = pos + offset;
        let well_formed = bytes
            .get(at + 1..at + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(invalid());
        }
        pos = at + 3;
    }

    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| invalid())
}
