//! Percent-encoding and parameter parsing shared by all schemes.
//!
//! OAuth 1.0 quotes values per RFC 5849 (space becomes `%20`), while the
//! ClientLogin and AuthSub endpoints expect `application/x-www-form-urlencoded`
//! (space becomes `+`). Both keep only the RFC 3986 unreserved characters.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Quoting rules of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// RFC 5849 encoding, space as `%20`.
    OAuth,
    /// Form encoding, space as `+`.
    Form,
}

impl Encoding {
    /// Encode a single key or value.
    #[must_use]
    pub fn encode(self, input: &str) -> String {
        match self {
            Self::OAuth => oauth_encode(input),
            Self::Form => form_encode(input),
        }
    }
}

/// Percent-encode string per RFC 3986.
#[must_use]
pub fn oauth_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Form-encode string: like [`oauth_encode`] but space becomes `+`.
#[must_use]
pub fn form_encode(input: &str) -> String {
    // A literal '%' is escaped as %25, so every %20 in the output is a space.
    oauth_encode(input).replace("%20", "+")
}

/// Decode a form-encoded value (`+` is a space).
#[must_use]
pub fn form_decode(input: &str) -> String {
    percent_decode_str(&input.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Encode pairs as `k=v` joined with `&`, keeping their order.
pub fn encode_params<I, K, V>(params: I, encoding: Encoding) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encoding.encode(k.as_ref()),
                encoding.encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Split an entry on the first `=` only. A bare key maps to an empty value.
#[must_use]
pub fn split_pair(entry: &str) -> (&str, &str) {
    entry.split_once('=').unwrap_or((entry, ""))
}

/// Split a query string or a newline-delimited body into raw pairs.
///
/// Entries are separated by `&`, `\r` or `\n`; empty entries are skipped.
/// Nothing is decoded.
pub fn raw_pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(['&', '\r', '\n'])
        .filter(|entry| !entry.is_empty())
        .map(split_pair)
}

/// Parse a query string or a `Key=Value` line body into decoded pairs.
///
/// Order and duplicates are preserved. Never fails: malformed escapes are
/// decoded lossily and missing values become empty strings.
#[must_use]
pub fn parse_query_or_body(raw: &str) -> Vec<(String, String)> {
    raw_pairs(raw)
        .map(|(k, v)| (form_decode(k), form_decode(v)))
        .collect()
}

/// First value recorded for `key`.
#[must_use]
pub fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
