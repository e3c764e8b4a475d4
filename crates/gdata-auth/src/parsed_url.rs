//! Decomposed URL returned by the URL builders.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::codec::{Encoding, encode_params, form_decode, raw_pairs};
use crate::error::AuthError;

/// URL split into protocol, host, path and decoded query parameters.
///
/// `host` includes a non-default port (`example.com:8080`). Parameters are
/// kept in key order; when a query repeats a key, the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Scheme without `://`.
    pub protocol: String,
    /// Host, with port when not the scheme default.
    pub host: String,
    /// Path, starting with `/`.
    pub path: String,
    /// Decoded query parameters.
    pub params: BTreeMap<String, String>,
}

impl ParsedUrl {
    /// Parse an absolute URL.
    pub fn parse(url: &str) -> Result<Self, AuthError> {
        let parsed = Url::parse(url)?;
        let mut host = parsed.host_str().unwrap_or_default().to_owned();
        if let Some(port) = parsed.port() {
            host = format!("{host}:{port}");
        }

        let mut params = BTreeMap::new();
        for (key, value) in raw_pairs(parsed.query().unwrap_or_default()) {
            params
                .entry(form_decode(key))
                .or_insert_with(|| form_decode(value));
        }

        Ok(Self {
            protocol: parsed.scheme().to_owned(),
            host,
            path: parsed.path().to_owned(),
            params,
        })
    }

    /// URL without query: `protocol://host/path`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.protocol, self.host, self.path)
    }

    /// Query string, RFC 3986 encoded, in key order.
    #[must_use]
    pub fn query_string(&self) -> String {
        encode_params(&self.params, Encoding::OAuth)
    }

    /// Value of a query parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parameters as ordered pairs, e.g. for signing.
    #[must_use]
    pub fn param_pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl FromStr for ParsedUrl {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.query_string())?;
        }
        Ok(())
    }
}
