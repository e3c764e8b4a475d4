use std::fmt;

use super::{AuthHeader, PROGRAMMATIC_AUTH_LABEL, matches_any_scope};

/// ClientLogin token: an opaque `Auth` value.
///
/// The protocol returns no scope information. A token without scopes is
/// valid everywhere; scopes attached by the caller restrict it by prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientLoginToken {
    token_string: String,
    scopes: Vec<String>,
}

impl ClientLoginToken {
    pub fn new(token_string: impl Into<String>) -> Self {
        Self {
            token_string: token_string.into(),
            scopes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        self.scopes = scopes.iter().map(|s| s.as_ref().to_owned()).collect();
        self
    }

    pub fn token_string(&self) -> &str {
        &self.token_string
    }

    pub fn set_token_string(&mut self, token_string: &str) {
        token_string.clone_into(&mut self.token_string);
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// `GoogleLogin auth=<token>`
    pub fn auth_header(&self) -> AuthHeader {
        AuthHeader::new(format!("{PROGRAMMATIC_AUTH_LABEL}{}", self.token_string))
    }

    pub fn valid_for_scope(&self, scope: &str) -> bool {
        self.scopes.is_empty() || matches_any_scope(&self.scopes, scope)
    }
}

impl fmt::Display for ClientLoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token_string)
    }
}
