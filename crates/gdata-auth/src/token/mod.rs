//! Credential tokens and the `Authorization` headers they produce.
//!
//! Four schemes are supported:
//!
//! - [`ClientLoginToken`]: `GoogleLogin auth=<token>`
//! - [`AuthSubToken`]: `AuthSub token=<token>`
//! - [`SecureAuthSubToken`]: AuthSub with a per-request RSA-SHA1 signature
//! - [`OAuthToken`]: OAuth 1.0 signed header
//!
//! [`Token`] wraps any of them behind one interface.

mod auth_sub;
mod client_login;
mod oauth;

use std::collections::HashMap;
use std::fmt;

pub use auth_sub::{AuthSubToken, SecureAuthSubToken};
pub use client_login::ClientLoginToken;
pub use oauth::OAuthToken;

use crate::error::AuthError;

/// Header label of ClientLogin tokens.
pub const PROGRAMMATIC_AUTH_LABEL: &str = "GoogleLogin auth=";

/// Header label of AuthSub tokens.
pub const AUTHSUB_AUTH_LABEL: &str = "AuthSub token=";

/// HTTP header name the tokens produce.
pub const AUTHORIZATION: &str = "Authorization";

/// Value of an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader {
    value: String,
}

impl AuthHeader {
    pub(crate) fn new(value: String) -> Self {
        Self { value }
    }

    /// Header name, always `Authorization`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        AUTHORIZATION
    }

    /// Header value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// One-entry header map.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        HashMap::from([(AUTHORIZATION.to_owned(), self.value)])
    }
}

impl fmt::Display for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// True if `scope` starts with one of `scopes`. An empty entry matches every scope.
fn matches_any_scope(scopes: &[String], scope: &str) -> bool {
    scopes
        .iter()
        .any(|prefix| scope.starts_with(prefix.as_str()))
}

/// Any of the supported credential tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// ClientLogin token.
    ClientLogin(ClientLoginToken),
    /// AuthSub token.
    AuthSub(AuthSubToken),
    /// AuthSub token signed per request with RSA-SHA1.
    SecureAuthSub(SecureAuthSubToken),
    /// OAuth 1.0 token.
    OAuth(OAuthToken),
}

impl Token {
    /// Serialized token, `None` when the token is empty.
    #[must_use]
    pub fn token_string(&self) -> Option<String> {
        let raw = match self {
            Self::ClientLogin(token) => token.token_string().to_owned(),
            Self::AuthSub(token) => token.token_string().to_owned(),
            Self::SecureAuthSub(token) => token.token_string().to_owned(),
            Self::OAuth(token) => return token.token_string(),
        };
        (!raw.is_empty()).then_some(raw)
    }

    /// Replace the token value from its serialized form.
    pub fn set_token_string(&mut self, token_string: &str) {
        match self {
            Self::ClientLogin(token) => token.set_token_string(token_string),
            Self::AuthSub(token) => token.set_token_string(token_string),
            Self::SecureAuthSub(token) => token.set_token_string(token_string),
            Self::OAuth(token) => token.set_token_string(token_string),
        }
    }

    /// `Authorization` header for a request. OAuth tokens use an empty realm.
    pub fn auth_header(&self, method: &str, url: &str) -> Result<AuthHeader, AuthError> {
        match self {
            Self::ClientLogin(token) => Ok(token.auth_header()),
            Self::AuthSub(token) => Ok(token.auth_header()),
            Self::SecureAuthSub(token) => token.auth_header(method, url),
            Self::OAuth(token) => token.auth_header(method, url, ""),
        }
    }

    /// Whether the token may be used for `scope`.
    #[must_use]
    pub fn valid_for_scope(&self, scope: &str) -> bool {
        match self {
            Self::ClientLogin(token) => token.valid_for_scope(scope),
            Self::AuthSub(token) => token.valid_for_scope(scope),
            Self::SecureAuthSub(token) => token.valid_for_scope(scope),
            Self::OAuth(token) => token.valid_for_scope(scope),
        }
    }
}

impl From<ClientLoginToken> for Token {
    fn from(token: ClientLoginToken) -> Self {
        Self::ClientLogin(token)
    }
}

impl From<AuthSubToken> for Token {
    fn from(token: AuthSubToken) -> Self {
        Self::AuthSub(token)
    }
}

impl From<SecureAuthSubToken> for Token {
    fn from(token: SecureAuthSubToken) -> Self {
        Self::SecureAuthSub(token)
    }
}

impl From<OAuthToken> for Token {
    fn from(token: OAuthToken) -> Self {
        Self::OAuth(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::tests::TEST_PKCS8_KEY;
    use pretty_assertions::assert_eq;

    fn all_tokens() -> Vec<Token> {
        vec![
            ClientLoginToken::new("foo").into(),
            AuthSubToken::new("foo").into(),
            SecureAuthSubToken::new(TEST_PKCS8_KEY, Some("foo")).into(),
            OAuthToken::new(Some("key"), Some("secret")).into(),
        ]
    }

    #[test]
    fn test_set_token_string_is_idempotent() {
        for token in all_tokens() {
            let mut reparsed = token.clone();
            let serialized = token.token_string().unwrap();
            reparsed.set_token_string(&serialized);
            assert_eq!(reparsed, token);
        }
    }

    #[test]
    fn test_empty_tokens_have_no_string() {
        let client_login = Token::from(ClientLoginToken::default());
        assert_eq!(client_login.token_string(), None);
        assert_eq!(Token::from(OAuthToken::default()).token_string(), None);
    }

    #[test]
    fn test_unsigned_headers() {
        let client_login = Token::from(ClientLoginToken::new("abc"));
        let header = client_login.auth_header("GET", "http://example.com/").unwrap();
        assert_eq!(header.value(), "GoogleLogin auth=abc");

        let auth_sub = Token::from(AuthSubToken::new("abc"));
        let header = auth_sub.auth_header("GET", "http://example.com/").unwrap();
        assert_eq!(header.value(), "AuthSub token=abc");
    }

    #[test]
    fn test_oauth_without_input_params_fails() {
        let token = Token::from(OAuthToken::new(Some("key"), None));
        assert!(matches!(
            token.auth_header("GET", "http://example.com/"),
            Err(AuthError::Signing(_))
        ));
    }

    #[test]
    fn test_header_map() {
        let map = AuthHeader::new("AuthSub token=x".to_owned()).into_map();
        assert_eq!(
            map.get("Authorization").map(String::as_str),
            Some("AuthSub token=x")
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_scope_prefix_matching() {
        let scopes = vec!["http://www.blogger.com/feeds/".to_owned()];
        assert!(matches_any_scope(&scopes, "http://www.blogger.com/feeds/123"));
        assert!(!matches_any_scope(&scopes, "http://www.google.com/calendar/feeds/"));
    }

    #[test]
    fn test_empty_scope_matches_everything() {
        let token = Token::from(AuthSubToken::new("t").with_scopes(&[""]));
        assert!(token.valid_for_scope("http://www.google.com/calendar/feeds/"));
        assert!(token.valid_for_scope(""));
    }
}
