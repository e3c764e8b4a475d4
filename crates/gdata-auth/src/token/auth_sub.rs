use std::fmt;

use super::{AUTHSUB_AUTH_LABEL, AuthHeader, matches_any_scope};
use crate::error::AuthError;
use crate::nonce::Stamp;
use crate::signature::sign_rsa_sha1;

/// AuthSub token and the scope prefixes it was issued for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSubToken {
    token_string: String,
    scopes: Vec<String>,
}

impl AuthSubToken {
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

    /// `AuthSub token=<token>`
    pub fn auth_header(&self) -> AuthHeader {
        AuthHeader::new(format!("{AUTHSUB_AUTH_LABEL}{}", self.token_string))
    }

    /// True if `scope` starts with one of the authorized scopes.
    pub fn valid_for_scope(&self, scope: &str) -> bool {
        matches_any_scope(&self.scopes, scope)
    }
}

impl fmt::Display for AuthSubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token_string)
    }
}

/// AuthSub token whose every request carries an RSA-SHA1 signature.
///
/// The signed data is `METHOD URL TIMESTAMP NONCE`, space separated, in the
/// order the AuthSub protocol defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureAuthSubToken {
    inner: AuthSubToken,
    rsa_key: String,
}

impl SecureAuthSubToken {
    /// Create a token signing with `rsa_key` (PEM text).
    ///
    /// The key is parsed when a header is signed, so a malformed key
    /// surfaces as a signing error there.
    pub fn new(rsa_key: impl Into<String>, token_string: Option<&str>) -> Self {
        Self {
            inner: AuthSubToken::new(token_string.unwrap_or_default()),
            rsa_key: rsa_key.into(),
        }
    }

    #[must_use]
    pub fn with_scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        self.inner = self.inner.with_scopes(scopes);
        self
    }

    pub fn token_string(&self) -> &str {
        self.inner.token_string()
    }

    pub fn set_token_string(&mut self, token_string: &str) {
        self.inner.set_token_string(token_string);
    }

    pub fn scopes(&self) -> &[String] {
        self.inner.scopes()
    }

    pub fn valid_for_scope(&self, scope: &str) -> bool {
        self.inner.valid_for_scope(scope)
    }

    /// Signed header for one request, with a fresh nonce and timestamp.
    pub fn auth_header(&self, method: &str, url: &str) -> Result<AuthHeader, AuthError> {
        self.auth_header_with_stamp(method, url, &Stamp::fresh())
    }

    /// Signed header for one request with a caller-supplied stamp.
    pub fn auth_header_with_stamp(
        &self,
        method: &str,
        url: &str,
        stamp: &Stamp,
    ) -> Result<AuthHeader, AuthError> {
        let data = format!(
            "{} {url} {} {}",
            method.to_uppercase(),
            stamp.timestamp,
            stamp.nonce
        );
        let sig = sign_rsa_sha1(&self.rsa_key, &data)?;
        tracing::debug!(method, "Signed secure AuthSub request");
        Ok(AuthHeader::new(format!(
            r#"AuthSub token="{}", sigalg="rsa-sha1", data="{data}", sig="{sig}""#,
            self.inner.token_string()
        )))
    }
}

impl fmt::Display for SecureAuthSubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
