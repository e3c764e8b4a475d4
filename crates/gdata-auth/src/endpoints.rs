//! Endpoint configuration.
//!
//! The builders fall back to the Google endpoints below. To target another
//! provider or a mock server, load an [`Endpoints`] value and derive the
//! builder options from it:
//!
//! ```
//! use gdata_auth::Endpoints;
//!
//! let endpoints = Endpoints::from_toml_str(
//!     r#"request_token_url = "http://localhost:8080/request-token""#,
//! )
//! .unwrap();
//! let options = endpoints.request_token_options();
//! assert_eq!(
//!     options.request_token_url.as_deref(),
//!     Some("http://localhost:8080/request-token")
//! );
//! ```

use serde::Deserialize;

use crate::builders::{
    AccessTokenOptions, AuthSubUrlOptions, AuthorizationUrlOptions, RequestTokenOptions,
};
use crate::error::AuthError;

/// Default OAuth request-token endpoint.
pub const GOOGLE_REQUEST_TOKEN_URL: &str = "https://www.google.com/accounts/OAuthGetRequestToken";
/// Default OAuth user-authorization endpoint.
pub const GOOGLE_AUTHORIZATION_URL: &str = "https://www.google.com/accounts/OAuthAuthorizeToken";
/// Default OAuth access-token endpoint.
pub const GOOGLE_ACCESS_TOKEN_URL: &str = "https://www.google.com/accounts/OAuthGetAccessToken";
/// Default AuthSub request endpoint.
pub const GOOGLE_AUTH_SUB_REQUEST_URL: &str = "https://www.google.com/accounts/AuthSubRequest";
/// Default ClientLogin endpoint.
pub const GOOGLE_CLIENT_LOGIN_URL: &str = "https://www.google.com/accounts/ClientLogin";

/// Authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// OAuth request-token endpoint.
    pub request_token_url: String,
    /// OAuth user-authorization endpoint.
    pub authorization_url: String,
    /// OAuth access-token endpoint.
    pub access_token_url: String,
    /// AuthSub request endpoint.
    pub auth_sub_request_url: String,
    /// ClientLogin endpoint, where the request body is POSTed.
    pub client_login_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            request_token_url: GOOGLE_REQUEST_TOKEN_URL.to_owned(),
            authorization_url: GOOGLE_AUTHORIZATION_URL.to_owned(),
            access_token_url: GOOGLE_ACCESS_TOKEN_URL.to_owned(),
            auth_sub_request_url: GOOGLE_AUTH_SUB_REQUEST_URL.to_owned(),
            client_login_url: GOOGLE_CLIENT_LOGIN_URL.to_owned(),
        }
    }
}

impl Endpoints {
    /// Parse endpoints from TOML. Missing keys keep the Google defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, AuthError> {
        Ok(toml::from_str(content)?)
    }

    /// Request-token options targeting these endpoints.
    #[must_use]
    pub fn request_token_options(&self) -> RequestTokenOptions {
        RequestTokenOptions {
            request_token_url: Some(self.request_token_url.clone()),
            ..RequestTokenOptions::default()
        }
    }

    /// Authorization-URL options targeting these endpoints.
    #[must_use]
    pub fn authorization_options(&self) -> AuthorizationUrlOptions {
        AuthorizationUrlOptions {
            authorization_url: Some(self.authorization_url.clone()),
            ..AuthorizationUrlOptions::default()
        }
    }

    /// Access-token options targeting these endpoints.
    #[must_use]
    pub fn access_token_options(&self) -> AccessTokenOptions {
        AccessTokenOptions {
            access_token_url: Some(self.access_token_url.clone()),
            ..AccessTokenOptions::default()
        }
    }

    /// AuthSub options targeting these endpoints.
    #[must_use]
    pub fn auth_sub_options(&self) -> AuthSubUrlOptions {
        AuthSubUrlOptions {
            request_url: Some(self.auth_sub_request_url.clone()),
            ..AuthSubUrlOptions::default()
        }
    }
}
