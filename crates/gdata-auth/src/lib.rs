//! Credentials for GData services: ClientLogin, AuthSub and OAuth 1.0.
//!
//! The crate builds the request material each scheme needs (ClientLogin
//! POST bodies, AuthSub and OAuth redirect URLs, signed `Authorization`
//! headers) and parses the responses back into tokens. It does no I/O:
//! the caller sends the requests with whatever HTTP client it uses.
//!
//! ## OAuth 1.0
//!
//! ```
//! use gdata_auth::{
//!     AuthorizationUrlOptions, OAuthInputParams, RequestTokenOptions,
//!     generate_oauth_authorization_url, generate_oauth_request_token_url,
//!     oauth_token_from_http_body,
//! };
//!
//! let input_params = OAuthInputParams::hmac_sha1("example.com", "consumer-secret");
//! let url = generate_oauth_request_token_url(
//!     &input_params,
//!     &["http://docs.google.com/feeds/"],
//!     &RequestTokenOptions::default(),
//! )?;
//! assert!(url.param("oauth_signature").is_some());
//!
//! // Body returned by the request-token endpoint.
//! let request_token = oauth_token_from_http_body("oauth_token=ab12&oauth_token_secret=cd34")?
//!     .with_scopes(&["http://docs.google.com/feeds/"]);
//! let authorize = generate_oauth_authorization_url(
//!     &request_token,
//!     &AuthorizationUrlOptions::default(),
//! )?;
//! assert_eq!(authorize.param("oauth_token"), Some("ab12"));
//! # Ok::<(), gdata_auth::AuthError>(())
//! ```
//!
//! Signed headers are produced by [`OAuthToken::auth_header`] once the token
//! carries its [`OAuthInputParams`].
//!
//! ## Logging
//!
//! Signing and extraction emit `tracing` debug events. Token values, secrets
//! and signatures are never logged.

mod builders;
pub mod codec;
mod endpoints;
mod error;
mod extract;
pub(crate) mod key;
pub mod nonce;
mod params;
mod parsed_url;
mod request_body;
pub mod signature;
mod token;

pub use builders::{
    AUTH_SUB_SCOPES_PARAM, AccessTokenOptions, AuthSubUrlOptions, AuthorizationUrlOptions,
    OAUTH_TOKEN_SCOPE_PARAM, RequestTokenOptions, generate_auth_sub_request_url,
    generate_auth_sub_url, generate_oauth_access_token_url, generate_oauth_authorization_url,
    generate_oauth_request_token_url,
};
pub use endpoints::{
    Endpoints, GOOGLE_ACCESS_TOKEN_URL, GOOGLE_AUTH_SUB_REQUEST_URL, GOOGLE_AUTHORIZATION_URL,
    GOOGLE_CLIENT_LOGIN_URL, GOOGLE_REQUEST_TOKEN_URL,
};
pub use error::{AuthError, ConfigurationError, RsaKeyError, SigningError};
pub use extract::{
    auth_sub_token_from_http_body, auth_sub_token_from_url, extract_auth_sub_token_from_url,
    extract_client_login_token, extract_secure_auth_sub_token_from_url, get_client_login_token,
    oauth_token_from_http_body, oauth_token_from_url, token_from_url,
};
pub use key::load_private_key;
pub use params::{Consumer, OAuthInputParams};
pub use parsed_url::ParsedUrl;
pub use request_body::{
    ClientLoginOptions, DEFAULT_ACCOUNT_TYPE, generate_client_login_auth_token,
    generate_client_login_request_body,
};
pub use signature::{OAuthSignatureMethod, SignatureMethod};
pub use token::{
    AUTHORIZATION, AUTHSUB_AUTH_LABEL, AuthHeader, AuthSubToken, ClientLoginToken, OAuthToken,
    PROGRAMMATIC_AUTH_LABEL, SecureAuthSubToken, Token,
};
