//! URL builders for the AuthSub and OAuth 1.0 authorization steps.
//!
//! OAuth request-token and access-token URLs are signed; the authorization
//! URL and the AuthSub URLs are not. Every builder falls back to the Google
//! endpoints in [`crate::endpoints`] when its options carry no URL.

use std::collections::BTreeMap;

use url::Url;

use crate::codec::{Encoding, encode_params};
use crate::endpoints::{
    GOOGLE_ACCESS_TOKEN_URL, GOOGLE_AUTH_SUB_REQUEST_URL, GOOGLE_AUTHORIZATION_URL,
    GOOGLE_REQUEST_TOKEN_URL,
};
use crate::error::AuthError;
use crate::nonce::Stamp;
use crate::params::OAuthInputParams;
use crate::parsed_url::ParsedUrl;
use crate::signature;
use crate::token::OAuthToken;

/// Parameter the AuthSub `next` URL carries the requested scopes in.
pub const AUTH_SUB_SCOPES_PARAM: &str = "auth_sub_scopes";

/// Parameter the OAuth callback URL carries the requested scopes in.
pub const OAUTH_TOKEN_SCOPE_PARAM: &str = "oauth_token_scope";

/// HTTP method signed URLs are fetched with.
const SIGNED_URL_METHOD: &str = "GET";

/// Options of [`generate_oauth_request_token_url`].
#[derive(Debug, Clone, Default)]
pub struct RequestTokenOptions {
    /// Endpoint; defaults to [`GOOGLE_REQUEST_TOKEN_URL`].
    pub request_token_url: Option<String>,
    /// Extra parameters, overriding generated ones of the same name.
    pub extra_parameters: Vec<(String, String)>,
}

/// Options of [`generate_oauth_authorization_url`].
#[derive(Debug, Clone)]
pub struct AuthorizationUrlOptions {
    /// Endpoint; defaults to [`GOOGLE_AUTHORIZATION_URL`].
    pub authorization_url: Option<String>,
    /// Sent as `oauth_callback` when set.
    pub callback_url: Option<String>,
    /// Extra query parameters.
    pub extra_params: Vec<(String, String)>,
    /// Append the token scopes to the callback URL.
    pub include_scopes_in_callback: bool,
    /// Name of the callback parameter holding the scopes.
    ///
    /// Defaults to [`OAUTH_TOKEN_SCOPE_PARAM`] rather than the historical
    /// `scope`, so the callback is read back by
    /// [`oauth_token_from_url`](crate::oauth_token_from_url) without a prefix.
    pub scopes_param_prefix: String,
}

impl Default for AuthorizationUrlOptions {
    fn default() -> Self {
        Self {
            authorization_url: None,
            callback_url: None,
            extra_params: Vec::new(),
            include_scopes_in_callback: false,
            scopes_param_prefix: OAUTH_TOKEN_SCOPE_PARAM.to_owned(),
        }
    }
}

/// Options of [`generate_oauth_access_token_url`].
#[derive(Debug, Clone)]
pub struct AccessTokenOptions {
    /// Endpoint; defaults to [`GOOGLE_ACCESS_TOKEN_URL`].
    pub access_token_url: Option<String>,
    /// Value of `oauth_version`.
    pub oauth_version: String,
    /// OAuth 1.0a verifier returned with the authorized request token.
    pub oauth_verifier: Option<String>,
}

impl Default for AccessTokenOptions {
    fn default() -> Self {
        Self {
            access_token_url: None,
            oauth_version: "1.0".to_owned(),
            oauth_verifier: None,
        }
    }
}

/// Options of the AuthSub URL builders.
#[derive(Debug, Clone)]
pub struct AuthSubUrlOptions {
    /// Request a secure (RSA-signed) token.
    pub secure: bool,
    /// Request a token that can be upgraded to a session token.
    pub session: bool,
    /// Endpoint; defaults to [`GOOGLE_AUTH_SUB_REQUEST_URL`].
    pub request_url: Option<String>,
    /// Hosted domain (`hd`), `default` for Google accounts.
    pub domain: String,
    /// Parameter added to `next` by [`generate_auth_sub_url`].
    pub scopes_param_prefix: String,
}

impl Default for AuthSubUrlOptions {
    fn default() -> Self {
        Self {
            secure: false,
            session: true,
            request_url: None,
            domain: "default".to_owned(),
            scopes_param_prefix: AUTH_SUB_SCOPES_PARAM.to_owned(),
        }
    }
}

fn join_scopes<S: AsRef<str>>(scopes: &[S]) -> String {
    scopes
        .iter()
        .map(|scope| scope.as_ref())
        .collect::<Vec<&str>>()
        .join(" ")
}

const fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Append a form-encoded `name=value` to the query of `url`.
///
/// The rest of `url` is kept byte for byte; a fragment stays at the end.
fn append_query_param(url: &str, name: &str, value: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = match base.split_once('?') {
        None => "?",
        Some((_, query)) if query.is_empty() || query.ends_with('&') => "",
        Some(_) => "&",
    };
    let param = encode_params([(name, value)], Encoding::Form);

    let mut appended = format!("{base}{separator}{param}");
    if let Some(fragment) = fragment {
        appended.push('#');
        appended.push_str(fragment);
    }
    appended
}

/// Parameters every signed OAuth URL starts from.
fn oauth_defaults(input_params: &OAuthInputParams, stamp: &Stamp) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "oauth_consumer_key".to_owned(),
            input_params.consumer_key().to_owned(),
        ),
        ("oauth_nonce".to_owned(), stamp.nonce.clone()),
        ("oauth_timestamp".to_owned(), stamp.timestamp.to_string()),
        ("oauth_version".to_owned(), "1.0".to_owned()),
    ])
}

/// Add `params` to `endpoint`, then sign the whole parameter set.
fn signed_url(
    endpoint: &str,
    params: BTreeMap<String, String>,
    input_params: &OAuthInputParams,
    token_secret: Option<&str>,
) -> Result<ParsedUrl, AuthError> {
    let mut url = ParsedUrl::parse(endpoint)?;
    url.params.extend(params);
    url.params.insert(
        "oauth_signature_method".to_owned(),
        input_params.signature_method().name().to_owned(),
    );
    let signature = signature::sign(
        SIGNED_URL_METHOD,
        &url.base_url(),
        &url.param_pairs(),
        input_params,
        token_secret,
    )?;
    url.params.insert("oauth_signature".to_owned(), signature);
    Ok(url)
}

/// Signed URL to fetch an OAuth request token for `scopes`.
pub fn generate_oauth_request_token_url<S: AsRef<str>>(
    input_params: &OAuthInputParams,
    scopes: &[S],
    options: &RequestTokenOptions,
) -> Result<ParsedUrl, AuthError> {
    let endpoint = options
        .request_token_url
        .as_deref()
        .unwrap_or(GOOGLE_REQUEST_TOKEN_URL);
    let mut params = oauth_defaults(input_params, &Stamp::fresh());
    params.insert("scope".to_owned(), join_scopes(scopes));
    params.extend(options.extra_parameters.iter().cloned());

    tracing::debug!(
        endpoint,
        scope_count = scopes.len(),
        "Building request token URL"
    );
    signed_url(endpoint, params, input_params, None)
}

/// Unsigned URL the user visits to authorize `request_token`.
///
/// With `include_scopes_in_callback`, the token scopes are form-encoded
/// into the callback URL under `scopes_param_prefix` so the callback can
/// recover them.
pub fn generate_oauth_authorization_url(
    request_token: &OAuthToken,
    options: &AuthorizationUrlOptions,
) -> Result<ParsedUrl, AuthError> {
    let key = request_token
        .key()
        .ok_or(AuthError::MissingParameter("oauth_token"))?;
    let mut url = ParsedUrl::parse(
        options
            .authorization_url
            .as_deref()
            .unwrap_or(GOOGLE_AUTHORIZATION_URL),
    )?;
    url.params.extend(options.extra_params.iter().cloned());
    url.params.insert("oauth_token".to_owned(), key.to_owned());

    if let Some(callback_url) = &options.callback_url {
        let callback = if options.include_scopes_in_callback {
            append_query_param(
                callback_url,
                &options.scopes_param_prefix,
                &join_scopes(request_token.scopes()),
            )
        } else {
            callback_url.clone()
        };
        url.params.insert("oauth_callback".to_owned(), callback);
    }
    Ok(url)
}

/// Signed URL to exchange an authorized request token for an access token.
pub fn generate_oauth_access_token_url(
    authorized_request_token: &OAuthToken,
    input_params: &OAuthInputParams,
    options: &AccessTokenOptions,
) -> Result<ParsedUrl, AuthError> {
    let key = authorized_request_token
        .key()
        .ok_or(AuthError::MissingParameter("oauth_token"))?;
    let endpoint = options
        .access_token_url
        .as_deref()
        .unwrap_or(GOOGLE_ACCESS_TOKEN_URL);

    let mut params = oauth_defaults(input_params, &Stamp::fresh());
    params.insert("oauth_token".to_owned(), key.to_owned());
    params.insert("oauth_version".to_owned(), options.oauth_version.clone());
    if let Some(verifier) = &options.oauth_verifier {
        params.insert("oauth_verifier".to_owned(), verifier.clone());
    }

    tracing::debug!(endpoint, "Building access token URL");
    signed_url(
        endpoint,
        params,
        input_params,
        authorized_request_token.secret(),
    )
}

/// AuthSub request URL for a single scope.
///
/// Parameters are form-encoded and appended with `&` when `request_url`
/// already has a query.
pub fn generate_auth_sub_request_url(
    next: &str,
    scope: &str,
    options: &AuthSubUrlOptions,
) -> String {
    let request_url = options
        .request_url
        .as_deref()
        .unwrap_or(GOOGLE_AUTH_SUB_REQUEST_URL);
    let query = encode_params(
        [
            ("next", next),
            ("scope", scope),
            ("secure", flag(options.secure)),
            ("session", flag(options.session)),
            ("hd", options.domain.as_str()),
        ],
        Encoding::Form,
    );
    let separator = if request_url.contains('?') { '&' } else { '?' };
    format!("{request_url}{separator}{query}")
}

/// AuthSub request URL for several scopes.
///
/// The scopes are also appended to `next` (under `scopes_param_prefix`), so
/// the token delivered to `next` can be matched back to what was requested.
/// The rest of `next`, repeated parameters and fragment included, is kept
/// as given.
pub fn generate_auth_sub_url<S: AsRef<str>>(
    next: &str,
    scopes: &[S],
    options: &AuthSubUrlOptions,
) -> Result<ParsedUrl, AuthError> {
    Url::parse(next)?;
    let scopes_string = join_scopes(scopes);
    let next = append_query_param(next, &options.scopes_param_prefix, &scopes_string);

    let mut url = ParsedUrl::parse(
        options
            .request_url
            .as_deref()
            .unwrap_or(GOOGLE_AUTH_SUB_REQUEST_URL),
    )?;
    url.params.extend([
        ("next".to_owned(), next),
        ("scope".to_owned(), scopes_string),
        ("session".to_owned(), flag(options.session).to_owned()),
        ("secure".to_owned(), flag(options.secure).to_owned()),
        ("hd".to_owned(), options.domain.clone()),
    ]);
    Ok(url)
}
