//! Turn response bodies and redirect URLs back into tokens.
//!
//! A redirect URL without a token is an expected outcome, so the URL
//! extractors return `None` instead of failing.

use crate::builders::{AUTH_SUB_SCOPES_PARAM, OAUTH_TOKEN_SCOPE_PARAM};
use crate::codec::{first_value, parse_query_or_body, raw_pairs};
use crate::error::AuthError;
use crate::parsed_url::ParsedUrl;
use crate::token::{
    AUTHSUB_AUTH_LABEL, AuthSubToken, ClientLoginToken, OAuthToken, SecureAuthSubToken,
};

/// Scope parameter older AuthSub `next` URLs carry.
const LEGACY_TOKEN_SCOPE_PARAM: &str = "token_scope";

/// Value of the first `<prefix>...` line of a line-delimited body.
fn body_line_value<'a>(http_body: &'a str, prefix: &str) -> Option<&'a str> {
    http_body.lines().find_map(|line| line.strip_prefix(prefix))
}

/// Parse a URL, logging instead of failing.
fn parse_redirect_url(url: &str) -> Option<ParsedUrl> {
    ParsedUrl::parse(url)
        .inspect_err(|e| tracing::debug!(error = %e, "Unparsable redirect URL"))
        .ok()
}

/// Space-separated scopes of a parameter; empty when the value is empty.
fn split_scopes(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_owned).collect()
}

/// Raw `token` query parameter of an AuthSub `next` URL.
///
/// The value is not decoded and is split on its first `=` only, so
/// `token==abc=` yields `=abc=`.
pub fn token_from_url(url: &str) -> Option<&str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    raw_pairs(query)
        .find(|(name, _)| *name == "token")
        .map(|(_, value)| value)
}

/// `AuthSub token=<token>` header value for the token in an AuthSub `next` URL.
pub fn auth_sub_token_from_url(url: &str) -> Option<String> {
    token_from_url(url).map(|token| format!("{AUTHSUB_AUTH_LABEL}{token}"))
}

/// `AuthSub token=<token>` header value from a `Token=...` response body.
///
/// Other lines, such as `Expiration=...`, are ignored.
pub fn auth_sub_token_from_http_body(http_body: &str) -> Option<String> {
    body_line_value(http_body, "Token=").map(|token| format!("{AUTHSUB_AUTH_LABEL}{token}"))
}

/// Token value and scopes from an AuthSub `next` URL.
fn auth_sub_parts(
    url: &str,
    scopes_param_prefix: Option<&str>,
) -> Option<(String, Vec<String>)> {
    let parsed = parse_redirect_url(url)?;
    let Some(token) = parsed.param("token") else {
        tracing::debug!("No AuthSub token in URL");
        return None;
    };
    let scopes_param = match scopes_param_prefix {
        Some(prefix) => parsed.param(prefix),
        None => parsed
            .param(AUTH_SUB_SCOPES_PARAM)
            .or_else(|| parsed.param(LEGACY_TOKEN_SCOPE_PARAM)),
    };
    let scopes = scopes_param.map(split_scopes).unwrap_or_default();
    Some((token.to_owned(), scopes))
}

/// AuthSub token from a `next` URL, with the scopes recorded in it.
///
/// Scopes are read from `scopes_param_prefix`, the parameter
/// [`generate_auth_sub_url`](crate::generate_auth_sub_url) was configured
/// with. `None` reads `auth_sub_scopes`, or the legacy `token_scope` when
/// that is absent. Returns `None` when the URL has no `token` parameter.
pub fn extract_auth_sub_token_from_url(
    url: &str,
    scopes_param_prefix: Option<&str>,
) -> Option<AuthSubToken> {
    let (token, scopes) = auth_sub_parts(url, scopes_param_prefix)?;
    Some(AuthSubToken::new(token).with_scopes(&scopes))
}

/// Like [`extract_auth_sub_token_from_url`], for a token requested with
/// `secure=1` and signed with `rsa_key` (PEM text).
pub fn extract_secure_auth_sub_token_from_url(
    url: &str,
    rsa_key: &str,
    scopes_param_prefix: Option<&str>,
) -> Option<SecureAuthSubToken> {
    let (token, scopes) = auth_sub_parts(url, scopes_param_prefix)?;
    Some(SecureAuthSubToken::new(rsa_key, Some(&token)).with_scopes(&scopes))
}

/// Raw `Auth=` value of a ClientLogin response body.
pub fn get_client_login_token(http_body: &str) -> Option<&str> {
    body_line_value(http_body, "Auth=")
}

/// ClientLogin token from a response body, restricted to `scopes`.
///
/// Returns `None` when the body has no `Auth=` line.
pub fn extract_client_login_token<S: AsRef<str>>(
    http_body: &str,
    scopes: &[S],
) -> Option<ClientLoginToken> {
    let token = get_client_login_token(http_body)?;
    Some(ClientLoginToken::new(token).with_scopes(scopes))
}

/// OAuth token from a callback URL.
///
/// Requires `oauth_token`. Scopes are read from `scopes_param_prefix`
/// (default `oauth_token_scope`); when that parameter is missing the token
/// simply has no scopes.
pub fn oauth_token_from_url(url: &str, scopes_param_prefix: Option<&str>) -> Option<OAuthToken> {
    let parsed = parse_redirect_url(url)?;
    let key = parsed.param("oauth_token")?;
    let scopes = parsed
        .param(scopes_param_prefix.unwrap_or(OAUTH_TOKEN_SCOPE_PARAM))
        .map(split_scopes)
        .unwrap_or_default();
    Some(OAuthToken::new(Some(key), None).with_scopes(&scopes))
}

/// OAuth token from a `&`-joined token endpoint response.
///
/// The first `oauth_token`/`oauth_token_secret` wins; all pairs are kept in
/// the token string.
pub fn oauth_token_from_http_body(http_body: &str) -> Result<OAuthToken, AuthError> {
    if first_value(&parse_query_or_body(http_body), "oauth_token").is_none() {
        return Err(AuthError::MissingParameter("oauth_token"));
    }
    let mut token = OAuthToken::default();
    token.set_token_string(http_body);
    Ok(token)
}
