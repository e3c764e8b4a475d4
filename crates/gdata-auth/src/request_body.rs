//! ClientLogin request bodies.

use crate::codec::{Encoding, encode_params};
use crate::extract::get_client_login_token;
use crate::token::PROGRAMMATIC_AUTH_LABEL;

/// Account type sent when the caller does not choose one.
pub const DEFAULT_ACCOUNT_TYPE: &str = "HOSTED_OR_GOOGLE";

/// Optional fields of a ClientLogin request.
#[derive(Debug, Clone)]
pub struct ClientLoginOptions {
    /// `GOOGLE`, `HOSTED` or `HOSTED_OR_GOOGLE`.
    pub account_type: String,
    /// Token from a previous `CaptchaRequired` response.
    pub captcha_token: Option<String>,
    /// The user's answer to that captcha.
    pub captcha_response: Option<String>,
}

impl Default for ClientLoginOptions {
    fn default() -> Self {
        Self {
            account_type: DEFAULT_ACCOUNT_TYPE.to_owned(),
            captcha_token: None,
            captcha_response: None,
        }
    }
}

/// Form-encoded body for a ClientLogin POST.
///
/// Captcha fields are sent only when both the token and the response are set.
pub fn generate_client_login_request_body(
    email: &str,
    password: &str,
    service: &str,
    source: &str,
    options: &ClientLoginOptions,
) -> String {
    let mut params = vec![
        ("Email", email),
        ("Passwd", password),
        ("accountType", options.account_type.as_str()),
        ("service", service),
        ("source", source),
    ];
    if let (Some(captcha_token), Some(captcha_response)) =
        (&options.captcha_token, &options.captcha_response)
    {
        params.push(("logintoken", captcha_token));
        params.push(("logincaptcha", captcha_response));
    }
    encode_params(params, Encoding::Form)
}

/// `GoogleLogin auth=<token>` header value from a ClientLogin response body.
pub fn generate_client_login_auth_token(http_body: &str) -> Option<String> {
    get_client_login_token(http_body).map(|token| format!("{PROGRAMMATIC_AUTH_LABEL}{token}"))
}
