//! OAuth 1.0 signature generation (RFC 5849).

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;
use url::Url;

use crate::codec::oauth_encode;
use crate::error::{AuthError, SigningError};
use crate::key::load_private_key;
use crate::params::OAuthInputParams;

/// Name of the signature parameter, never part of the base string.
const SIGNATURE_PARAM: &str = "oauth_signature";

/// Signature method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthSignatureMethod {
    /// HMAC-SHA1 keyed by consumer secret and token secret.
    HmacSha1,
    /// RSA-SHA1 (PKCS#1 v1.5) with the consumer's private key.
    RsaSha1,
}

impl OAuthSignatureMethod {
    /// Value of the `oauth_signature_method` parameter.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::RsaSha1 => "RSA-SHA1",
        }
    }
}

/// A signature method bound to its key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod<'a> {
    /// HMAC-SHA1 with the consumer secret.
    HmacSha1 {
        /// Consumer secret (first half of the HMAC key).
        consumer_secret: &'a str,
    },
    /// RSA-SHA1 with a PEM private key.
    RsaSha1 {
        /// PEM text of the private key.
        rsa_key: &'a str,
    },
}

impl SignatureMethod<'_> {
    /// Selector for this method.
    #[must_use]
    pub const fn kind(&self) -> OAuthSignatureMethod {
        match self {
            Self::HmacSha1 { .. } => OAuthSignatureMethod::HmacSha1,
            Self::RsaSha1 { .. } => OAuthSignatureMethod::RsaSha1,
        }
    }

    /// Value of the `oauth_signature_method` parameter.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Sign a base string and return the base64 signature.
    ///
    /// `token_secret` only affects HMAC-SHA1; it is the empty string when absent.
    pub fn sign(
        &self,
        base_string: &str,
        token_secret: Option<&str>,
    ) -> Result<String, SigningError> {
        match self {
            Self::HmacSha1 { consumer_secret } => {
                let key = format!(
                    "{}&{}",
                    oauth_encode(consumer_secret),
                    oauth_encode(token_secret.unwrap_or_default())
                );
                sign_hmac_sha1(&key, base_string)
            }
            Self::RsaSha1 { rsa_key } => sign_rsa_sha1(rsa_key, base_string),
        }
    }
}

/// Sign data with HMAC-SHA1 and return base64-encoded digest.
pub fn sign_hmac_sha1(key: &str, data: &str) -> Result<String, SigningError> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())?;
    mac.update(data.as_bytes());
    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Sign data with RSA-SHA1 and return base64-encoded signature.
pub fn sign_rsa_sha1(pem: &str, data: &str) -> Result<String, SigningError> {
    let private_key = load_private_key(pem)?;
    let signing_key = SigningKey::<Sha1>::new(private_key);
    let signature = signing_key.try_sign(data.as_bytes())?;
    Ok(BASE64_STANDARD.encode(signature.to_bytes()))
}

/// Base URL per RFC 5849 Section 3.4.1.2: scheme, host, non-default port and
/// path, without query or fragment.
pub fn normalize_url(url: &str) -> Result<String, AuthError> {
    let parsed = Url::parse(url)?;
    let mut normalized = format!(
        "{}://{}",
        parsed.scheme(),
        parsed.host_str().unwrap_or_default()
    );
    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized.push_str(parsed.path());
    Ok(normalized)
}

/// Normalize parameters: encode keys/values, sort by key then value.
fn normalize_parameters<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k.as_ref() != SIGNATURE_PARAM)
        .map(|(k, v)| (oauth_encode(k.as_ref()), oauth_encode(v.as_ref())))
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build OAuth signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `HTTP_METHOD&encoded_base_url&encoded_parameters`. The query of
/// `url` is dropped; callers pass query parameters in `params`.
pub fn build_base_string<K, V>(
    method: &str,
    url: &str,
    params: &[(K, V)],
) -> Result<String, AuthError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    Ok(format!(
        "{}&{}&{}",
        method.to_uppercase(),
        oauth_encode(&normalize_url(url)?),
        oauth_encode(&normalize_parameters(params))
    ))
}

/// Compute the `oauth_signature` of a request.
///
/// # Arguments
/// * `method` - HTTP method (GET, POST, etc.)
/// * `url` - Request URL; its query is ignored
/// * `params` - All `oauth_*` and request parameters
/// * `input_params` - Consumer credentials and signature method
/// * `token_secret` - Secret of the token the request is made with
pub fn sign<K, V>(
    method: &str,
    url: &str,
    params: &[(K, V)],
    input_params: &OAuthInputParams,
    token_secret: Option<&str>,
) -> Result<String, AuthError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base_string = build_base_string(method, url, params)?;
    let signature_method = input_params.signature_method();
    tracing::debug!(
        signature_method = signature_method.name(),
        param_count = params.len(),
        "Signing OAuth request"
    );
    Ok(signature_method.sign(&base_string, token_secret)?)
}
