//! Error types for credential construction and request signing.

/// Error returned by fallible authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// URL could not be parsed.
    #[error("malformed URL")]
    MalformedUrl(#[from] url::ParseError),

    /// A required parameter is missing from a token or response.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Request signing failed.
    #[error("signing failed")]
    Signing(#[from] SigningError),

    /// OAuth input parameters are inconsistent.
    #[error("invalid OAuth configuration")]
    Configuration(#[from] ConfigurationError),

    /// Endpoint configuration could not be parsed.
    #[error("invalid endpoint configuration")]
    Endpoints(#[from] toml::de::Error),
}

/// Error while computing a request signature.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SigningError {
    /// Token has no OAuth input parameters to sign with.
    #[error("token has no OAuth input parameters")]
    MissingInputParams,

    /// RSA private key could not be parsed.
    #[error("RSA key error")]
    RsaKey(#[from] RsaKeyError),

    /// RSA signature computation failed.
    #[error("RSA signature error")]
    Rsa(#[from] rsa::signature::Error),

    /// HMAC key was rejected.
    #[error("invalid HMAC key length")]
    HmacKey(#[from] hmac::digest::InvalidLength),
}

/// RSA key loading/parsing error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// PKCS#1 key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 key parsing error.
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),
}

/// Signature method configured without the secret it needs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// HMAC-SHA1 requires a consumer secret.
    #[error("HMAC-SHA1 requires a consumer secret")]
    MissingConsumerSecret,

    /// RSA-SHA1 requires an RSA private key.
    #[error("RSA-SHA1 requires an RSA private key")]
    MissingRsaKey,
}
