use std::fmt;
use std::sync::Arc;

use url::Url;

use super::{AuthHeader, matches_any_scope};
use crate::codec::{Encoding, encode_params, oauth_encode, parse_query_or_body};
use crate::error::{AuthError, SigningError};
use crate::nonce::Stamp;
use crate::params::OAuthInputParams;
use crate::signature;

/// Version sent in every signed header.
const OAUTH_VERSION: &str = "1.0";

/// OAuth 1.0 token (request or access token).
///
/// Serializes as `oauth_token=<key>&oauth_token_secret=<secret>`, emitting
/// only the parts that are present. When parsed from a string that repeats
/// a key, the first occurrence sets `key`/`secret` and every other pair is
/// kept and written back out after them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthToken {
    key: Option<String>,
    secret: Option<String>,
    extra_pairs: Vec<(String, String)>,
    scopes: Vec<String>,
    input_params: Option<Arc<OAuthInputParams>>,
}

impl OAuthToken {
    pub fn new(key: Option<&str>, secret: Option<&str>) -> Self {
        Self {
            key: key.map(str::to_owned),
            secret: secret.map(str::to_owned),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        self.scopes = scopes.iter().map(|s| s.as_ref().to_owned()).collect();
        self
    }

    /// Attach the consumer credentials headers are signed with.
    #[must_use]
    pub fn with_input_params(mut self, input_params: impl Into<Arc<OAuthInputParams>>) -> Self {
        self.input_params = Some(input_params.into());
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn input_params(&self) -> Option<&OAuthInputParams> {
        self.input_params.as_deref()
    }

    /// Serialized token, `None` when neither key, secret nor extra pairs exist.
    pub fn token_string(&self) -> Option<String> {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = &self.key {
            pairs.push(("oauth_token", key));
        }
        if let Some(secret) = &self.secret {
            pairs.push(("oauth_token_secret", secret));
        }
        pairs.extend(self.extra_pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        (!pairs.is_empty()).then(|| encode_params(pairs, Encoding::OAuth))
    }

    /// Replace key, secret and extra pairs from a `&`-joined string.
    pub fn set_token_string(&mut self, token_string: &str) {
        self.key = None;
        self.secret = None;
        self.extra_pairs.clear();
        for (name, value) in parse_query_or_body(token_string) {
            if name == "oauth_token" && self.key.is_none() {
                self.key = Some(value);
            } else if name == "oauth_token_secret" && self.secret.is_none() {
                self.secret = Some(value);
            } else {
                self.extra_pairs.push((name, value));
            }
        }
    }

    pub fn valid_for_scope(&self, scope: &str) -> bool {
        matches_any_scope(&self.scopes, scope)
    }

    /// OAuth `Authorization` header for a request, with fresh nonce and timestamp.
    ///
    /// Query parameters of `url` are signed but not repeated in the header.
    /// The token is omitted entirely when it has no key (2-legged OAuth).
    pub fn auth_header(
        &self,
        method: &str,
        url: &str,
        realm: &str,
    ) -> Result<AuthHeader, AuthError> {
        self.auth_header_with_stamp(method, url, realm, &Stamp::fresh())
    }

    /// OAuth `Authorization` header with a caller-supplied stamp.
    pub fn auth_header_with_stamp(
        &self,
        method: &str,
        url: &str,
        realm: &str,
        stamp: &Stamp,
    ) -> Result<AuthHeader, AuthError> {
        let input_params = self
            .input_params
            .as_deref()
            .ok_or(SigningError::MissingInputParams)?;

        let mut oauth_params = vec![("oauth_version", OAUTH_VERSION.to_owned())];
        if let Some(key) = &self.key {
            oauth_params.push(("oauth_token", key.clone()));
        }
        oauth_params.extend([
            ("oauth_nonce", stamp.nonce.clone()),
            ("oauth_timestamp", stamp.timestamp.to_string()),
            ("oauth_consumer_key", input_params.consumer_key().to_owned()),
            (
                "oauth_signature_method",
                input_params.signature_method().name().to_owned(),
            ),
        ]);

        let mut signed: Vec<(String, String)> = oauth_params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect();
        signed.extend(
            Url::parse(url)?
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
        let token_secret = self.secret.as_deref();
        let signature = signature::sign(method, url, &signed, input_params, token_secret)?;
        // Signature goes right after the timestamp.
        let position = oauth_params
            .iter()
            .position(|(k, _)| *k == "oauth_timestamp")
            .map_or(oauth_params.len(), |i| i + 1);
        oauth_params.insert(position, ("oauth_signature", signature));

        let mut header = format!(r#"OAuth realm="{realm}""#);
        for (k, v) in &oauth_params {
            header.push_str(&format!(r#", {k}="{}""#, oauth_encode(v)));
        }
        Ok(AuthHeader::new(header))
    }
}

impl fmt::Display for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token_string().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::tests::TEST_PKCS8_KEY;
    use pretty_assertions::assert_eq;

    const CONSUMER_KEY: &str = "www.yourwebapp.com";
    const CONSUMER_SECRET: &str = "qB1P2kCFDpRjF+/Iww4";

    fn parsed(token_string: &str) -> OAuthToken {
        let mut token = OAuthToken::default();
        token.set_token_string(token_string);
        token
    }

    #[test]
    fn test_key_and_secret() {
        let token = parsed("oauth_token=ABCD&oauth_token_secret=XYZ");
        assert_eq!(token.key(), Some("ABCD"));
        assert_eq!(token.secret(), Some("XYZ"));
        assert_eq!(
            token.token_string().as_deref(),
            Some("oauth_token=ABCD&oauth_token_secret=XYZ")
        );
    }

    #[test]
    fn test_duplicates_first_wins_and_pairs_survive() {
        let token_string = "oauth_token=ABCD&oauth_token_secret=XYZ&oauth_token=LMNO\
                            &ExtraParams=GarbageString";
        let token = parsed(token_string);
        assert_eq!(token.key(), Some("ABCD"));
        assert_eq!(token.secret(), Some("XYZ"));

        let serialized = token.token_string().unwrap();
        assert_eq!(serialized, token_string);
        assert_eq!(parsed(&serialized), token);
    }

    #[test]
    fn test_only_key_or_only_secret() {
        let token = parsed("oauth_token=ABCD");
        assert_eq!(token.token_string().as_deref(), Some("oauth_token=ABCD"));
        assert_eq!(token.secret(), None);

        let token = parsed("oauth_token_secret=XYZ");
        assert_eq!(
            token.token_string().as_deref(),
            Some("oauth_token_secret=XYZ")
        );
        assert_eq!(token.key(), None);
    }

    #[test]
    fn test_empty_string() {
        let token = parsed("");
        assert_eq!(token.token_string(), None);
        assert_eq!(token.key(), None);
        assert_eq!(token.secret(), None);
    }

    #[test]
    fn test_encoded_values_round_trip() {
        let token = OAuthToken::new(Some("a/b c"), Some("x+y"));
        let serialized = token.token_string().unwrap();
        assert_eq!(serialized, "oauth_token=a%2Fb%20c&oauth_token_secret=x%2By");
        assert_eq!(parsed(&serialized), token);
    }

    #[test]
    fn test_set_token_string_keeps_scopes_and_params() {
        let mut token = OAuthToken::new(Some("old"), None)
            .with_scopes(&["http://docs.google.com/feeds/"])
            .with_input_params(OAuthInputParams::hmac_sha1(CONSUMER_KEY, CONSUMER_SECRET));
        token.set_token_string("oauth_token=new");
        assert_eq!(token.key(), Some("new"));
        assert!(token.valid_for_scope("http://docs.google.com/feeds/x"));
        assert!(token.input_params().is_some());
    }

    #[test]
    fn test_rsa_auth_header_three_legged() {
        let token = OAuthToken::new(Some("ABCDDSFFDSG"), None)
            .with_input_params(OAuthInputParams::rsa_sha1(CONSUMER_KEY, TEST_PKCS8_KEY));
        let url = "http://dummy.com/?q=notebook&s=true";
        let header = token.auth_header("GET", url, "http://dummy.com").unwrap();
        let value = header.value();

        assert!(value.starts_with(r#"OAuth realm="http://dummy.com""#));
        assert!(value.contains(r#"oauth_version="1.0""#));
        assert!(value.contains(r#"oauth_token="ABCDDSFFDSG""#));
        assert!(value.contains(r#"oauth_nonce=""#));
        assert!(value.contains(r#"oauth_timestamp=""#));
        assert!(value.contains(r#"oauth_signature=""#));
        assert!(value.contains(r#"oauth_consumer_key="www.yourwebapp.com""#));
        assert!(value.contains(r#"oauth_signature_method="RSA-SHA1""#));
        assert!(!value.contains("notebook"));
    }

    #[test]
    fn test_hmac_auth_header_two_legged() {
        let token = OAuthToken::default()
            .with_input_params(OAuthInputParams::hmac_sha1(CONSUMER_KEY, CONSUMER_SECRET));
        let header = token
            .auth_header(
                "GET",
                "http://dummy.com/?xoauth_requestor_id=user@gmail.com&q=book",
                "",
            )
            .unwrap();
        let value = header.value();

        assert!(value.starts_with(r#"OAuth realm="""#));
        assert!(!value.contains("oauth_token="));
        assert!(value.contains(r#"oauth_signature_method="HMAC-SHA1""#));
        assert!(value.contains(r#"oauth_consumer_key="www.yourwebapp.com""#));
    }

    #[test]
    fn test_header_signature_is_reproducible() {
        let input_params = OAuthInputParams::hmac_sha1(CONSUMER_KEY, CONSUMER_SECRET);
        let token = OAuthToken::new(Some("tok"), Some("sec"))
            .with_input_params(input_params.clone());
        let stamp = Stamp::new("nonce123", 1_300_000_000);
        let url = "http://dummy.com/feeds?q=a+b";

        let header = token.auth_header_with_stamp("GET", url, "", &stamp).unwrap();
        let expected = signature::sign(
            "GET",
            url,
            &[
                ("oauth_version", "1.0"),
                ("oauth_token", "tok"),
                ("oauth_nonce", "nonce123"),
                ("oauth_timestamp", "1300000000"),
                ("oauth_consumer_key", CONSUMER_KEY),
                ("oauth_signature_method", "HMAC-SHA1"),
                ("q", "a b"),
            ],
            &input_params,
            Some("sec"),
        )
        .unwrap();

        let signature = oauth_encode(&expected);
        assert_eq!(
            header.value(),
            format!(
                "OAuth realm=\"\", oauth_version=\"1.0\", oauth_token=\"tok\", \
                 oauth_nonce=\"nonce123\", oauth_timestamp=\"1300000000\", \
                 oauth_signature=\"{signature}\", oauth_consumer_key=\"www.yourwebapp.com\", \
                 oauth_signature_method=\"HMAC-SHA1\""
            )
        );
        assert_eq!(
            header,
            token.auth_header_with_stamp("GET", url, "", &stamp).unwrap()
        );
    }
}
