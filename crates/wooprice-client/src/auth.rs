//! Request authentication for the WooCommerce REST API.
//!
//! Plain-HTTP stores require one-legged OAuth 1.0a (RFC 5849) signatures;
//! HTTPS stores accept the consumer key and secret as HTTP basic auth.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::{Alphanumeric, SampleString};
use reqwest::{Method, Url};
use sha2::Sha256;

use crate::error::WooError;

/// RFC 3986 unreserved characters stay literal; everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const SIGNATURE_METHOD: &str = "HMAC-SHA256";
const NONCE_LEN: usize = 32;

/// Consumer key/secret pair issued by the store.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl Credentials {
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .finish()
    }
}

/// Builds an `Authorization: OAuth ...` header value for one request with a
/// fresh nonce and the current timestamp.
///
/// # Errors
///
/// Returns [`WooError::Signing`] if the HMAC cannot be initialized.
pub(crate) fn oauth_header(
    method: &Method,
    url: &Url,
    credentials: &Credentials,
) -> Result<String, WooError> {
    let nonce = Alphanumeric.sample_string(&mut rand::rng(), NONCE_LEN);
    let timestamp = chrono::Utc::now().timestamp();
    sign(method, url, credentials, &nonce, timestamp)
}

/// Deterministic core of [`oauth_header`].
fn sign(
    method: &Method,
    url: &Url,
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Result<String, WooError> {
    let timestamp = timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();
    let parameter_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.as_str(),
        encode(&base_string_uri(url)),
        encode(&parameter_string)
    );

    let signing_key = format!("{}&", encode(&credentials.consumer_secret));
    let mut mac = Hmac::<Sha256>::new_from_slice(signing_key.as_bytes())
        .map_err(|e| WooError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(&str, &str)> = oauth_params.to_vec();
    header_params.push(("oauth_signature", signature.as_str()));
    header_params.sort_unstable();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}

/// Scheme, authority and path of `url`, without query or fragment.
fn base_string_uri(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.to_string()
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}
