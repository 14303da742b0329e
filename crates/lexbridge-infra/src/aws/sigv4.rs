//! AWS Signature Version 4 for JSON `POST` requests.
//!
//! Only what the Lex runtime and DynamoDB JSON APIs need: a `POST` with an
//! empty query string, a fixed set of headers and an in-memory payload.
//!
//! Signing steps:
//! 1. canonical request (method, path, query, headers, payload hash)
//! 2. string to sign (algorithm, timestamp, credential scope, request hash)
//! 3. signing key derived from the secret, date, region and service
//! 4. hex HMAC-SHA256 of the string to sign

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use super::AwsCredentials;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Headers to attach to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub content_sha256: String,
    pub security_token: Option<String>,
}

impl SignedHeaders {
    /// Header name/value pairs ready to be set on an HTTP request.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("authorization", self.authorization.clone()),
            ("x-amz-date", self.amz_date.clone()),
            ("x-amz-content-sha256", self.content_sha256.clone()),
        ];
        if let Some(token) = &self.security_token {
            pairs.push(("x-amz-security-token", token.clone()));
        }
        pairs
    }
}

/// Everything that scopes a signature besides the request itself.
pub struct SigningContext<'a> {
    pub credentials: &'a AwsCredentials,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

/// A `POST` request to be signed.
pub struct PostRequest<'a> {
    /// `host[:port]` exactly as sent in the `Host` header.
    pub host: &'a str,
    /// Path as sent on the wire (already URI-encoded once).
    pub path: &'a str,
    /// Additional headers covered by the signature, e.g. `content-type`.
    pub headers: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

/// Sign a `POST` request.
pub fn sign_post(ctx: &SigningContext<'_>, request: &PostRequest<'_>) -> SignedHeaders {
    let amz_date = ctx.time.format("%Y%m%dT%H%M%SZ").to_string();
    let date = ctx.time.format("%Y%m%d").to_string();
    let content_sha256 = sha256_hex(request.payload);
    let security_token = ctx
        .credentials
        .session_token
        .as_ref()
        .map(|t| t.expose_secret().to_string());

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
        .collect();
    headers.push(("host".to_string(), request.host.to_string()));
    headers.push(("x-amz-content-sha256".to_string(), content_sha256.clone()));
    headers.push(("x-amz-date".to_string(), amz_date.clone()));
    if let Some(token) = &security_token {
        headers.push(("x-amz-security-token".to_string(), token.clone()));
    }
    headers.sort();

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n{}\n\n{canonical_headers}\n{signed_headers}\n{content_sha256}",
        canonical_path(request.path)
    );

    let scope = format!("{date}/{}/{}/aws4_request", ctx.region, ctx.service);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let key = signing_key(
        ctx.credentials.secret_access_key.expose_secret(),
        &date,
        ctx.region,
        ctx.service,
    );
    let signature = hex_encode(&hmac_sha256(&key, string_to_sign.as_bytes()));

    SignedHeaders {
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            ctx.credentials.access_key_id
        ),
        amz_date,
        content_sha256,
        security_token,
    }
}

/// Derive the per-day, per-region, per-service signing key.
pub fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn uri_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Build a wire path from raw segments, encoding each one.
pub fn encode_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| format!("/{}", uri_encode(s)))
        .collect()
}

/// Non-S3 services sign the wire path with every segment encoded again.
fn canonical_path(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    path.split('/')
        .map(uri_encode)
        .collect::<Vec<_>>()
        .join("/")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex_encode(&Sha256::digest(data))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
