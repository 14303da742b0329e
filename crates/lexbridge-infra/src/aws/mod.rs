//! AWS credentials and request signing.

pub mod sigv4;

use reqwest::Url;
use secrecy::SecretString;

use lexbridge_types::error::ConfigError;

/// Static AWS credentials.
///
/// Secret parts are held as [`SecretString`] and only exposed while
/// computing a request signature.
///
/// Only the `AWS_*` environment variables are read. Shared profiles, the
/// ECS container endpoint and EC2 instance metadata are not consulted, so
/// a role-based deployment must export the role's keys (and session token)
/// into the environment before startup; otherwise startup fails with
/// [`ConfigError::Missing`].
#[derive(Debug)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: Option<SecretString>,
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::from(secret_access_key.into()),
            session_token: session_token.map(SecretString::from),
        }
    }

    /// Read `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
    /// `AWS_SESSION_TOKEN` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let access_key_id =
            non_empty("AWS_ACCESS_KEY_ID").ok_or(ConfigError::Missing("AWS_ACCESS_KEY_ID"))?;
        let secret_access_key = non_empty("AWS_SECRET_ACCESS_KEY")
            .ok_or(ConfigError::Missing("AWS_SECRET_ACCESS_KEY"))?;
        let session_token = non_empty("AWS_SESSION_TOKEN");

        Ok(Self::new(access_key_id, secret_access_key, session_token))
    }
}

/// Where a service is reached: scheme, host and optional port.
///
/// Any path on a custom endpoint URL is ignored; request paths are always
/// absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    origin: String,
    host: String,
}

impl Endpoint {
    /// Parse a custom endpoint such as `http://localhost:8000`.
    pub fn parse(name: &'static str, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        })?;
        let host = url.host_str().ok_or_else(|| ConfigError::Invalid {
            name,
            reason: "endpoint has no host".to_string(),
        })?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            origin: format!("{}://{host}", url.scheme()),
            host,
        })
    }

    /// Public regional endpoint, e.g. `https://dynamodb.eu-west-1.amazonaws.com`.
    pub fn regional(prefix: &str, region: &str) -> Self {
        let host = format!("{prefix}.{region}.amazonaws.com");
        Self {
            origin: format!("https://{host}"),
            host,
        }
    }

    /// Value of the `Host` header.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full URL for an absolute request path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }
}
