//! Process configuration for lexbridge.
//!
//! Resolved once at startup from environment variables and constant for the
//! lifetime of the process. A missing required value is a fatal startup
//! error, never a per-request one.
//!
//! | Variable                | Required | Default     |
//! |-------------------------|----------|-------------|
//! | `LEX_BOT_ID`            | yes      |             |
//! | `LEX_BOT_ALIAS_ID`      | yes      |             |
//! | `DYNAMODB_TABLE_NAME`   | yes      |             |
//! | `LEX_LOCALE_ID`         | no       | `en_US`     |
//! | `AWS_REGION`            | no       | `AWS_DEFAULT_REGION`, then `us-east-1` |
//! | `LEX_ENDPOINT_URL`      | no       | regional endpoint |
//! | `DYNAMODB_ENDPOINT_URL` | no       | regional endpoint |

use lexbridge_core::chat::service::BotTarget;
use lexbridge_types::error::ConfigError;
use lexbridge_types::intent::DEFAULT_LOCALE;

use crate::aws::Endpoint;

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub table_name: String,
    pub region: String,
    pub lex_endpoint: Option<Endpoint>,
    pub dynamodb_endpoint: Option<Endpoint>,
}

impl BridgeConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let endpoint = |key: &'static str| {
            get(key)
                .map(|raw| Endpoint::parse(key, &raw))
                .transpose()
        };

        Ok(Self {
            bot_id: require("LEX_BOT_ID")?,
            bot_alias_id: require("LEX_BOT_ALIAS_ID")?,
            table_name: require("DYNAMODB_TABLE_NAME")?,
            locale_id: get("LEX_LOCALE_ID").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            region: get("AWS_REGION")
                .or_else(|| get("AWS_DEFAULT_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            lex_endpoint: endpoint("LEX_ENDPOINT_URL")?,
            dynamodb_endpoint: endpoint("DYNAMODB_ENDPOINT_URL")?,
        })
    }

    /// The bot every recognition call is addressed to.
    pub fn bot_target(&self) -> BotTarget {
        BotTarget::new(&self.bot_id, &self.bot_alias_id).with_locale(&self.locale_id)
    }
}
