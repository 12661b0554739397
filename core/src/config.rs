//! Client configuration.

use serde::Deserialize;

use crate::token::Token;

/// Domain plus token, accepted by both clients' constructors.
///
/// A plain `&str` or `String` converts into options with an empty token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientOptions {
    /// Base URL the endpoint paths are appended to, e.g.
    /// `https://status.example.com/api/v1`.
    pub domain: String,
    #[serde(default)]
    pub token: Token,
}

impl ClientOptions {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            token: Token::default(),
        }
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = token;
        self
    }

    /// Read `CACHET_DOMAIN`, `CACHET_TOKEN`, `CACHET_TOKEN_NAME` and
    /// `CACHET_TOKEN_IN_QUERY` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_query = lookup("CACHET_TOKEN_IN_QUERY").is_some_and(|flag| {
            matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        });
        Self {
            domain: lookup("CACHET_DOMAIN").unwrap_or_default(),
            token: Token {
                value: lookup("CACHET_TOKEN").unwrap_or_default(),
                header_or_query_name: lookup("CACHET_TOKEN_NAME").filter(|name| !name.is_empty()),
                is_query,
            },
        }
    }
}

impl From<&str> for ClientOptions {
    fn from(domain: &str) -> Self {
        Self::new(domain)
    }
}

impl From<String> for ClientOptions {
    fn from(domain: String) -> Self {
        Self::new(domain)
    }
}
