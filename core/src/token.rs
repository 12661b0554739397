//! Credential placement.
//!
//! A `Token` is attached to every outgoing call in one of three places: a
//! query parameter, a named header, or a bearer `Authorization` header.

use std::fmt;

use serde::Deserialize;

use crate::http::upsert;

/// Auth configuration applied to every request.
///
/// The default token has an empty value and no name, which still yields an
/// `Authorization: Bearer ` header on every call.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Token {
    pub value: String,
    #[serde(alias = "headerOrQueryName")]
    pub header_or_query_name: Option<String>,
    #[serde(alias = "isQuery")]
    pub is_query: bool,
}

/// Where a token ends up on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    Query(&'a str),
    Header(&'a str),
    Bearer,
}

impl Token {
    /// A token sent as `Authorization: Bearer <value>`.
    pub fn bearer(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// A token sent as the header `<name>: <value>`.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            header_or_query_name: Some(name.into()),
            is_query: false,
        }
    }

    /// A token sent as the query parameter `<name>=<value>`.
    pub fn query(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            header_or_query_name: Some(name.into()),
            is_query: true,
        }
    }

    pub fn placement(&self) -> Placement<'_> {
        let name = self
            .header_or_query_name
            .as_deref()
            .filter(|name| !name.is_empty());
        match (name, self.is_query) {
            (Some(name), true) => Placement::Query(name),
            (Some(name), false) => Placement::Header(name),
            (None, _) => Placement::Bearer,
        }
    }

    pub(crate) fn apply(&self, query: &mut Vec<(String, String)>, headers: &mut Vec<(String, String)>) {
        match self.placement() {
            Placement::Query(name) => upsert(query, name, &self.value),
            Placement::Header(name) => upsert(headers, name, &self.value),
            Placement::Bearer => upsert(headers, "Authorization", &format!("Bearer {}", self.value)),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("header_or_query_name", &self.header_or_query_name)
            .field("is_query", &self.is_query)
            .finish()
    }
}
