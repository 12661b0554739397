//! The per-call parameter object.
//!
//! Named inputs are stored under the API's camelCase input names
//! (`perPage`, `groupId`, ...). The endpoint catalog decides which of them
//! become path segments or query parameters for a given operation; inputs an
//! endpoint does not declare are ignored.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{upsert, RequestBody};
use crate::types::Order;

/// Inputs for one call. `Params::default()` is the empty parameter object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, String>,
    body: Option<RequestBody>,
    extra_query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named input by its camelCase name.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn component(self, id: impl ToString) -> Self {
        self.param("component", id)
    }

    pub fn group(self, id: impl ToString) -> Self {
        self.param("group", id)
    }

    pub fn incident(self, id: impl ToString) -> Self {
        self.param("incident", id)
    }

    pub fn update(self, id: impl ToString) -> Self {
        self.param("update", id)
    }

    pub fn metric(self, id: impl ToString) -> Self {
        self.param("metric", id)
    }

    pub fn point(self, id: impl ToString) -> Self {
        self.param("point", id)
    }

    pub fn sort(self, field: impl ToString) -> Self {
        self.param("sort", field)
    }

    pub fn order(self, order: Order) -> Self {
        self.param("order", order)
    }

    pub fn per_page(self, per_page: u32) -> Self {
        self.param("perPage", per_page)
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    pub fn id(self, id: u64) -> Self {
        self.param("id", id)
    }

    pub fn name(self, name: impl ToString) -> Self {
        self.param("name", name)
    }

    /// Accepts a `ComponentStatus`, an `IncidentStatus` or a raw code.
    pub fn status(self, status: impl ToString) -> Self {
        self.param("status", status)
    }

    pub fn enabled(self, enabled: bool) -> Self {
        self.param("enabled", enabled)
    }

    pub fn group_id(self, id: u64) -> Self {
        self.param("groupId", id)
    }

    pub fn component_id(self, id: u64) -> Self {
        self.param("componentId", id)
    }

    /// Sent as `1` / `0`.
    pub fn visible(self, visible: bool) -> Self {
        self.param("visible", u8::from(visible))
    }

    /// Sent as `1` / `0`.
    pub fn collapsed(self, collapsed: bool) -> Self {
        self.param("collapsed", u8::from(collapsed))
    }

    /// Serialize `payload` into the JSON request body.
    ///
    /// # Errors
    /// Returns `ApiError::Json` if `payload` cannot be represented as JSON.
    pub fn body<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload)?;
        Ok(self.json_body(value))
    }

    /// Any JSON value, sent JSON-encoded: `Value::String("up")` goes out as
    /// `"up"` with quotes. Use `raw_body` for plain text payloads.
    pub fn json_body(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    pub fn raw_body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(bytes.into()));
        self
    }

    /// Extra query parameter, merged after the named ones and overriding them.
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        upsert(&mut self.extra_query, name, &value.to_string());
        self
    }

    /// Form field. Any form field switches the request to form encoding.
    pub fn form(mut self, name: &str, value: impl ToString) -> Self {
        upsert(&mut self.form, name, &value.to_string());
        self
    }

    pub(crate) fn request_body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub(crate) fn extra_query(&self) -> &[(String, String)] {
        &self.extra_query
    }

    pub(crate) fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }
}
