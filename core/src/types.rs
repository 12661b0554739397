//! Request payloads and Cachet constants.
//!
//! # Design
//! Bodies stay free-form JSON on the wire; these types are conveniences for
//! `Params::body`. Optional fields are skipped when unset so that updates
//! only touch what the caller provided. Responses are not modelled here:
//! callers read them through `ApiResponse::data` into their own types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Component status as Cachet numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ComponentStatus {
    Operational = 1,
    PerformanceIssues = 2,
    PartialOutage = 3,
    MajorOutage = 4,
}

impl From<ComponentStatus> for u8 {
    fn from(status: ComponentStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for ComponentStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ComponentStatus::Operational),
            2 => Ok(ComponentStatus::PerformanceIssues),
            3 => Ok(ComponentStatus::PartialOutage),
            4 => Ok(ComponentStatus::MajorOutage),
            other => Err(format!("unknown component status {other}")),
        }
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Incident lifecycle status as Cachet numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum IncidentStatus {
    Scheduled = 0,
    Investigating = 1,
    Identified = 2,
    Watching = 3,
    Fixed = 4,
}

impl From<IncidentStatus> for u8 {
    fn from(status: IncidentStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for IncidentStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(IncidentStatus::Scheduled),
            1 => Ok(IncidentStatus::Investigating),
            2 => Ok(IncidentStatus::Identified),
            3 => Ok(IncidentStatus::Watching),
            4 => Ok(IncidentStatus::Fixed),
            other => Err(format!("unknown incident status {other}")),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Sort direction for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        })
    }
}

/// Payload for `createComponent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComponent {
    pub name: String,
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl NewComponent {
    pub fn new(name: impl Into<String>, status: ComponentStatus) -> Self {
        Self {
            name: name.into(),
            status,
            description: None,
            link: None,
            order: None,
            group_id: None,
            enabled: None,
        }
    }
}

/// Payload for `updateComponentById`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Payload for `createComponentGroup` and `updateComponentGroupById`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComponentGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<u8>,
}

impl NewComponentGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: None,
            collapsed: None,
        }
    }
}

/// Payload for `createIncident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    pub name: String,
    pub message: String,
    pub status: IncidentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
}

impl NewIncident {
    pub fn new(name: impl Into<String>, message: impl Into<String>, status: IncidentStatus) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            status,
            visible: None,
            component_id: None,
            component_status: None,
            notify: None,
        }
    }
}

/// Payload for `updateIncidentById`. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_status: Option<ComponentStatus>,
}

/// Payload for `createMetric`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMetric {
    pub name: String,
    pub suffix: String,
    pub description: String,
    pub default_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calc_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_chart: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places: Option<u8>,
}

/// Payload for `createMetricPointById`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMetricPoint {
    pub value: f64,
    /// Unix timestamp; the server uses "now" when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}
