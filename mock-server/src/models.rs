//! Records kept by the mock server and the payloads it accepts.
//!
//! These mirror Cachet's JSON shapes but are defined independently of
//! `cachet-core`; the integration tests catch drift between the two.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub link: String,
    pub status: u8,
    pub order: i32,
    pub group_id: u64,
    pub enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComponentGroup {
    pub id: u64,
    pub name: String,
    pub order: i32,
    pub collapsed: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Incident {
    pub id: u64,
    pub name: String,
    pub message: String,
    pub status: u8,
    pub visible: bool,
    pub component_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IncidentUpdate {
    pub id: u64,
    pub incident_id: u64,
    pub status: u8,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub id: u64,
    pub name: String,
    pub suffix: String,
    pub description: String,
    pub default_value: f64,
    pub calc_type: u8,
    pub display_chart: bool,
    pub places: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricPoint {
    pub id: u64,
    pub metric_id: u64,
    pub value: f64,
    pub timestamp: Option<i64>,
}

#[derive(Deserialize)]
pub struct CreateComponent {
    pub name: String,
    pub status: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub group_id: u64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Deserialize)]
pub struct UpdateComponent {
    pub name: Option<String>,
    pub status: Option<u8>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub order: Option<i32>,
    pub group_id: Option<u64>,
    pub enabled: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateGroup {
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub collapsed: u8,
}

#[derive(Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
    pub order: Option<i32>,
    pub collapsed: Option<u8>,
}

#[derive(Deserialize)]
pub struct CreateIncident {
    pub name: String,
    pub message: String,
    pub status: u8,
    #[serde(default = "enabled_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub component_id: u64,
    pub component_status: Option<u8>,
}

#[derive(Deserialize)]
pub struct UpdateIncident {
    pub name: Option<String>,
    pub message: Option<String>,
    pub status: Option<u8>,
    pub visible: Option<bool>,
    pub component_id: Option<u64>,
    pub component_status: Option<u8>,
}

#[derive(Deserialize)]
pub struct CreateMetric {
    pub name: String,
    pub suffix: String,
    pub description: String,
    pub default_value: f64,
    #[serde(default)]
    pub calc_type: u8,
    #[serde(default = "enabled_by_default")]
    pub display_chart: bool,
    #[serde(default = "default_places")]
    pub places: u8,
}

fn default_places() -> u8 {
    2
}

#[derive(Deserialize)]
pub struct CreatePoint {
    pub value: f64,
    pub timestamp: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_component_defaults() {
        let input: CreateComponent = serde_json::from_str(r#"{"name":"API","status":1}"#).unwrap();
        assert_eq!(input.name, "API");
        assert!(input.enabled);
        assert_eq!(input.group_id, 0);
        assert!(input.description.is_empty());
    }

    #[test]
    fn create_component_rejects_missing_status() {
        let result: Result<CreateComponent, _> = serde_json::from_str(r#"{"name":"API"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_incident_all_fields_optional() {
        let input: UpdateIncident = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.name.is_none());
        assert!(input.status.is_none());
    }

    #[test]
    fn create_metric_defaults() {
        let input: CreateMetric = serde_json::from_str(
            r#"{"name":"Latency","suffix":"ms","description":"p95","default_value":0}"#,
        )
        .unwrap();
        assert_eq!(input.places, 2);
        assert!(input.display_chart);
    }

    #[test]
    fn component_serializes_to_json() {
        let component = Component {
            id: 1,
            name: "API".to_string(),
            description: String::new(),
            link: String::new(),
            status: 1,
            order: 0,
            group_id: 0,
            enabled: true,
        };
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], 1);
        assert_eq!(json["enabled"], true);
    }
}
