//! The Cachet endpoint catalog.
//!
//! Every operation of the API is one row in `ENDPOINTS`: method, path
//! template, required inputs and the mapping from input names to wire
//! query names. `CachetClient::build` interprets a row; nothing else in
//! the crate knows about individual endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::http::HttpMethod::{Delete, Get, Post, Put};
use self::Operation as Op;

/// One API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    Version,
    GetComponents,
    CreateComponent,
    GetComponentById,
    UpdateComponentById,
    DeleteComponentById,
    GetComponentGroups,
    CreateComponentGroup,
    GetComponentGroupById,
    UpdateComponentGroupById,
    DeleteComponentGroupById,
    GetIncidents,
    CreateIncident,
    GetIncidentById,
    UpdateIncidentById,
    DeleteIncidentById,
    GetIncidentUpdatesById,
    GetIncidentUpdateById,
    GetMetrics,
    CreateMetric,
    GetMetricById,
    DeleteMetricById,
    GetMetricPointsById,
    CreateMetricPointById,
    DeleteMetricPointById,
}

/// Maps an input name onto the query parameter sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryField {
    pub input: &'static str,
    pub wire: &'static str,
}

/// Declarative description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub operation: Operation,
    /// Canonical camelCase name, e.g. `getComponentById`.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path template with `{name}` placeholders.
    pub path: &'static str,
    /// Required inputs: path identifiers in template order, then `body`.
    pub required: &'static [&'static str],
    pub query: &'static [QueryField],
}

impl Endpoint {
    /// Placeholder names in the order they appear in the path template.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        let path: &'static str = self.path;
        path.split('{')
            .skip(1)
            .filter_map(|segment| segment.split_once('}').map(|(name, _)| name))
    }

    pub fn requires_body(&self) -> bool {
        self.required.contains(&"body")
    }
}

const fn field(input: &'static str, wire: &'static str) -> QueryField {
    QueryField { input, wire }
}

const PAGING: &[QueryField] = &[
    field("sort", "sort"),
    field("order", "order"),
    field("perPage", "per_page"),
    field("page", "page"),
];

const COMPONENT_FILTERS: &[QueryField] = &[
    field("sort", "sort"),
    field("order", "order"),
    field("perPage", "per_page"),
    field("page", "page"),
    field("id", "id"),
    field("name", "name"),
    field("status", "status"),
    field("groupId", "group_id"),
    field("enabled", "enabled"),
];

const GROUP_FILTERS: &[QueryField] = &[
    field("id", "id"),
    field("name", "name"),
    field("collapsed", "collapsed"),
    field("sort", "sort"),
    field("order", "order"),
    field("perPage", "per_page"),
    field("page", "page"),
];

const INCIDENT_FILTERS: &[QueryField] = &[
    field("id", "id"),
    field("componentId", "component_id"),
    field("name", "name"),
    field("status", "status"),
    field("visible", "visible"),
    field("sort", "sort"),
    field("order", "order"),
    field("perPage", "per_page"),
    field("page", "page"),
];

const fn endpoint(
    operation: Operation,
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    required: &'static [&'static str],
    query: &'static [QueryField],
) -> Endpoint {
    Endpoint {
        operation,
        name,
        method,
        path,
        required,
        query,
    }
}

/// Indexed by `Operation as usize`.
static ENDPOINTS: [Endpoint; 26] = [
    endpoint(Op::Ping, "ping", Get, "/ping", &[], &[]),
    endpoint(Op::Version, "version", Get, "/version", &[], &[]),
    endpoint(Op::GetComponents, "getComponents", Get, "/components", &[], COMPONENT_FILTERS),
    endpoint(Op::CreateComponent, "createComponent", Post, "/components", &["body"], &[]),
    endpoint(Op::GetComponentById, "getComponentById", Get, "/components/{component}", &["component"], &[]),
    endpoint(
        Op::UpdateComponentById,
        "updateComponentById",
        Put,
        "/components/{component}",
        &["component", "body"],
        &[],
    ),
    endpoint(
        Op::DeleteComponentById,
        "deleteComponentById",
        Delete,
        "/components/{component}",
        &["component"],
        &[],
    ),
    endpoint(Op::GetComponentGroups, "getComponentGroups", Get, "/components/groups", &[], GROUP_FILTERS),
    endpoint(Op::CreateComponentGroup, "createComponentGroup", Post, "/components/groups", &["body"], &[]),
    endpoint(
        Op::GetComponentGroupById,
        "getComponentGroupById",
        Get,
        "/components/groups/{group}",
        &["group"],
        &[],
    ),
    endpoint(
        Op::UpdateComponentGroupById,
        "updateComponentGroupById",
        Put,
        "/components/groups/{group}",
        &["group", "body"],
        &[],
    ),
    endpoint(
        Op::DeleteComponentGroupById,
        "deleteComponentGroupById",
        Delete,
        "/components/groups/{group}",
        &["group"],
        &[],
    ),
    endpoint(Op::GetIncidents, "getIncidents", Get, "/incidents", &[], INCIDENT_FILTERS),
    endpoint(Op::CreateIncident, "createIncident", Post, "/incidents", &["body"], &[]),
    endpoint(Op::GetIncidentById, "getIncidentById", Get, "/incidents/{incident}", &["incident"], &[]),
    endpoint(
        Op::UpdateIncidentById,
        "updateIncidentById",
        Put,
        "/incidents/{incident}",
        &["incident", "body"],
        &[],
    ),
    endpoint(
        Op::DeleteIncidentById,
        "deleteIncidentById",
        Delete,
        "/incidents/{incident}",
        &["incident"],
        &[],
    ),
    endpoint(
        Op::GetIncidentUpdatesById,
        "getIncidentUpdatesById",
        Get,
        "/incidents/{incident}/updates",
        &["incident"],
        PAGING,
    ),
    endpoint(
        Op::GetIncidentUpdateById,
        "getIncidentUpdateById",
        Get,
        "/incidents/{incident}/updates/{update}",
        &["incident", "update"],
        &[],
    ),
    endpoint(Op::GetMetrics, "getMetrics", Get, "/metrics", &[], PAGING),
    endpoint(Op::CreateMetric, "createMetric", Post, "/metrics", &["body"], &[]),
    endpoint(Op::GetMetricById, "getMetricById", Get, "/metrics/{metric}", &["metric"], &[]),
    endpoint(Op::DeleteMetricById, "deleteMetricById", Delete, "/metrics/{metric}", &["metric"], &[]),
    endpoint(
        Op::GetMetricPointsById,
        "getMetricPointsById",
        Get,
        "/metrics/{metric}/points",
        &["metric"],
        PAGING,
    ),
    endpoint(
        Op::CreateMetricPointById,
        "createMetricPointById",
        Post,
        "/metrics/{metric}/points",
        &["metric", "body"],
        &[],
    ),
    endpoint(
        Op::DeleteMetricPointById,
        "deleteMetricPointById",
        Delete,
        "/metrics/{metric}/points/{point}",
        &["metric", "point"],
        &[],
    ),
];

impl Operation {
    pub const ALL: [Operation; 26] = [
        Op::Ping,
        Op::Version,
        Op::GetComponents,
        Op::CreateComponent,
        Op::GetComponentById,
        Op::UpdateComponentById,
        Op::DeleteComponentById,
        Op::GetComponentGroups,
        Op::CreateComponentGroup,
        Op::GetComponentGroupById,
        Op::UpdateComponentGroupById,
        Op::DeleteComponentGroupById,
        Op::GetIncidents,
        Op::CreateIncident,
        Op::GetIncidentById,
        Op::UpdateIncidentById,
        Op::DeleteIncidentById,
        Op::GetIncidentUpdatesById,
        Op::GetIncidentUpdateById,
        Op::GetMetrics,
        Op::CreateMetric,
        Op::GetMetricById,
        Op::DeleteMetricById,
        Op::GetMetricPointsById,
        Op::CreateMetricPointById,
        Op::DeleteMetricPointById,
    ];

    pub fn endpoint(self) -> &'static Endpoint {
        &ENDPOINTS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.endpoint().name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ENDPOINTS
            .iter()
            .find(|endpoint| endpoint.name == name)
            .map(|endpoint| endpoint.operation)
            .ok_or_else(|| ApiError::UnknownOperation(name.to_string()))
    }
}

/// The whole catalog, in declaration order.
pub fn endpoints() -> &'static [Endpoint] {
    &ENDPOINTS
}
