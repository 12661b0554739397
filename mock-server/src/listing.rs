//! Filtering, sorting and pagination for list endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{Component, ComponentGroup, Incident, IncidentUpdate, Metric, MetricPoint};

const DEFAULT_PER_PAGE: usize = 20;

/// Query string accepted by every list endpoint. Filters an endpoint does not
/// understand are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub per_page: Option<usize>,
    pub page: Option<usize>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub status: Option<u8>,
    pub group_id: Option<u64>,
    pub component_id: Option<u64>,
    pub enabled: Option<String>,
    pub visible: Option<String>,
    pub collapsed: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: usize,
    pub count: usize,
    pub per_page: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    pub pagination: Pagination,
}

/// Cachet's list envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub meta: Meta,
    pub data: Vec<T>,
}

/// Anything a list endpoint can return.
pub trait Listed: Clone {
    fn id(&self) -> u64;

    fn name(&self) -> Option<&str> {
        None
    }

    /// Whether the record passes the endpoint-specific filters.
    fn matches(&self, _query: &ListQuery) -> bool {
        true
    }
}

fn flag(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| matches!(value, "1" | "true"))
}

fn name_matches(name: &str, wanted: Option<&str>) -> bool {
    wanted.is_none_or(|wanted| name.to_lowercase().contains(&wanted.to_lowercase()))
}

impl Listed for Component {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn matches(&self, query: &ListQuery) -> bool {
        query.id.is_none_or(|id| id == self.id)
            && name_matches(&self.name, query.name.as_deref())
            && query.status.is_none_or(|status| status == self.status)
            && query.group_id.is_none_or(|group| group == self.group_id)
            && flag(query.enabled.as_deref()).is_none_or(|enabled| enabled == self.enabled)
    }
}

impl Listed for ComponentGroup {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn matches(&self, query: &ListQuery) -> bool {
        query.id.is_none_or(|id| id == self.id)
            && name_matches(&self.name, query.name.as_deref())
            && query.collapsed.is_none_or(|collapsed| collapsed == self.collapsed)
    }
}

impl Listed for Incident {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn matches(&self, query: &ListQuery) -> bool {
        query.id.is_none_or(|id| id == self.id)
            && query.component_id.is_none_or(|component| component == self.component_id)
            && name_matches(&self.name, query.name.as_deref())
            && query.status.is_none_or(|status| status == self.status)
            && flag(query.visible.as_deref()).is_none_or(|visible| visible == self.visible)
    }
}

impl Listed for IncidentUpdate {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Listed for Metric {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Listed for MetricPoint {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Filter, sort and cut one page out of `records`.
///
/// `sort=name` orders by name where the record has one; anything else orders
/// by id. Pages are 1-based.
pub fn paginate<'a, T, I>(records: I, query: &ListQuery) -> Page<T>
where
    T: Listed + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut matching: Vec<T> = records
        .into_iter()
        .filter(|record| record.matches(query))
        .cloned()
        .collect();

    if query.sort.as_deref() == Some("name") {
        matching.sort_by(|a, b| a.name().cmp(&b.name()).then(a.id().cmp(&b.id())));
    } else {
        matching.sort_by_key(Listed::id);
    }
    if query.order.as_deref().is_some_and(|order| order.eq_ignore_ascii_case("desc")) {
        matching.reverse();
    }

    let total = matching.len();
    let per_page = query.per_page.filter(|n| *n > 0).unwrap_or(DEFAULT_PER_PAGE);
    let current_page = query.page.filter(|n| *n > 0).unwrap_or(1);
    let total_pages = total.div_ceil(per_page).max(1);
    let data: Vec<T> = matching
        .into_iter()
        .skip((current_page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        meta: Meta {
            pagination: Pagination {
                total,
                count: data.len(),
                per_page,
                current_page,
                total_pages,
            },
        },
        data,
    }
}
