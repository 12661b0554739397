//! In-memory Cachet API for tests and local development.
//!
//! Serves the `/ping`, `/version`, component, component group, incident,
//! incident update, metric and metric point endpoints with Cachet's
//! `{"data": ...}` envelope. Reads are public; when a token is configured,
//! writes need it as `X-Cachet-Token`, a bearer `Authorization` header or an
//! `api_token` query parameter.

pub mod listing;
pub mod models;

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

use crate::listing::{paginate, ListQuery, Page};
use crate::models::*;

pub const VERSION: &str = "2.4.0-mock";

/// Server options.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    /// Token required on non-GET requests. `None` leaves writes open.
    pub token: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    components: BTreeMap<u64, Component>,
    groups: BTreeMap<u64, ComponentGroup>,
    incidents: BTreeMap<u64, Incident>,
    updates: BTreeMap<u64, IncidentUpdate>,
    metrics: BTreeMap<u64, Metric>,
    points: BTreeMap<u64, MetricPoint>,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    settings: Arc<Settings>,
}

/// Single-record envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

type Item<T> = Result<Json<Data<T>>, StatusCode>;

fn item<T>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}

pub fn app() -> Router {
    router(Settings::default())
}

pub fn router(settings: Settings) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        settings: Arc::new(settings),
    };
    Router::new()
        .route("/ping", get(ping))
        .route("/version", get(version))
        .route("/components", get(list_components).post(create_component))
        .route("/components/groups", get(list_groups).post(create_group))
        .route(
            "/components/groups/{group}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route(
            "/components/{component}",
            get(get_component).put(update_component).delete(delete_component),
        )
        .route("/incidents", get(list_incidents).post(create_incident))
        .route(
            "/incidents/{incident}",
            get(get_incident).put(update_incident).delete(delete_incident),
        )
        .route("/incidents/{incident}/updates", get(list_updates))
        .route("/incidents/{incident}/updates/{update}", get(get_update))
        .route("/metrics", get(list_metrics).post(create_metric))
        .route("/metrics/{metric}", get(get_metric).delete(delete_metric))
        .route("/metrics/{metric}/points", get(list_points).post(create_point))
        .route("/metrics/{metric}/points/{point}", delete(delete_point))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Settings::default()).await
}

pub async fn serve(listener: TcpListener, settings: Settings) -> Result<(), std::io::Error> {
    axum::serve(listener, router(settings)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, StatusCode> {
    if request.method() == Method::GET || authorized(&state.settings, &request) {
        Ok(next.run(request).await)
    } else {
        debug!(method = %request.method(), uri = %request.uri(), "rejecting unauthenticated write");
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn authorized(settings: &Settings, request: &Request) -> bool {
    let Some(expected) = settings.token.as_deref() else {
        return true;
    };
    let header = |name: &str| request.headers().get(name).and_then(|value| value.to_str().ok());

    if header("x-cachet-token") == Some(expected) {
        return true;
    }
    if header("authorization").and_then(|value| value.strip_prefix("Bearer ")) == Some(expected) {
        return true;
    }
    Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .is_ok_and(|Query(query)| query.get("api_token").map(String::as_str) == Some(expected))
}

async fn ping() -> Json<Data<&'static str>> {
    item("Pong!")
}

async fn version() -> Json<Value> {
    Json(json!({
        "meta": {"on_latest": true, "latest": {"tag_name": VERSION}},
        "data": VERSION,
    }))
}

// --- components ---

async fn list_components(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Page<Component>> {
    let store = state.db.read().await;
    Json(paginate(store.components.values(), &query))
}

async fn create_component(State(state): State<AppState>, Json(input): Json<CreateComponent>) -> Json<Data<Component>> {
    let mut store = state.db.write().await;
    let component = Component {
        id: store.allocate_id(),
        name: input.name,
        description: input.description,
        link: input.link,
        status: input.status,
        order: input.order,
        group_id: input.group_id,
        enabled: input.enabled,
    };
    store.components.insert(component.id, component.clone());
    item(component)
}

async fn get_component(State(state): State<AppState>, Path(id): Path<u64>) -> Item<Component> {
    let store = state.db.read().await;
    store.components.get(&id).cloned().map(item).ok_or(StatusCode::NOT_FOUND)
}

async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateComponent>,
) -> Item<Component> {
    let mut store = state.db.write().await;
    let component = store.components.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        component.name = name;
    }
    if let Some(status) = input.status {
        component.status = status;
    }
    if let Some(description) = input.description {
        component.description = description;
    }
    if let Some(link) = input.link {
        component.link = link;
    }
    if let Some(order) = input.order {
        component.order = order;
    }
    if let Some(group_id) = input.group_id {
        component.group_id = group_id;
    }
    if let Some(enabled) = input.enabled {
        component.enabled = enabled;
    }
    Ok(item(component.clone()))
}

async fn delete_component(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut store = state.db.write().await;
    match store.components.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

// --- component groups ---

async fn list_groups(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Page<ComponentGroup>> {
    let store = state.db.read().await;
    Json(paginate(store.groups.values(), &query))
}

async fn create_group(State(state): State<AppState>, Json(input): Json<CreateGroup>) -> Json<Data<ComponentGroup>> {
    let mut store = state.db.write().await;
    let group = ComponentGroup {
        id: store.allocate_id(),
        name: input.name,
        order: input.order,
        collapsed: input.collapsed,
    };
    store.groups.insert(group.id, group.clone());
    item(group)
}

async fn get_group(State(state): State<AppState>, Path(id): Path<u64>) -> Item<ComponentGroup> {
    let store = state.db.read().await;
    store.groups.get(&id).cloned().map(item).ok_or(StatusCode::NOT_FOUND)
}

async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateGroup>,
) -> Item<ComponentGroup> {
    let mut store = state.db.write().await;
    let group = store.groups.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        group.name = name;
    }
    if let Some(order) = input.order {
        group.order = order;
    }
    if let Some(collapsed) = input.collapsed {
        group.collapsed = collapsed;
    }
    Ok(item(group.clone()))
}

/// Components of a deleted group become ungrouped.
async fn delete_group(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut store = state.db.write().await;
    if store.groups.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    for component in store.components.values_mut().filter(|c| c.group_id == id) {
        component.group_id = 0;
    }
    StatusCode::NO_CONTENT
}

// --- incidents ---

async fn list_incidents(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Page<Incident>> {
    let store = state.db.read().await;
    Json(paginate(store.incidents.values(), &query))
}

fn set_component_status(store: &mut Store, component_id: u64, status: Option<u8>) {
    if let (Some(status), Some(component)) = (status, store.components.get_mut(&component_id)) {
        component.status = status;
    }
}

async fn create_incident(State(state): State<AppState>, Json(input): Json<CreateIncident>) -> Json<Data<Incident>> {
    let mut store = state.db.write().await;
    let incident = Incident {
        id: store.allocate_id(),
        name: input.name,
        message: input.message,
        status: input.status,
        visible: input.visible,
        component_id: input.component_id,
    };
    set_component_status(&mut store, incident.component_id, input.component_status);
    store.incidents.insert(incident.id, incident.clone());
    item(incident)
}

async fn get_incident(State(state): State<AppState>, Path(id): Path<u64>) -> Item<Incident> {
    let store = state.db.read().await;
    store.incidents.get(&id).cloned().map(item).ok_or(StatusCode::NOT_FOUND)
}

/// A change of status or message is recorded as an incident update.
async fn update_incident(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateIncident>,
) -> Item<Incident> {
    let mut store = state.db.write().await;
    let update_id = store.allocate_id();
    let incident = store.incidents.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let records_update = input.status.is_some() || input.message.is_some();
    if let Some(name) = input.name {
        incident.name = name;
    }
    if let Some(message) = input.message {
        incident.message = message;
    }
    if let Some(status) = input.status {
        incident.status = status;
    }
    if let Some(visible) = input.visible {
        incident.visible = visible;
    }
    if let Some(component_id) = input.component_id {
        incident.component_id = component_id;
    }
    let incident = incident.clone();

    if records_update {
        store.updates.insert(
            update_id,
            IncidentUpdate {
                id: update_id,
                incident_id: id,
                status: incident.status,
                message: incident.message.clone(),
            },
        );
    }
    set_component_status(&mut store, incident.component_id, input.component_status);
    Ok(item(incident))
}

async fn delete_incident(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut store = state.db.write().await;
    if store.incidents.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.updates.retain(|_, update| update.incident_id != id);
    StatusCode::NO_CONTENT
}

async fn list_updates(
    State(state): State<AppState>,
    Path(incident): Path<u64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<IncidentUpdate>>, StatusCode> {
    let store = state.db.read().await;
    if !store.incidents.contains_key(&incident) {
        return Err(StatusCode::NOT_FOUND);
    }
    let updates = store.updates.values().filter(|u| u.incident_id == incident);
    Ok(Json(paginate(updates, &query)))
}

async fn get_update(State(state): State<AppState>, Path((incident, update)): Path<(u64, u64)>) -> Item<IncidentUpdate> {
    let store = state.db.read().await;
    store
        .updates
        .get(&update)
        .filter(|u| u.incident_id == incident)
        .cloned()
        .map(item)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- metrics ---

async fn list_metrics(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Json<Page<Metric>> {
    let store = state.db.read().await;
    Json(paginate(store.metrics.values(), &query))
}

async fn create_metric(State(state): State<AppState>, Json(input): Json<CreateMetric>) -> Json<Data<Metric>> {
    let mut store = state.db.write().await;
    let metric = Metric {
        id: store.allocate_id(),
        name: input.name,
        suffix: input.suffix,
        description: input.description,
        default_value: input.default_value,
        calc_type: input.calc_type,
        display_chart: input.display_chart,
        places: input.places,
    };
    store.metrics.insert(metric.id, metric.clone());
    item(metric)
}

async fn get_metric(State(state): State<AppState>, Path(id): Path<u64>) -> Item<Metric> {
    let store = state.db.read().await;
    store.metrics.get(&id).cloned().map(item).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_metric(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    let mut store = state.db.write().await;
    if store.metrics.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.points.retain(|_, point| point.metric_id != id);
    StatusCode::NO_CONTENT
}

async fn list_points(
    State(state): State<AppState>,
    Path(metric): Path<u64>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<MetricPoint>>, StatusCode> {
    let store = state.db.read().await;
    if !store.metrics.contains_key(&metric) {
        return Err(StatusCode::NOT_FOUND);
    }
    let points = store.points.values().filter(|p| p.metric_id == metric);
    Ok(Json(paginate(points, &query)))
}

async fn create_point(
    State(state): State<AppState>,
    Path(metric): Path<u64>,
    Json(input): Json<CreatePoint>,
) -> Item<MetricPoint> {
    let mut store = state.db.write().await;
    if !store.metrics.contains_key(&metric) {
        return Err(StatusCode::NOT_FOUND);
    }
    let point = MetricPoint {
        id: store.allocate_id(),
        metric_id: metric,
        value: input.value,
        timestamp: input.timestamp,
    };
    store.points.insert(point.id, point.clone());
    Ok(item(point))
}

async fn delete_point(State(state): State<AppState>, Path((metric, point)): Path<(u64, u64)>) -> StatusCode {
    let mut store = state.db.write().await;
    if store.points.get(&point).is_some_and(|p| p.metric_id == metric) {
        store.points.remove(&point);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
