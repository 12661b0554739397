//! Client for the Cachet status-page API.
//!
//! # Overview
//! The endpoint surface is a static catalog (`endpoint`), interpreted by a
//! sans-IO request builder (`CachetClient`) and executed over `reqwest` by
//! the async client (`Cachet`), which exposes one method per endpoint.
//!
//! # Design
//! - `CachetClient` only builds `HttpRequest` values and classifies
//!   `HttpResponse` values; it never touches the network.
//! - `Cachet` funnels every endpoint method through one dispatcher.
//! - Outcomes: 204 resolves without a body, other 2xx resolve with the body
//!   (parsed when JSON), everything else is `ApiError::Http`.
//! - No retries anywhere; every error is terminal for its call.

pub mod cachet;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod params;
pub mod response;
pub mod token;
mod transport;
pub mod types;

pub use cachet::Cachet;
pub use client::CachetClient;
pub use config::ClientOptions;
pub use endpoint::{endpoints, Endpoint, Operation, QueryField};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use params::Params;
pub use response::{ApiResponse, ResponseBody};
pub use token::{Placement, Token};
pub use types::{
    ComponentPatch, ComponentStatus, IncidentPatch, IncidentStatus, NewComponent, NewComponentGroup, NewIncident,
    NewMetric, NewMetricPoint, Order,
};
