//! Async Cachet client.
//!
//! # Design
//! `Cachet` pairs a `CachetClient` with a `reqwest::Client`. Every endpoint
//! method funnels through `invoke`, which builds the request from a snapshot
//! of the current configuration and hands it to `dispatch`. The
//! configuration sits behind an `ArcSwap`: `set_token` publishes a new
//! snapshot, and calls already in flight keep the one they loaded.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::client::CachetClient;
use crate::config::ClientOptions;
use crate::endpoint::Operation;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::params::Params;
use crate::response::{self, ApiResponse};
use crate::token::Token;
use crate::transport;

/// Async client for the Cachet API.
///
/// Clones share the connection pool and the token.
///
/// # Example
/// ```no_run
/// use cachet_core::{Cachet, Params};
///
/// # async fn example() -> Result<(), cachet_core::ApiError> {
/// let cachet = Cachet::new("https://status.example.com/api/v1")?;
/// let component = cachet.get_component_by_id(Params::new().component(7)).await?;
/// println!("{:?}", component.json());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Cachet {
    core: Arc<ArcSwap<CachetClient>>,
    http: reqwest::Client,
}

impl Cachet {
    /// Accepts a plain domain or a full `ClientOptions`.
    ///
    /// # Errors
    /// Returns `ApiError::EmptyDomain` when the domain is empty.
    pub fn new(options: impl Into<ClientOptions>) -> Result<Self, ApiError> {
        Self::with_http_client(options, reqwest::Client::new())
    }

    /// # Errors
    /// Returns `ApiError::EmptyDomain` when the domain is empty.
    pub fn from_options(options: ClientOptions) -> Result<Self, ApiError> {
        Self::new(options)
    }

    /// Like `new`, sending through a caller-configured `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `ApiError::EmptyDomain` when the domain is empty.
    pub fn with_http_client(options: impl Into<ClientOptions>, http: reqwest::Client) -> Result<Self, ApiError> {
        let core = CachetClient::new(options)?;
        Ok(Self {
            core: Arc::new(ArcSwap::from_pointee(core)),
            http,
        })
    }

    pub fn domain(&self) -> String {
        self.core.load().domain().to_string()
    }

    pub fn token(&self) -> Token {
        self.core.load().token().clone()
    }

    /// Replace the whole token descriptor for calls issued from now on.
    pub fn set_token(&self, value: impl Into<String>, header_or_query_name: Option<&str>, is_query: bool) {
        let value = value.into();
        self.core.rcu(|current| {
            let mut next = CachetClient::clone(current);
            next.set_token(value.clone(), header_or_query_name, is_query);
            next
        });
    }

    /// Build and dispatch any operation.
    ///
    /// # Errors
    /// Validation errors are returned before any network activity; see
    /// `dispatch` for the rest.
    pub async fn invoke(&self, operation: Operation, params: Params) -> Result<ApiResponse, ApiError> {
        let request = self.core.load().build(operation, &params)?;
        debug!(operation = %operation, "invoking Cachet operation");
        self.dispatch(request).await
    }

    /// Send a prepared request and classify the response.
    ///
    /// # Errors
    /// `ApiError::Transport` when no response was received, `ApiError::Http`
    /// for any status outside 200-299.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        debug!(%method, %url, "sending Cachet request");

        let response = match transport::send(&self.http, request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, error = %err, "Cachet request failed");
                return Err(ApiError::Transport(err));
            }
        };

        debug!(%method, %url, status = response.status, "received Cachet response");
        response::classify(response)
    }
}

impl fmt::Debug for Cachet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cachet")
            .field("core", &*self.core.load())
            .finish_non_exhaustive()
    }
}

macro_rules! endpoint_methods {
    ($($(#[$doc:meta])* $method:ident => $operation:ident;)*) => {
        impl Cachet {
            $(
                $(#[$doc])*
                pub async fn $method(&self, params: Params) -> Result<ApiResponse, ApiError> {
                    self.invoke(Operation::$operation, params).await
                }
            )*
        }
    };
}

endpoint_methods! {
    /// `GET /ping`: check that the API answers.
    ping => Ping;
    /// `GET /version`
    version => Version;

    /// `GET /components`. Filters: `sort`, `order`, `per_page`, `page`,
    /// `id`, `name`, `status`, `group_id`, `enabled`.
    get_components => GetComponents;
    /// `POST /components`. Requires `body`.
    create_component => CreateComponent;
    /// `GET /components/{component}`
    get_component_by_id => GetComponentById;
    /// `PUT /components/{component}`. Requires `body`.
    update_component_by_id => UpdateComponentById;
    delete_component_by_id => DeleteComponentById;

    /// `GET /components/groups`. Filters: `id`, `name`, `collapsed`, `sort`,
    /// `order`, `per_page`, `page`.
    get_component_groups => GetComponentGroups;
    create_component_group => CreateComponentGroup;
    get_component_group_by_id => GetComponentGroupById;
    update_component_group_by_id => UpdateComponentGroupById;
    delete_component_group_by_id => DeleteComponentGroupById;

    /// `GET /incidents`. Filters: `id`, `component_id`, `name`, `status`,
    /// `visible`, `sort`, `order`, `per_page`, `page`.
    get_incidents => GetIncidents;
    create_incident => CreateIncident;
    get_incident_by_id => GetIncidentById;
    update_incident_by_id => UpdateIncidentById;
    delete_incident_by_id => DeleteIncidentById;
    /// `GET /incidents/{incident}/updates`
    get_incident_updates_by_id => GetIncidentUpdatesById;
    /// `GET /incidents/{incident}/updates/{update}`
    get_incident_update_by_id => GetIncidentUpdateById;

    get_metrics => GetMetrics;
    create_metric => CreateMetric;
    get_metric_by_id => GetMetricById;
    delete_metric_by_id => DeleteMetricById;
    /// `GET /metrics/{metric}/points`
    get_metric_points_by_id => GetMetricPointsById;
    /// `POST /metrics/{metric}/points`. Requires `metric` and `body`.
    create_metric_point_by_id => CreateMetricPointById;
    delete_metric_point_by_id => DeleteMetricPointById;
}
