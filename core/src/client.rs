//! Stateless HTTP request builder and response classifier for the Cachet API.
//!
//! # Design
//! `CachetClient` holds only the domain and the token descriptor. `build`
//! turns an `Operation` plus `Params` into an `HttpRequest` by interpreting
//! the operation's row in the endpoint catalog; `parse` classifies the
//! `HttpResponse` the caller got back. No I/O happens here, so a host with
//! its own HTTP stack can drive the API through these two calls alone.

use crate::config::ClientOptions;
use crate::endpoint::Operation;
use crate::error::ApiError;
use crate::http::{upsert, HttpRequest, HttpResponse};
use crate::params::Params;
use crate::response::{self, ApiResponse};
use crate::token::Token;

/// Synchronous, stateless request builder for the Cachet API.
#[derive(Debug, Clone)]
pub struct CachetClient {
    domain: String,
    token: Token,
}

impl CachetClient {
    /// Accepts a plain domain or a full `ClientOptions`.
    ///
    /// # Errors
    /// Returns `ApiError::EmptyDomain` when the domain is empty.
    pub fn new(options: impl Into<ClientOptions>) -> Result<Self, ApiError> {
        let ClientOptions { domain, token } = options.into();
        if domain.is_empty() {
            return Err(ApiError::EmptyDomain);
        }
        Ok(Self { domain, token })
    }

    /// # Errors
    /// Returns `ApiError::EmptyDomain` when the domain is empty.
    pub fn from_options(options: ClientOptions) -> Result<Self, ApiError> {
        Self::new(options)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Replace the whole token descriptor.
    pub fn set_token(&mut self, value: impl Into<String>, header_or_query_name: Option<&str>, is_query: bool) {
        self.token = Token {
            value: value.into(),
            header_or_query_name: header_or_query_name.map(str::to_owned),
            is_query,
        };
    }

    /// Build the request for `operation`.
    ///
    /// Auth is attached first, then path identifiers are checked and
    /// substituted in template order, then the body is checked, then named
    /// query fields are mapped to their wire names, and finally the free-form
    /// extra query pairs are merged over everything else.
    ///
    /// # Errors
    /// Returns `ApiError::MissingParameter` for the first required input that
    /// is absent.
    pub fn build(&self, operation: Operation, params: &Params) -> Result<HttpRequest, ApiError> {
        let endpoint = operation.endpoint();
        let mut query = Vec::new();
        let mut headers = Vec::new();
        self.token.apply(&mut query, &mut headers);

        let mut path = endpoint.path.to_string();
        for name in endpoint.path_params() {
            let value = params
                .get(name)
                .ok_or_else(|| ApiError::MissingParameter(name.to_string()))?;
            path = path.replacen(&format!("{{{name}}}"), value, 1);
        }

        let body = if endpoint.requires_body() {
            let body = params
                .request_body()
                .ok_or_else(|| ApiError::MissingParameter("body".to_string()))?;
            Some(body.clone())
        } else {
            None
        };

        for field in endpoint.query {
            if let Some(value) = params.get(field.input) {
                upsert(&mut query, field.wire, value);
            }
        }
        for (name, value) in params.extra_query() {
            upsert(&mut query, name, value);
        }

        Ok(HttpRequest {
            method: endpoint.method,
            url: format!("{}{path}", self.domain),
            query,
            headers,
            body,
            form: params.form_fields().to_vec(),
        })
    }

    pub fn parse(&self, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        response::classify(response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::{HttpMethod, RequestBody};
    use crate::response::ResponseBody;

    fn client() -> CachetClient {
        CachetClient::new("http://localhost:8000/api/v1").unwrap()
    }

    #[test]
    fn empty_domain_is_rejected() {
        assert!(matches!(CachetClient::new(""), Err(ApiError::EmptyDomain)));
        assert!(matches!(
            CachetClient::new(ClientOptions::default()),
            Err(ApiError::EmptyDomain)
        ));
    }

    #[test]
    fn build_ping_produces_correct_request() {
        let req = client().build(Operation::Ping, &Params::default()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/api/v1/ping");
        assert!(req.body.is_none());
        assert!(req.query.is_empty());
        assert!(req.form.is_empty());
    }

    #[test]
    fn domain_is_used_verbatim() {
        let client = CachetClient::new("http://localhost:8000/").unwrap();
        let req = client.build(Operation::Version, &Params::default()).unwrap();
        assert_eq!(req.url, "http://localhost:8000//version");
    }

    #[test]
    fn path_identifier_is_substituted() {
        let req = client()
            .build(Operation::GetComponentById, &Params::new().component(42))
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/v1/components/42");
    }

    #[test]
    fn nested_identifiers_are_substituted_in_order() {
        let params = Params::new().metric(3).point(9);
        let req = client().build(Operation::DeleteMetricPointById, &params).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:8000/api/v1/metrics/3/points/9");
    }

    #[test]
    fn missing_identifier_is_reported_before_body() {
        let err = client()
            .build(Operation::UpdateComponentById, &Params::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter(ref name) if name == "component"));

        let err = client()
            .build(Operation::GetIncidentUpdateById, &Params::new().incident(1))
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter(ref name) if name == "update"));
    }

    #[test]
    fn missing_body_is_reported() {
        let err = client()
            .build(Operation::CreateComponent, &Params::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter: body");
    }

    fn with_identifiers(names: impl IntoIterator<Item = &'static str>) -> Params {
        names.into_iter().fold(Params::new(), |params, name| params.param(name, 1))
    }

    #[test]
    fn every_endpoint_reports_its_first_missing_input() {
        for endpoint in crate::endpoint::endpoints() {
            let result = client().build(endpoint.operation, &Params::default());
            match endpoint.required.first() {
                Some(first) => assert!(
                    matches!(result, Err(ApiError::MissingParameter(ref name)) if name == first),
                    "{}: {result:?}",
                    endpoint.name
                ),
                None => assert!(result.is_ok(), "{}", endpoint.name),
            }
        }
    }

    #[test]
    fn every_endpoint_checks_the_body_after_identifiers() {
        for endpoint in crate::endpoint::endpoints() {
            let params = with_identifiers(endpoint.path_params());
            let result = client().build(endpoint.operation, &params);
            if endpoint.requires_body() {
                assert!(
                    matches!(result, Err(ApiError::MissingParameter(ref name)) if name == "body"),
                    "{}: {result:?}",
                    endpoint.name
                );
                let params = params.json_body(json!({}));
                assert!(client().build(endpoint.operation, &params).is_ok(), "{}", endpoint.name);
            } else {
                assert!(result.is_ok(), "{}", endpoint.name);
            }
        }
    }

    #[test]
    fn every_path_identifier_is_required() {
        for endpoint in crate::endpoint::endpoints() {
            for missing in endpoint.path_params() {
                let params = with_identifiers(endpoint.path_params().filter(|name| *name != missing))
                    .json_body(json!({}));
                let result = client().build(endpoint.operation, &params);
                assert!(
                    matches!(result, Err(ApiError::MissingParameter(ref name)) if name == missing),
                    "{} without {missing}: {result:?}",
                    endpoint.name
                );
            }
        }
    }

    #[test]
    fn from_options_carries_the_token() {
        let options = ClientOptions::new("http://localhost").with_token(Token::query("api_token", "t"));
        let client = CachetClient::from_options(options).unwrap();
        let req = client.build(Operation::Ping, &Params::default()).unwrap();
        assert_eq!(req.query_value("api_token"), Some("t"));
        assert!(matches!(
            CachetClient::from_options(ClientOptions::default()),
            Err(ApiError::EmptyDomain)
        ));
    }

    #[test]
    fn body_is_carried_for_writes_only() {
        let params = Params::new().component(1).json_body(json!({"status": 2}));
        let req = client().build(Operation::UpdateComponentById, &params).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.body, Some(RequestBody::Json(json!({"status": 2}))));

        let req = client().build(Operation::GetComponentById, &params).unwrap();
        assert!(req.body.is_none());
    }

    #[test]
    fn named_query_fields_use_wire_names() {
        let params = Params::new().per_page(5).group_id(2).page(3).enabled(true);
        let req = client().build(Operation::GetComponents, &params).unwrap();
        assert_eq!(req.query_value("per_page"), Some("5"));
        assert_eq!(req.query_value("group_id"), Some("2"));
        assert_eq!(req.query_value("page"), Some("3"));
        assert_eq!(req.query_value("enabled"), Some("true"));
        assert_eq!(req.query_value("perPage"), None);

        let req = client()
            .build(Operation::GetIncidents, &Params::new().component_id(8))
            .unwrap();
        assert_eq!(req.query_value("component_id"), Some("8"));
    }

    #[test]
    fn undeclared_inputs_are_ignored() {
        let params = Params::new().group_id(2).visible(true);
        let req = client().build(Operation::GetMetrics, &params).unwrap();
        assert!(req.query.is_empty());
    }

    #[test]
    fn extra_query_is_merged_last() {
        let params = Params::new().page(1).query("page", 4).query("include", "tags");
        let req = client().build(Operation::GetIncidents, &params).unwrap();
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "4".to_string()),
                ("include".to_string(), "tags".to_string()),
            ]
        );
    }

    #[test]
    fn header_token_replaces_authorization() {
        let mut client = client();
        client.set_token("t", Some("X-Token"), false);
        for operation in [Operation::Ping, Operation::GetMetrics, Operation::DeleteIncidentById] {
            let req = client.build(operation, &Params::new().incident(1)).unwrap();
            assert_eq!(req.header("X-Token"), Some("t"));
            assert_eq!(req.header("Authorization"), None);
        }
    }

    #[test]
    fn query_token_is_attached() {
        let mut client = client();
        client.set_token("t", Some("key"), true);
        let req = client.build(Operation::GetComponents, &Params::default()).unwrap();
        assert_eq!(req.query_value("key"), Some("t"));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn bearer_token_by_default() {
        let req = client().build(Operation::Ping, &Params::default()).unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer "));

        let client = CachetClient::new(
            ClientOptions::new("http://localhost").with_token(Token::bearer("secret")),
        )
        .unwrap();
        let req = client.build(Operation::Ping, &Params::default()).unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer secret"));
    }

    #[test]
    fn form_fields_are_carried() {
        let params = Params::new().form("name", "API");
        let req = client().build(Operation::GetComponents, &params).unwrap();
        assert_eq!(req.form, vec![("name".to_string(), "API".to_string())]);
    }

    #[test]
    fn parse_classifies_response() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: r#"{"data":"Pong!"}"#.to_string(),
        };
        let resolved = client().parse(response).unwrap();
        assert_eq!(resolved.json(), Some(&json!({"data": "Pong!"})));

        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: "Unauthorized".to_string(),
        };
        let err = client().parse(response).unwrap_err();
        assert_eq!(err.body(), Some(&ResponseBody::Text("Unauthorized".to_string())));
    }
}
