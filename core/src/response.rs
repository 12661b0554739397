//! Response classification.
//!
//! Every endpoint shares one outcome shape: 204 resolves without a body,
//! any other 2xx resolves with the body, everything else is an
//! `ApiError::Http`. Bodies labelled as JSON are parsed opportunistically;
//! text that fails to parse is passed through unchanged.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{find_header, HttpResponse};

/// A response body, parsed when the server labelled it as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parse `raw` as JSON when `content_type` is a JSON media type.
    pub fn from_raw(content_type: Option<&str>, raw: String) -> Self {
        if content_type.is_some_and(is_json_content_type) {
            if let Ok(value) = serde_json::from_str(&raw) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(raw)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(_) => None,
            ResponseBody::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// A successful (2xx) Cachet response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// `None` for 204 No Content.
    pub body: Option<ResponseBody>,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn json(&self) -> Option<&Value> {
        self.body.as_ref().and_then(ResponseBody::as_json)
    }

    /// Deserialize the `data` member of Cachet's `{"data": ...}` envelope.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let data = self
            .json()
            .and_then(|value| value.get("data"))
            .cloned()
            .unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}

/// True for `application/json` and `application/<anything>+json`, with or
/// without media type parameters.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

/// Map an `HttpResponse` onto the three outcome shapes.
pub fn classify(response: HttpResponse) -> Result<ApiResponse, ApiError> {
    let HttpResponse {
        status,
        headers,
        body,
    } = response;

    if status == 204 {
        return Ok(ApiResponse {
            status,
            headers,
            body: None,
        });
    }

    let body = ResponseBody::from_raw(find_header(&headers, "content-type"), body);
    if (200..=299).contains(&status) {
        Ok(ApiResponse {
            status,
            headers,
            body: Some(body),
        })
    } else {
        Err(ApiError::Http {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: content_type
                .map(|ct| vec![("content-type".to_string(), ct.to_string())])
                .unwrap_or_default(),
            body: body.to_string(),
        }
    }

    #[test]
    fn no_content_resolves_without_body() {
        let resolved = classify(response(204, Some("application/json"), "")).unwrap();
        assert_eq!(resolved.status, 204);
        assert!(resolved.body.is_none());
    }

    #[test]
    fn json_success_is_parsed() {
        let resolved = classify(response(
            200,
            Some("application/json; charset=utf-8"),
            r#"{"data":{"id":7}}"#,
        ))
        .unwrap();
        assert_eq!(resolved.json(), Some(&json!({"data": {"id": 7}})));
    }

    #[test]
    fn unparseable_json_falls_back_to_text() {
        let resolved = classify(response(200, Some("application/json"), "{not json")).unwrap();
        assert_eq!(
            resolved.body,
            Some(ResponseBody::Text("{not json".to_string()))
        );
    }

    #[test]
    fn non_json_content_type_is_not_parsed() {
        let resolved = classify(response(201, Some("text/plain"), "[1,2]")).unwrap();
        assert_eq!(resolved.body, Some(ResponseBody::Text("[1,2]".to_string())));
    }

    #[test]
    fn missing_content_type_is_not_parsed() {
        let resolved = classify(response(200, None, "{}")).unwrap();
        assert_eq!(resolved.body, Some(ResponseBody::Text("{}".to_string())));
    }

    #[test]
    fn client_and_server_errors_are_rejected_with_body() {
        let err = classify(response(404, Some("application/json"), r#"{"errors":[]}"#)).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some(&ResponseBody::Json(json!({"errors": []}))));

        let err = classify(response(500, Some("text/html"), "boom")).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some(&ResponseBody::Text("boom".to_string())));
    }

    #[test]
    fn redirects_are_rejected() {
        let err = classify(response(304, None, "")).unwrap_err();
        assert_eq!(err.status(), Some(304));
    }

    #[test]
    fn json_media_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/vnd.api+json"));
        assert!(!is_json_content_type("text/json"));
        assert!(!is_json_content_type("application/xml"));
    }

    #[test]
    fn data_reads_the_envelope() {
        #[derive(serde::Deserialize)]
        struct Item {
            id: u64,
        }

        let resolved = classify(response(200, Some("application/json"), r#"{"data":{"id":3}}"#)).unwrap();
        let item: Item = resolved.data().unwrap();
        assert_eq!(item.id, 3);

        let empty = classify(response(204, None, "")).unwrap();
        assert!(matches!(empty.data::<Item>(), Err(ApiError::Json(_))));
    }
}
