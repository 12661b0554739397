//! `reqwest` execution of plain-data requests.

use reqwest::Client;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Perform one HTTP exchange. Any status code is a successful exchange;
/// only transport failures are errors.
pub(crate) async fn send(client: &Client, request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let HttpRequest {
        method,
        url,
        query,
        headers,
        body,
        form,
    } = request;

    let mut builder = client.request(method.into(), url);
    if !query.is_empty() {
        builder = builder.query(&query);
    }
    for (name, value) in &headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder = if form.is_empty() {
        match body {
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Raw(bytes)) => builder.body(bytes),
            None => builder,
        }
    } else {
        builder.form(&form)
    };

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.text().await?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
