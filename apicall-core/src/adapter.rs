//! The API call adapter: one request in, one decoded result (or failure) out.
//!
//! The adapter resolves a [`RequestSpec`] into a concrete request, hands it to
//! its [`Transport`] exactly once, and decodes whatever comes back. It never
//! retries and keeps nothing between calls.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    error::{ApiFailure, ApiResult},
    request::{Credential, Method, RequestSpec},
    transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse},
};

#[derive(Debug, Clone, Default)]
pub struct ApiAdapter<T = ReqwestTransport> {
    transport: T,
}

impl<T: Transport> ApiAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue the request described by `spec` and decode the body into `R`.
    #[instrument(level = "debug", skip_all, fields(method = %spec.method(), endpoint = spec.endpoint()))]
    pub async fn call<R: DeserializeOwned>(&self, spec: &RequestSpec) -> ApiResult<R> {
        let request = resolve(spec)?;
        debug!(url = %redacted_url(spec), "issuing request");

        let response = self.transport.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "response received");

        decode(spec, &response)
    }

    /// Like [`call`](Self::call), but hands the outcome to `continuation`,
    /// which runs exactly once.
    pub async fn call_with<R, F, U>(&self, spec: &RequestSpec, continuation: F) -> U
    where
        R: DeserializeOwned,
        F: FnOnce(ApiResult<R>) -> U,
    {
        let result = self.call(spec).await;
        continuation(result)
    }
}

/// Path values are encoded as a single segment; `*` stays readable for the log mask.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'*');

const MASK: &str = "***";

/// Turn a spec into a concrete request: path parameters, query string,
/// credentials and (for POST) the JSON body.
pub fn resolve(spec: &RequestSpec) -> ApiResult<TransportRequest> {
    let url = build_url(spec, false)?;

    let mut headers = spec.headers().to_vec();
    for credential in spec.credentials() {
        if let Credential::Header { name, value } = credential {
            headers.push((name.clone(), value.clone()));
        }
    }

    let body = match spec.method() {
        Method::Post => spec.body().cloned(),
        Method::Get => None,
    };

    Ok(TransportRequest {
        method: spec.method(),
        url,
        headers,
        body,
    })
}

/// The resolved URL as it is safe to log: every credential value is masked.
pub fn redacted_url(spec: &RequestSpec) -> String {
    build_url(spec, true)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| spec.endpoint().to_string())
}

fn build_url(spec: &RequestSpec, masked: bool) -> ApiResult<Url> {
    let shown = |value: &str| -> String {
        if masked && !value.is_empty() { MASK.to_string() } else { value.to_string() }
    };

    let mut path_values: Vec<(&str, String)> = spec
        .path_params()
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();
    for credential in spec.credentials() {
        if let Credential::PathParam { name, value } = credential {
            path_values.push((name.as_str(), shown(value)));
        }
    }

    let endpoint = substitute_path(spec.endpoint(), &path_values)?;
    let mut url = Url::parse(&endpoint)
        .map_err(|e| ApiFailure::InvalidRequest(format!("{}: {e}", spec.endpoint())))?;
    if url.cannot_be_a_base() {
        return Err(ApiFailure::InvalidRequest(format!(
            "{} is not an absolute http(s) URL",
            spec.endpoint()
        )));
    }

    let mut query: Vec<(&str, String)> =
        spec.query().iter().map(|(k, v)| (k.as_str(), v.clone())).collect();

    for credential in spec.credentials() {
        match credential {
            Credential::BasicAuth { username, password } => {
                url.set_username(&shown(username)).map_err(|()| {
                    ApiFailure::InvalidRequest(format!("cannot set username on {}", spec.endpoint()))
                })?;
                url.set_password(Some(&shown(password))).map_err(|()| {
                    ApiFailure::InvalidRequest(format!("cannot set password on {}", spec.endpoint()))
                })?;
            }
            Credential::QueryToken { name, value } => query.push((name.as_str(), shown(value))),
            Credential::Header { .. } | Credential::PathParam { .. } => {}
        }
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
}

/// Replace every `{name}` of `template` with its percent-encoded value.
/// Placeholders are looked up in the template only, never in substituted text.
fn substitute_path(template: &str, values: &[(&str, String)]) -> ApiResult<String> {
    let mut endpoint = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        let value = values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| {
                ApiFailure::InvalidRequest(format!(
                    "unresolved path parameter {{{name}}} in {template}"
                ))
            })?;
        if value == "." || value == ".." {
            return Err(ApiFailure::InvalidRequest(format!(
                "path parameter {{{name}}} cannot be '{value}'"
            )));
        }

        endpoint.push_str(&rest[..open]);
        endpoint.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[open + len + 1..];
    }
    endpoint.push_str(rest);

    Ok(endpoint)
}

fn decode<R: DeserializeOwned>(spec: &RequestSpec, response: &TransportResponse) -> ApiResult<R> {
    let value: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiFailure::decode(e, &response.body))?;

    if let Some(message) = spec.error_field().and_then(|field| application_error(&value, field)) {
        return Err(ApiFailure::Application(message));
    }

    serde_json::from_value(value).map_err(|e| ApiFailure::decode(e, &response.body))
}

/// Service-reported error carried in `field` of an object body.
fn application_error(body: &Value, field: &str) -> Option<String> {
    let error = body.as_object()?.get(field)?;
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(details) => Some(
            ["info", "message", "error"]
                .iter()
                .find_map(|key| details.get(*key).and_then(Value::as_str))
                .map(str::to_owned)
                .unwrap_or_else(|| error.to_string()),
        ),
        other => Some(other.to_string()),
    }
}
