//! HTTP client for the TikTok Business API.

use std::time::Duration;

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::{json, Map, Value};
use url::Url;

use crate::{
    config::Config,
    errors::{ApiError, RequestSummary},
    types::ApiResponse,
    Error,
};

/// Request parameters: a JSON object. Query string for GET/DELETE, body
/// for POST/PUT.
pub type Params = Map<String, Value>;

const ACCESS_TOKEN_HEADER: &str = "Access-Token";
const JSON_CONTENT_TYPE: &str = "application/json";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// A single binary field of a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name, e.g. `image_file`.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One call to the API, built fresh for every request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `v1.3/campaign/get/`.
    pub path: String,
    pub params: Params,
    /// Extra headers. They replace the defaults for the keys they name.
    pub headers: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            params: Params::new(),
            headers: Vec::new(),
            file: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Attaches a file and switches the body to `multipart/form-data`.
    pub fn with_file(mut self, file: FilePart) -> Self {
        self.file = Some(file);
        self.with_header(CONTENT_TYPE.as_str(), MULTIPART_CONTENT_TYPE)
    }
}

/// HTTP client for the TikTok Business API.
///
/// Owns its [`Config`] and a pooled `reqwest::Client` built from it. Every
/// call goes through [`Client::request`], which attaches the access token,
/// serializes parameters, and turns failed envelopes into [`Error::Api`].
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client from an explicit configuration.
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tiktok_business_api/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .connect_timeout(config.open_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?;
        Ok(Self { config, http })
    }

    /// Creates a client configured from `TIKTOK_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(Config::from_env())
    }

    /// Creates a client with default settings and a custom base URL.
    /// Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(Config::default().with_api_base_url(base_url))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stores a token issued by the auth flow; it is sent on every later request.
    pub fn set_access_token(&mut self, access_token: &str) {
        self.config.access_token = Some(access_token.to_string());
    }

    pub fn clear_access_token(&mut self) {
        self.config.access_token = None;
    }

    /// Joins the base URL and `path` with exactly one `/` between them.
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&join_url(&self.config.api_base_url, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e)
        })
    }

    /// Sends a GET request with `params` as the query string.
    pub async fn get(&self, path: &str, params: Params) -> Result<ApiResponse, Error> {
        self.request(ApiRequest::get(path).with_params(params)).await
    }

    /// Sends a POST request with `params` as the JSON body.
    pub async fn post(&self, path: &str, params: Params) -> Result<ApiResponse, Error> {
        self.request(ApiRequest::post(path).with_params(params)).await
    }

    /// Sends one request and validates the response envelope.
    ///
    /// Succeeds only for a 2xx status whose body has no `code` or
    /// `code == 0`. Bodies that are not JSON are not an error by themselves;
    /// they become `{"error": "Invalid JSON response: ..."}`.
    pub async fn request(&self, req: ApiRequest) -> Result<ApiResponse, Error> {
        let mut url = self.url_for(&req.path)?;
        let headers = self.build_headers(&req.headers)?;
        let multipart = is_multipart(&headers);

        if is_query_method(&req.method) {
            add_query_params(&mut url, &req.params);
        }

        if self.config.debug {
            log_request(&req.method, &url, &req.params, &headers);
        }

        let response = self.send_with_retry(&req, &url, &headers, multipart).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;

        if self.config.debug {
            tracing::debug!("Response status: {}", status);
            tracing::debug!("Response body: {}", truncate_body(&text));
        }

        let summary = RequestSummary {
            method: req.method.to_string(),
            url: url.to_string(),
            params: Value::Object(req.params),
        };
        handle_response(status, &text, summary)
    }

    fn build_headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if let Some(token) = &self.config.access_token {
            let value = HeaderValue::from_str(token).map_err(|_| {
                Error::InvalidHeader("access token is not a valid header value".to_string())
            })?;
            headers.insert(HeaderName::from_static("access-token"), value);
        }

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeader(format!("invalid value for header {}", name)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn build_http_request(
        &self,
        req: &ApiRequest,
        url: &Url,
        headers: &HeaderMap,
        multipart: bool,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let mut headers = headers.clone();
        if multipart {
            // reqwest writes its own content type carrying the boundary.
            headers.remove(CONTENT_TYPE);
        }
        let mut builder = self
            .http
            .request(req.method.clone(), url.clone())
            .headers(headers);

        if is_query_method(&req.method) {
            return Ok(builder);
        }

        if multipart {
            if !req.params.is_empty() || req.file.is_some() {
                builder = builder.multipart(build_form(&req.params, req.file.as_ref())?);
            }
        } else if !req.params.is_empty() {
            builder = builder.body(serde_json::to_string(&req.params)?);
        }
        Ok(builder)
    }

    async fn send_with_retry(
        &self,
        req: &ApiRequest,
        url: &Url,
        headers: &HeaderMap,
        multipart: bool,
    ) -> Result<reqwest::Response, Error> {
        let retryable = is_idempotent(&req.method);
        let mut attempt = 0usize;
        loop {
            let builder = self.build_http_request(req, url, headers, multipart)?;
            match builder.send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    attempt += 1;
                    if !retryable || attempt > self.config.max_retries || !is_transient(&err) {
                        tracing::error!("{} {} failed: {}", req.method, url.path(), err);
                        return Err(Error::Transport(err));
                    }
                    let delay = retry_delay(attempt);
                    tracing::warn!(
                        "{} {} failed (attempt {}/{}), retrying in {:.1}s",
                        req.method,
                        url.path(),
                        attempt,
                        self.config.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Classifies a raw response into the parsed envelope or an [`ApiError`].
fn handle_response(status: u16, text: &str, request: RequestSummary) -> Result<ApiResponse, Error> {
    let body = parse_body(text);
    if !is_successful(status, &body) {
        let err = ApiError::from_response(status, body, Some(request));
        tracing::error!("Request failed with status {}: {}", status, err.message());
        return Err(err.into());
    }
    Ok(ApiResponse::new(body))
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text)
        .unwrap_or_else(|_| json!({ "error": format!("Invalid JSON response: {}", text) }))
}

fn is_successful(status: u16, body: &Value) -> bool {
    if !(200..300).contains(&status) {
        return false;
    }
    match body.get("code") {
        Some(code) => code.as_i64() == Some(0),
        None => true,
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn is_query_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE | Method::HEAD)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

fn retry_delay(attempt: usize) -> Duration {
    const BASE_MS: u64 = 250;
    const MAX_MS: u64 = 2000;
    let shift = (attempt.saturating_sub(1)).min(8) as u32;
    let base = BASE_MS.saturating_mul(1u64 << shift).min(MAX_MS);
    let jitter = rand::thread_rng().gen_range(0.8..1.2);
    Duration::from_millis((base as f64 * jitter) as u64)
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().starts_with(MULTIPART_CONTENT_TYPE))
        .unwrap_or(false)
}

/// String form of a parameter for query strings and multipart text fields.
///
/// Lists and objects are sent as JSON text, which is what the API expects
/// for fields like `campaign_ids`. Nulls are dropped.
pub(crate) fn param_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn add_query_params(url: &mut Url, params: &Params) {
    let pairs: Vec<(&String, String)> = params
        .iter()
        .filter_map(|(k, v)| param_to_string(v).map(|s| (k, s)))
        .collect();
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, value) in pairs {
        query.append_pair(key, &value);
    }
}

fn build_form(params: &Params, file: Option<&FilePart>) -> Result<Form, Error> {
    let mut form = Form::new();
    for (key, value) in params {
        if let Some(text) = param_to_string(value) {
            form = form.text(key.clone(), text);
        }
    }
    if let Some(file) = file {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}

fn log_request(method: &Method, url: &Url, params: &Params, headers: &HeaderMap) {
    let shown: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let value = if name.as_str().eq_ignore_ascii_case(ACCESS_TOKEN_HEADER) {
                "***".to_string()
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.to_string(), value)
        })
        .collect();
    tracing::debug!("Request: {} {}", method, url);
    let params = Value::Object(params.clone());
    tracing::debug!("Parameters: {}", params);
    tracing::debug!("Headers: {:?}", shown);
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn summary() -> RequestSummary {
        RequestSummary {
            method: "GET".to_string(),
            url: "https://example.com/v1.3/campaign/get/".to_string(),
            params: json!({}),
        }
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("https://business-api.tiktok.com/open_api/", "v1.3/campaign/get/"),
            "https://business-api.tiktok.com/open_api/v1.3/campaign/get/"
        );
        assert_eq!(
            join_url("https://business-api.tiktok.com/open_api", "/v1.3/oauth2/advertiser/get/"),
            "https://business-api.tiktok.com/open_api/v1.3/oauth2/advertiser/get/"
        );
        assert_eq!(join_url("http://127.0.0.1:8080", "x"), "http://127.0.0.1:8080/x");
    }

    #[test]
    fn param_strings() {
        assert_eq!(param_to_string(&json!("abc")), Some("abc".to_string()));
        assert_eq!(param_to_string(&json!(100)), Some("100".to_string()));
        assert_eq!(param_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(param_to_string(&json!(["1", "2"])), Some(r#"["1","2"]"#.to_string()));
        assert_eq!(param_to_string(&json!({"a": 1})), Some(r#"{"a":1}"#.to_string()));
        assert_eq!(param_to_string(&Value::Null), None);
    }

    #[test]
    fn query_params_are_appended_in_order() {
        let mut url = Url::parse("https://example.com/v1.3/campaign/get/").unwrap();
        let mut params = Params::new();
        params.insert("advertiser_id".to_string(), json!("123"));
        params.insert("filtering".to_string(), json!("{\"campaign_ids\":[\"9\"]}"));
        params.insert("page".to_string(), json!(1));
        params.insert("skipped".to_string(), Value::Null);
        add_query_params(&mut url, &params);

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("advertiser_id".to_string(), "123".to_string()),
                ("filtering".to_string(), "{\"campaign_ids\":[\"9\"]}".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn empty_params_leave_url_untouched() {
        let mut url = Url::parse("https://example.com/path/").unwrap();
        add_query_params(&mut url, &Params::new());
        assert_eq!(url.as_str(), "https://example.com/path/");
    }

    #[test]
    fn invalid_json_becomes_error_data() {
        assert_eq!(
            parse_body("<html>oops</html>"),
            json!({"error": "Invalid JSON response: <html>oops</html>"})
        );
        assert_eq!(parse_body(""), json!({}));
    }

    #[test]
    fn success_requires_2xx_and_zero_code() {
        assert!(is_successful(200, &json!({"code": 0, "data": {}})));
        assert!(is_successful(204, &json!({})));
        assert!(is_successful(200, &json!({"error": "Invalid JSON response: x"})));
        assert!(is_successful(200, &json!([1, 2])));
        assert!(!is_successful(200, &json!({"code": 40001, "message": "nope"})));
        assert!(!is_successful(200, &json!({"code": "0"})));
        assert!(!is_successful(500, &json!({"code": 0})));
    }

    #[test]
    fn nonzero_code_on_2xx_is_unclassified() {
        let err = handle_response(200, r#"{"code": 40100, "message": "Too many"}"#, summary())
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.kind(), ErrorKind::Unclassified);
                assert_eq!(api.status_code(), 200);
                assert_eq!(api.message(), "Too many");
                assert_eq!(api.request().unwrap().method, "GET");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn bad_gateway_with_html_is_api_kind() {
        let err = handle_response(502, "<html>Bad Gateway</html>", summary()).unwrap_err();
        assert_eq!(err.api_kind(), Some(ErrorKind::Api));
        assert_eq!(err.status_code(), Some(502));
    }

    #[test]
    fn caller_headers_override_defaults_per_key() {
        let client = Client::new(Config::default().with_access_token("tok")).unwrap();
        let headers = client
            .build_headers(&[("content-type".to_string(), "multipart/form-data".to_string())])
            .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "multipart/form-data");
        assert_eq!(headers.get("Access-Token").unwrap(), "tok");
        assert!(is_multipart(&headers));
    }

    #[test]
    fn no_token_header_without_token() {
        let client = Client::new(Config::default()).unwrap();
        let headers = client.build_headers(&[]).unwrap();
        assert!(headers.get("Access-Token").is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(!is_multipart(&headers));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let client = Client::new(Config::default()).unwrap();
        let err = client
            .build_headers(&[("bad header".to_string(), "x".to_string())])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn set_and_clear_token() {
        let mut client = Client::with_base_url("http://localhost:1234").unwrap();
        client.set_access_token("abc");
        assert_eq!(client.config().access_token.as_deref(), Some("abc"));
        client.clear_access_token();
        assert!(client.config().access_token.is_none());
    }

    #[test]
    fn retry_delay_grows_and_caps() {
        let first = retry_delay(1);
        assert!(first >= Duration::from_millis(200) && first <= Duration::from_millis(300));
        let capped = retry_delay(10);
        assert!(capped <= Duration::from_millis(2400));
    }

    #[test]
    fn truncate_body_respects_limit() {
        let long = "x".repeat(3000);
        let out = truncate_body(&long);
        assert!(out.ends_with("...[truncated]"));
        assert_eq!(truncate_body("short"), "short");
    }
}
