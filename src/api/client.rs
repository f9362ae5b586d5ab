use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ApiError;
use super::interceptor::{AuthInterceptor, Interceptor, UnauthorizedInterceptor};
use crate::config::ClientConfig;
use crate::router::Navigator;
use crate::storage::TokenStorage;
use crate::utils::extract_error_message;

/// HTTP transport for the Expense Tracker API
///
/// Every request goes through the interceptor chain: request hooks run in
/// order before sending, error hooks run on every failure before it is
/// returned. Errors are never swallowed.
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Client without interceptors
    pub fn bare(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            interceptors: Vec::new(),
        })
    }

    /// Client with the standard chain: bearer token injection and 401 handling
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Ok(Self::bare(base_url, timeout)?
            .with_interceptor(Arc::new(AuthInterceptor::new(storage.clone())))
            .with_interceptor(Arc::new(UnauthorizedInterceptor::new(storage, navigator))))
    }

    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.timeout, storage, navigator)
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Default headers, then every request hook in order
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for interceptor in &self.interceptors {
            interceptor.on_request(&mut headers)?;
        }
        Ok(headers)
    }

    /// Run error hooks, then hand the error back for propagation
    fn reject(&self, error: ApiError) -> ApiError {
        for interceptor in &self.interceptors {
            interceptor.on_error(&error);
        }
        error
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let headers = self.create_headers()?;
        Ok(self.http_client.request(method, url).headers(headers))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).map_err(|e| self.reject(e))?;
        self.execute(builder.query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).map_err(|e| self.reject(e))?;
        self.execute(builder.json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).map_err(|e| self.reject(e))?;
        self.execute(builder.json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path).map_err(|e| self.reject(e))?;
        self.execute(builder).await
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.reject(ApiError::from_transport(e)))?;

        if !response.status().is_success() {
            let error = Self::handle_error_response(response).await;
            return Err(self.reject(error));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.reject(ApiError::from_transport(e)))?;

        // 204 and other empty bodies decode as JSON null, which covers `()`
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };

        serde_json::from_str::<T>(body).map_err(|e| {
            self.reject(ApiError::Unexpected(format!("Failed to parse response: {}", e)))
        })
    }

    /// Turn an error status into an [`ApiError::Status`] with a readable message
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body_text);

        if status >= 500 {
            warn!("Server error {}: {}", status, body_text);
        } else {
            warn!("Request failed with {}: {}", status, message);
        }

        ApiError::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{NETWORK_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
    use crate::router::{Router, LOGIN_PATH};
    use crate::storage::MemoryStorage;
    use crate::test_utils::spawn_api;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::get;
    use axum::Json;
    use serde_json::{json, Value};

    async fn echo_auth(headers: AxumHeaders) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Json(json!({ "authorization": auth, "contentType": content_type }))
    }

    fn client(base_url: &str, storage: Arc<MemoryStorage>, router: Arc<Router>) -> ApiClient {
        ApiClient::new(base_url, ApiClient::DEFAULT_TIMEOUT, storage, router).unwrap()
    }

    #[tokio::test]
    async fn test_bearer_header_attached_when_token_stored() {
        let base = spawn_api(axum::Router::new().route("/api/echo", get(echo_auth))).await;
        let storage = Arc::new(MemoryStorage::with_token("abc123"));
        let api = client(&base, storage, Arc::new(Router::new()));

        let body: Value = api.get("/echo", &[]).await.unwrap();
        assert_eq!(body["authorization"], "Bearer abc123");
        assert_eq!(body["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_no_authorization_without_token() {
        let base = spawn_api(axum::Router::new().route("/api/echo", get(echo_auth))).await;
        let api = client(&base, Arc::new(MemoryStorage::new()), Arc::new(Router::new()));

        let body: Value = api.get("echo", &[]).await.unwrap();
        assert!(body["authorization"].is_null());
    }

    #[tokio::test]
    async fn test_401_clears_token_and_redirects_to_login() {
        let app = axum::Router::new().route(
            "/api/echo",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))) }),
        );
        let base = spawn_api(app).await;
        let storage = Arc::new(MemoryStorage::with_token("stale"));
        let router = Arc::new(Router::starting_at("/budgets"));
        let api = client(&base, storage.clone(), router.clone());

        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Unauthorized");
        assert_eq!(storage.token(), None);
        assert_eq!(router.current_path(), LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_error_status_keeps_token_and_extracts_message() {
        let app = axum::Router::new().route(
            "/api/echo",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Amount must be greater than 0", "error": "Bad Request" })),
                )
            }),
        );
        let base = spawn_api(app).await;
        let storage = Arc::new(MemoryStorage::with_token("fine"));
        let router = Arc::new(Router::new());
        let api = client(&base, storage.clone(), router.clone());

        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Amount must be greater than 0");
        assert_eq!(storage.token(), Some("fine".to_string()));
        assert_eq!(router.current_path(), "/");
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_default_message() {
        let app = axum::Router::new().route("/api/echo", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let base = spawn_api(app).await;
        let api = client(&base, Arc::new(MemoryStorage::new()), Arc::new(Router::new()));

        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "An error occurred");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(
            &format!("http://{}/api", addr),
            Arc::new(MemoryStorage::new()),
            Arc::new(Router::new()),
        );
        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let app = axum::Router::new().route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let base = spawn_api(app).await;
        let api = ApiClient::new(
            base,
            Duration::from_millis(100),
            Arc::new(MemoryStorage::new()),
            Arc::new(Router::new()),
        )
        .unwrap();

        let err = api.get::<Value>("/slow", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_unexpected_error() {
        let app = axum::Router::new().route("/api/echo", get(|| async { "not json" }));
        let base = spawn_api(app).await;
        let api = client(&base, Arc::new(MemoryStorage::new()), Arc::new(Router::new()));

        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
        assert_eq!(err.message(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let app = axum::Router::new().route("/api/thing", axum::routing::delete(|| async { StatusCode::NO_CONTENT }));
        let base = spawn_api(app).await;
        let api = client(&base, Arc::new(MemoryStorage::new()), Arc::new(Router::new()));

        api.delete("/thing").await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_token_header_is_rejected_before_sending() {
        let storage = Arc::new(MemoryStorage::with_token("bad\ntoken"));
        let api = client("http://127.0.0.1:9/api", storage, Arc::new(Router::new()));

        let err = api.get::<Value>("/echo", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }
}
