//! Helpers shared by tests that need a live HTTP server

use std::sync::Arc;

use crate::api::ApiClient;
use crate::notify::ToastQueue;
use crate::router::Router;
use crate::storage::MemoryStorage;

/// Serve `app` on an ephemeral local port; returns the API base URL
pub async fn spawn_api(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test listener");
    let addr = listener.local_addr().expect("Test listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}/api", addr)
}

/// Everything a store needs, wired against `base_url`
pub struct TestContext {
    pub api: Arc<ApiClient>,
    pub storage: Arc<MemoryStorage>,
    pub router: Arc<Router>,
    pub toasts: Arc<ToastQueue>,
}

impl TestContext {
    pub fn new(base_url: &str) -> Self {
        let storage = Arc::new(MemoryStorage::with_token("test-token"));
        let router = Arc::new(Router::new());
        let api = ApiClient::new(
            base_url,
            ApiClient::DEFAULT_TIMEOUT,
            storage.clone(),
            router.clone(),
        )
        .expect("Could not build test client");
        Self {
            api: Arc::new(api),
            storage,
            router,
            toasts: Arc::new(ToastQueue::default()),
        }
    }

    pub async fn serve(app: axum::Router) -> Self {
        let base_url = spawn_api(app).await;
        Self::new(&base_url)
    }
}
