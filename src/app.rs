use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::notify::ToastQueue;
use crate::router::Router;
use crate::storage::{FileStorage, TokenStorage};
use crate::stores::{BudgetsStore, CategoriesStore, Session, TransactionsStore};

/// Every long-lived client component, wired together once at startup
pub struct App {
    pub config: ClientConfig,
    pub storage: Arc<dyn TokenStorage>,
    pub router: Arc<Router>,
    pub api: Arc<ApiClient>,
    pub toasts: Arc<ToastQueue>,
    pub session: Session,
    pub transactions: TransactionsStore,
    pub categories: CategoriesStore,
    pub budgets: BudgetsStore,
}

impl App {
    /// Wire the client with file-backed token storage from the config
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: ClientConfig, storage: Arc<dyn TokenStorage>) -> Result<Self, ApiError> {
        let router = Arc::new(Router::new());
        let api = Arc::new(ApiClient::from_config(&config, storage.clone(), router.clone())?);
        let toasts = Arc::new(ToastQueue::new(config.toast_timeout));
        debug!("API client targeting {}", api.base_url());

        Ok(Self {
            session: Session::seeded(storage.clone()),
            transactions: TransactionsStore::with_page_size(api.clone(), toasts.clone(), config.page_size),
            categories: CategoriesStore::new(api.clone(), toasts.clone()),
            budgets: BudgetsStore::new(api.clone(), toasts.clone()),
            config,
            storage,
            router,
            api,
            toasts,
        })
    }

    /// Id of the signed-in user, falling back to the seeded demo user
    pub fn user_id(&self) -> i64 {
        self.session
            .current_user_id()
            .unwrap_or(crate::models::CurrentUser::seeded().id)
    }
}
