//! Application state for dependency injection.

use std::sync::Arc;

use async_trait::async_trait;

use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

/// Connectivity check behind `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthProbe for Database {
    async fn ping(&self) -> Result<(), String> {
        Database::ping(self).await.map_err(|e| e.to_string())
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub database: Arc<dyn HealthProbe>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<dyn HealthProbe>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
