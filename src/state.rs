use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::products::repo::{MemoryProductRepo, PgProductRepo, ProductRepo};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepo>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let products: Arc<dyn ProductRepo> = match config.store {
            StoreBackend::Postgres => {
                let pool = db::connect(&config).await?;
                db::migrate(&pool).await;
                Arc::new(PgProductRepo::new(pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory product store; data is lost on restart");
                Arc::new(MemoryProductRepo::new())
            }
        };
        Ok(Self::from_parts(products, Arc::new(config)))
    }

    pub fn from_parts(products: Arc<dyn ProductRepo>, config: Arc<AppConfig>) -> Self {
        Self { products, config }
    }

    /// State over an empty in-memory store, listening on an ephemeral port.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            store: StoreBackend::Memory,
            database_url: None,
            max_connections: 1,
        });
        Self::from_parts(Arc::new(MemoryProductRepo::new()), config)
    }
}
