use carbon_core::error::CarbonError;
use carbon_core::factors::Catalog;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared, read-only state handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Result<AppState, CarbonError> {
        let catalog = Catalog::load(
            config.factors_path.as_deref(),
            config.alternatives_path.as_deref(),
        )?;

        if let Some(dir) = &config.upload_dir {
            std::fs::create_dir_all(dir)?;
        }

        Ok(AppState {
            catalog: Arc::new(catalog),
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}
