use crate::domain::catalog::Catalog;
use crate::domain::ports::CatalogSource;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Loads the catalog from a JSON file on disk.
///
/// The file holds `{"categories": [{"name", "products": [{"name", "price", "image"}]}]}`.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LedgerError::CatalogNotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let catalog = serde_json::from_slice(&bytes)?;
        Ok(catalog)
    }
}
