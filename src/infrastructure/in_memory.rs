use crate::domain::catalog::Catalog;
use crate::domain::ports::CatalogSource;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Serves a catalog that is already in memory.
///
/// Clones share the same catalog. Useful for tests and for embedding a
/// catalog that was built in code.
#[derive(Default, Clone)]
pub struct InMemoryCatalogSource {
    catalog: Arc<Catalog>,
}

impl InMemoryCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        Ok(Catalog::clone(&self.catalog))
    }
}
