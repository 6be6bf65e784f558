use super::catalog::Catalog;
use super::order::{OrderSnapshot, Receipt};
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the product catalog. The order core never mutates what it returns.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;
}

/// Takes payment for a finished order.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn submit(&self, order: &OrderSnapshot) -> Result<Receipt>;
}

/// Notified with a fresh snapshot after every successful order mutation.
pub trait LedgerObserver: Send + Sync {
    fn on_change(&self, order: &OrderSnapshot);
}

pub type CatalogSourceBox = Box<dyn CatalogSource>;
pub type CheckoutGatewayBox = Box<dyn CheckoutGateway>;
pub type LedgerObserverBox = Box<dyn LedgerObserver>;
