use super::command::OrderCommand;
use crate::domain::catalog::Catalog;
use crate::domain::order::{OrderLedger, OrderSnapshot, Receipt};
use crate::domain::ports::{CatalogSource, CheckoutGatewayBox, LedgerObserverBox};
use crate::error::{LedgerError, Result};

/// One kiosk screen session: a catalog, the order being built, and the
/// collaborators that react to it.
///
/// Access is single-threaded; callers that share a session across threads
/// must wrap it in their own lock.
pub struct OrderSession {
    catalog: Catalog,
    ledger: OrderLedger,
    checkout: CheckoutGatewayBox,
    observers: Vec<LedgerObserverBox>,
}

impl OrderSession {
    pub fn new(catalog: Catalog, checkout: CheckoutGatewayBox) -> Self {
        Self {
            catalog,
            ledger: OrderLedger::new(),
            checkout,
            observers: Vec::new(),
        }
    }

    /// Loads the catalog from `source` and starts an empty order.
    pub async fn open(source: &dyn CatalogSource, checkout: CheckoutGatewayBox) -> Result<Self> {
        let catalog = source.load().await?;
        tracing::info!(
            categories = catalog.categories.len(),
            products = catalog.product_count(),
            "Catalog loaded"
        );
        Ok(Self::new(catalog, checkout))
    }

    pub fn subscribe(&mut self, observer: LedgerObserverBox) {
        self.observers.push(observer);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn add_product(&mut self, name: &str) -> Result<()> {
        let product = self
            .catalog
            .find_product(name)
            .ok_or_else(|| LedgerError::UnknownProduct(name.to_string()))?;
        self.ledger.add_order_item(product)?;
        tracing::debug!(product = name, "Added to order");
        self.notify();
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        let removed = self.ledger.remove_item(index)?;
        tracing::debug!(index, product = removed.name(), "Removed from order");
        self.notify();
        Ok(())
    }

    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<()> {
        self.ledger.update_quantity(index, quantity)?;
        tracing::debug!(index, quantity, "Quantity updated");
        self.notify();
        Ok(())
    }

    pub fn increment_quantity(&mut self, index: usize) -> Result<()> {
        let quantity = self.ledger.increment_quantity(index)?;
        tracing::debug!(index, quantity = quantity.value(), "Quantity increased");
        self.notify();
        Ok(())
    }

    pub fn decrement_quantity(&mut self, index: usize) -> Result<()> {
        let quantity = self.ledger.decrement_quantity(index)?;
        tracing::debug!(index, quantity = quantity.value(), "Quantity decreased");
        self.notify();
        Ok(())
    }

    /// Empties the order. There is nothing to reset on an empty order.
    pub fn reset(&mut self) -> Result<()> {
        if self.ledger.is_empty() {
            return Err(LedgerError::EmptyOrder);
        }
        self.ledger.clear();
        tracing::debug!("Order reset");
        self.notify();
        Ok(())
    }

    /// Submits the order to the checkout gateway and starts a new one.
    ///
    /// The order is only cleared once the gateway accepted it.
    pub async fn checkout(&mut self) -> Result<Receipt> {
        let order = self.ledger.snapshot();
        if !order.can_checkout() {
            return Err(LedgerError::EmptyOrder);
        }

        let receipt = self.checkout.submit(&order).await?;
        tracing::info!(
            receipt = receipt.number,
            total = %receipt.total_price,
            "Checkout completed"
        );
        self.ledger.clear();
        self.notify();
        Ok(receipt)
    }

    /// Dispatches a command, returning the receipt when it was a checkout.
    pub async fn apply(&mut self, command: OrderCommand) -> Result<Option<Receipt>> {
        match command {
            OrderCommand::Add { product } => self.add_product(&product)?,
            OrderCommand::Remove { index } => self.remove_item(index)?,
            OrderCommand::Update { index, quantity } => self.update_quantity(index, quantity)?,
            OrderCommand::Increment { index } => self.increment_quantity(index)?,
            OrderCommand::Decrement { index } => self.decrement_quantity(index)?,
            OrderCommand::Reset => self.reset()?,
            OrderCommand::Checkout => return self.checkout().await.map(Some),
        }
        Ok(None)
    }

    /// Consumes the session and returns the final state of the order.
    pub fn into_order(self) -> OrderSnapshot {
        self.ledger.snapshot()
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let order = self.ledger.snapshot();
        for observer in &self.observers {
            observer.on_change(&order);
        }
    }
}
