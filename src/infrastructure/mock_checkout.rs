use crate::domain::order::{OrderSnapshot, Receipt};
use crate::domain::ports::CheckoutGateway;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Checkout stand-in that accepts every order without taking payment.
///
/// Receipt numbers start at 1 and are shared between clones.
#[derive(Default, Clone)]
pub struct MockCheckout {
    issued: Arc<AtomicU64>,
}

impl MockCheckout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipts_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckoutGateway for MockCheckout {
    async fn submit(&self, order: &OrderSnapshot) -> Result<Receipt> {
        let number = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            receipt = number,
            items = order.item_count,
            total = %order.total_price.formatted(),
            "Payment accepted (mock)"
        );
        Ok(Receipt {
            number,
            item_count: order.item_count,
            total_quantity: order.total_quantity,
            total_price: order.total_price,
        })
    }
}
