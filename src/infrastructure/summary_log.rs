use crate::domain::order::OrderSnapshot;
use crate::domain::ports::LedgerObserver;

/// Observer that logs the order summary line after each change, the way the
/// kiosk's summary bar re-renders.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryLog;

impl LedgerObserver for SummaryLog {
    fn on_change(&self, order: &OrderSnapshot) {
        tracing::debug!(
            items = order.item_count,
            quantity = order.total_quantity,
            total = %order.total_price.formatted(),
            checkout_enabled = order.can_checkout(),
            "Order summary"
        );
    }
}
