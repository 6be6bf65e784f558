use super::catalog::Product;
use super::money::Price;
use crate::error::{LedgerError, Result};
use serde::Serialize;

/// Number of units of a product on one order line.
///
/// Always at least 1: a line whose quantity would reach zero has to be
/// removed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ONE: Self = Self(1);

    pub fn new(value: i64) -> Result<Self> {
        match u64::try_from(value) {
            Ok(v) if v >= 1 => Ok(Self(v)),
            _ => Err(LedgerError::InvalidQuantity(value)),
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    fn checked_increment(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

/// One product line of an order.
///
/// Only the ledger builds or changes lines, so `line_total` always equals
/// `unit_price * quantity`.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct LineItem {
    name: String,
    unit_price: Price,
    quantity: Quantity,
    line_total: Price,
}

impl LineItem {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            unit_price: product.price,
            quantity: Quantity::ONE,
            line_total: product.price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn line_total(&self) -> Price {
        self.line_total
    }
}

/// Owned view of an order at one point in time.
///
/// Handed to observers after each mutation and to the checkout gateway.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct OrderSnapshot {
    pub items: Vec<LineItem>,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_price: Price,
}

impl OrderSnapshot {
    pub fn can_checkout(&self) -> bool {
        !self.items.is_empty()
    }
}

/// Outcome of a completed checkout.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Receipt {
    /// Sequence number assigned by the gateway.
    pub number: u64,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total_price: Price,
}

/// The current order: de-duplicated line items in first-added order.
///
/// Invariants: at most one line per product name, every line has a quantity
/// of at least 1, and both order totals fit in a `u64`. Totals are kept
/// alongside the lines and every change is checked before it is applied, so
/// a rejected call leaves the ledger untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrderLedger {
    items: Vec<LineItem>,
    total_price: Price,
    total_quantity: u64,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, merging with an existing line of the same name.
    ///
    /// A merged line keeps the unit price it was first added with. Fails with
    /// `TotalOverflow` only when the order total or quantity would no longer fit.
    pub fn add_order_item(&mut self, product: &Product) -> Result<()> {
        let position = self.items.iter().position(|item| item.name == product.name);
        let unit_price = position.map_or(product.price, |index| self.items[index].unit_price);

        let total_price = self
            .total_price
            .checked_add(unit_price)
            .ok_or(LedgerError::TotalOverflow)?;
        let total_quantity = self
            .total_quantity
            .checked_add(1)
            .ok_or(LedgerError::TotalOverflow)?;

        match position {
            Some(index) => {
                let item = &self.items[index];
                let quantity = item
                    .quantity
                    .checked_increment()
                    .ok_or(LedgerError::TotalOverflow)?;
                let line_total = item
                    .line_total
                    .checked_add(unit_price)
                    .ok_or(LedgerError::TotalOverflow)?;
                let item = &mut self.items[index];
                item.quantity = quantity;
                item.line_total = line_total;
            }
            None => self.items.push(LineItem::from_product(product)),
        }

        self.total_price = total_price;
        self.total_quantity = total_quantity;
        Ok(())
    }

    /// Removes the line at `index`, keeping the order of the remaining lines.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.total_price = self.total_price - removed.line_total;
        self.total_quantity -= removed.quantity.0;
        Ok(removed)
    }

    /// Sets the quantity of the line at `index` to an absolute value.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> Result<()> {
        let quantity = Quantity::try_from(quantity)?;
        self.check_index(index)?;
        self.set_quantity(index, quantity)
    }

    pub fn increment_quantity(&mut self, index: usize) -> Result<Quantity> {
        self.check_index(index)?;
        let next = self.items[index]
            .quantity
            .checked_increment()
            .ok_or(LedgerError::TotalOverflow)?;
        self.set_quantity(index, next)?;
        Ok(next)
    }

    /// Lowers the quantity by one. A line at quantity 1 is left alone.
    pub fn decrement_quantity(&mut self, index: usize) -> Result<Quantity> {
        self.check_index(index)?;
        let current = self.items[index].quantity.0;
        if current <= 1 {
            return Err(LedgerError::InvalidQuantity(0));
        }
        let next = Quantity(current - 1);
        self.set_quantity(index, next)?;
        Ok(next)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total_price = Price::ZERO;
        self.total_quantity = 0;
    }

    pub fn total_price(&self) -> Price {
        self.total_price
    }

    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            items: self.items.clone(),
            item_count: self.item_count(),
            total_quantity: self.total_quantity,
            total_price: self.total_price,
        }
    }

    fn set_quantity(&mut self, index: usize, quantity: Quantity) -> Result<()> {
        let item = &self.items[index];
        let line_total = item
            .unit_price
            .checked_mul(quantity)
            .ok_or(LedgerError::TotalOverflow)?;
        let total_price = (self.total_price - item.line_total)
            .checked_add(line_total)
            .ok_or(LedgerError::TotalOverflow)?;
        let total_quantity = (self.total_quantity - item.quantity.0)
            .checked_add(quantity.0)
            .ok_or(LedgerError::TotalOverflow)?;

        let item = &mut self.items[index];
        item.quantity = quantity;
        item.line_total = line_total;
        self.total_price = total_price;
        self.total_quantity = total_quantity;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(LedgerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: u64) -> Product {
        Product::new(name, price, name.to_lowercase())
    }

    fn quantities(ledger: &OrderLedger) -> Vec<(&str, u64)> {
        ledger
            .items()
            .iter()
            .map(|item| (item.name.as_str(), item.quantity.value()))
            .collect()
    }

    #[test]
    fn test_quantity_validation() {
        assert!(Quantity::new(1).is_ok());
        assert!(matches!(
            Quantity::new(0),
            Err(LedgerError::InvalidQuantity(0))
        ));
        assert!(matches!(
            Quantity::new(-3),
            Err(LedgerError::InvalidQuantity(-3))
        ));
        assert_eq!(
            Quantity::try_from(i64::MAX).map(|q| q.value()).ok(),
            Some(i64::MAX as u64)
        );
    }

    #[test]
    fn test_add_new_item() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();

        assert_eq!(quantities(&ledger), vec![("A", 1)]);
        assert_eq!(ledger.items()[0].unit_price, Price::new(100));
        assert_eq!(ledger.total_price(), Price::new(100));
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("A", 100)).unwrap();

        assert_eq!(ledger.item_count(), 1);
        assert_eq!(quantities(&ledger), vec![("A", 2)]);
        assert_eq!(ledger.total_price(), Price::new(200));
    }

    #[test]
    fn test_merge_keeps_first_unit_price() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("A", 999)).unwrap();

        assert_eq!(ledger.items()[0].unit_price, Price::new(100));
        assert_eq!(ledger.total_price(), Price::new(200));
    }

    #[test]
    fn test_walkthrough() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("B", 50)).unwrap();
        assert_eq!(quantities(&ledger), vec![("A", 2), ("B", 1)]);
        assert_eq!(ledger.total_price(), Price::new(250));
        assert_eq!(ledger.item_count(), 2);

        ledger.update_quantity(0, 5).unwrap();
        assert_eq!(quantities(&ledger), vec![("A", 5), ("B", 1)]);
        assert_eq!(ledger.total_price(), Price::new(550));

        let removed = ledger.remove_item(0).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(quantities(&ledger), vec![("B", 1)]);
        assert_eq!(ledger.total_price(), Price::new(50));
        assert_eq!(ledger.item_count(), 1);

        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_price(), Price::ZERO);
        assert_eq!(ledger.total_quantity(), 0);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut ledger = OrderLedger::new();
        for name in ["A", "B", "C", "D"] {
            ledger.add_order_item(&product(name, 10)).unwrap();
        }

        ledger.remove_item(1).unwrap();
        let names: Vec<&str> = ledger.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();

        let result = ledger.remove_item(1);
        assert!(matches!(
            result,
            Err(LedgerError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(ledger.item_count(), 1);
    }

    #[test]
    fn test_update_rejects_non_positive_quantity() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.update_quantity(0, 3).unwrap();

        for bad in [0, -1, i64::MIN] {
            let result = ledger.update_quantity(0, bad);
            assert!(matches!(result, Err(LedgerError::InvalidQuantity(q)) if q == bad));
        }
        assert_eq!(quantities(&ledger), vec![("A", 3)]);
        assert_eq!(ledger.item_count(), 1);
    }

    #[test]
    fn test_update_checks_quantity_before_index() {
        let mut ledger = OrderLedger::new();
        let result = ledger.update_quantity(7, 0);
        assert!(matches!(result, Err(LedgerError::InvalidQuantity(0))));

        let result = ledger.update_quantity(7, 2);
        assert!(matches!(
            result,
            Err(LedgerError::IndexOutOfRange { index: 7, len: 0 })
        ));
    }

    #[test]
    fn test_update_is_absolute_not_delta() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.update_quantity(0, 1).unwrap();
        assert_eq!(quantities(&ledger), vec![("A", 1)]);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();

        assert_eq!(ledger.increment_quantity(0).unwrap().value(), 2);
        assert_eq!(ledger.increment_quantity(0).unwrap().value(), 3);
        assert_eq!(ledger.decrement_quantity(0).unwrap().value(), 2);
        assert_eq!(ledger.decrement_quantity(0).unwrap().value(), 1);

        let result = ledger.decrement_quantity(0);
        assert!(matches!(result, Err(LedgerError::InvalidQuantity(0))));
        assert_eq!(quantities(&ledger), vec![("A", 1)]);

        assert!(matches!(
            ledger.increment_quantity(1),
            Err(LedgerError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_totals_on_empty_ledger() {
        let ledger = OrderLedger::new();
        assert_eq!(ledger.total_price(), Price::ZERO);
        assert_eq!(ledger.total_quantity(), 0);
        assert_eq!(ledger.item_count(), 0);
        assert!(!ledger.snapshot().can_checkout());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("B", 50)).unwrap();
        ledger.update_quantity(1, 4).unwrap();

        let snapshot = ledger.snapshot();
        ledger.clear();

        assert_eq!(snapshot.item_count, 2);
        assert_eq!(snapshot.total_quantity, 5);
        assert_eq!(snapshot.total_price, Price::new(300));
        assert_eq!(snapshot.items[1].line_total(), Price::new(200));
        assert!(snapshot.can_checkout());
    }

    #[test]
    fn test_update_rejects_overflowing_line_total() {
        let mut ledger = OrderLedger::new();
        ledger
            .add_order_item(&product("A", 1_000_000_000_000_000))
            .unwrap();

        let result = ledger.update_quantity(0, 100_000);
        assert!(matches!(result, Err(LedgerError::TotalOverflow)));
        assert_eq!(quantities(&ledger), vec![("A", 1)]);
        assert_eq!(ledger.total_price(), Price::new(1_000_000_000_000_000));
        assert_eq!(ledger.snapshot().total_quantity, 1);
    }

    #[test]
    fn test_add_rejects_overflowing_order_total() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", u64::MAX)).unwrap();

        let before = ledger.clone();
        let result = ledger.add_order_item(&product("B", 1));
        assert!(matches!(result, Err(LedgerError::TotalOverflow)));
        assert_eq!(ledger, before);

        let result = ledger.add_order_item(&product("A", u64::MAX));
        assert!(matches!(result, Err(LedgerError::TotalOverflow)));
        assert_eq!(ledger.snapshot().total_price, Price::new(u64::MAX));

        // Free items still fit.
        ledger.add_order_item(&product("C", 0)).unwrap();
        assert_eq!(ledger.item_count(), 2);
        assert_eq!(ledger.total_price(), Price::new(u64::MAX));
    }

    #[test]
    fn test_add_and_increment_share_the_quantity_limit() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 0)).unwrap();
        ledger.add_order_item(&product("B", 0)).unwrap();
        ledger.update_quantity(0, i64::MAX).unwrap();
        ledger.update_quantity(1, i64::MAX).unwrap();
        assert_eq!(ledger.total_quantity(), u64::MAX - 1);

        ledger.add_order_item(&product("A", 0)).unwrap();
        assert_eq!(ledger.items()[0].quantity.value(), i64::MAX as u64 + 1);
        assert_eq!(ledger.total_quantity(), u64::MAX);

        let before = ledger.clone();
        assert!(matches!(
            ledger.add_order_item(&product("A", 0)),
            Err(LedgerError::TotalOverflow)
        ));
        assert!(matches!(
            ledger.increment_quantity(1),
            Err(LedgerError::TotalOverflow)
        ));
        assert_eq!(ledger, before);

        ledger.decrement_quantity(0).unwrap();
        ledger.increment_quantity(1).unwrap();
        assert_eq!(ledger.total_quantity(), u64::MAX);
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let mut ledger = OrderLedger::new();
        ledger.add_order_item(&product("A", 100)).unwrap();
        ledger.add_order_item(&product("B", 50)).unwrap();
        ledger.update_quantity(0, 3).unwrap();
        ledger.increment_quantity(1).unwrap();
        ledger.remove_item(0).unwrap();

        let line_sum: u64 = ledger.items().iter().map(|i| i.line_total().value()).sum();
        assert_eq!(ledger.total_price(), Price::new(line_sum));
        assert_eq!(ledger.total_price(), Price::new(100));
        assert_eq!(ledger.total_quantity(), 2);
    }
}
