use crate::domain::order::OrderSnapshot;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OrderRow<'a> {
    name: &'a str,
    unit_price: u64,
    quantity: u64,
    line_total: u64,
}

/// Writes an order as CSV: one row per line item followed by a `TOTAL` row.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(sink),
        }
    }

    pub fn write_order(&mut self, order: &OrderSnapshot) -> Result<()> {
        self.writer
            .write_record(["name", "unit_price", "quantity", "line_total"])?;
        for item in &order.items {
            self.writer.serialize(OrderRow {
                name: item.name(),
                unit_price: item.unit_price().value(),
                quantity: item.quantity().into(),
                line_total: item.line_total().value(),
            })?;
        }
        self.writer.write_record([
            "TOTAL".to_string(),
            String::new(),
            order.total_quantity.to_string(),
            order.total_price.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}
