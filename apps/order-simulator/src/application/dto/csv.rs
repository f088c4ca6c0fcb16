//! CSV exports of the order book and trade ledger.
//!
//! Text fields are always quoted with embedded quotes doubled. Numbers are
//! written in normalized decimal form and absent values as empty fields.
//! Rows are separated by `\n` with no trailing newline.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::domain::order_execution::aggregate::{Order, Trade};
use crate::domain::shared::Timestamp;

/// Column headers for [`orders_to_csv`].
pub const ORDER_COLUMNS: [&str; 13] = [
    "Order ID",
    "Symbol",
    "Side",
    "Type",
    "Quantity",
    "Filled Quantity",
    "Price",
    "Avg Fill Price",
    "Status",
    "Commission",
    "Created At",
    "Updated At",
    "Rejection Reason",
];

/// Column headers for [`trades_to_csv`].
pub const TRADE_COLUMNS: [&str; 11] = [
    "Trade ID",
    "Order ID",
    "Strategy",
    "Symbol",
    "Side",
    "Quantity",
    "Price",
    "Commission",
    "Realized PnL",
    "Executed At",
    "Tags",
];

/// Separator between tags inside the single Tags column.
const TAG_SEPARATOR: &str = ";";

/// Render orders as CSV, one row per order in the given order.
#[must_use]
pub fn orders_to_csv(orders: &[Order]) -> String {
    let rows = orders.iter().map(|order| {
        [
            text(order.id().as_str()),
            text(order.symbol().as_str()),
            text(&order.side().to_string()),
            text(&order.order_type().to_string()),
            number(order.quantity()),
            number(order.filled_quantity()),
            optional_number(order.price()),
            optional_number(order.avg_fill_price()),
            text(&order.status().to_string()),
            number(order.commission()),
            timestamp(order.created_at()),
            timestamp(order.updated_at()),
            order
                .rejection_reason()
                .map_or_else(String::new, |r| text(r.message())),
        ]
        .join(",")
    });

    render(&ORDER_COLUMNS, rows)
}

/// Render trades as CSV, one row per trade in the given order.
#[must_use]
pub fn trades_to_csv(trades: &[Trade]) -> String {
    let rows = trades.iter().map(|trade| {
        [
            text(trade.id().as_str()),
            text(trade.order_id().as_str()),
            trade
                .strategy_id()
                .map_or_else(String::new, |s| text(s.as_str())),
            text(trade.symbol().as_str()),
            text(&trade.side().to_string()),
            number(trade.quantity()),
            number(trade.price()),
            number(trade.commission()),
            number(trade.realized_pnl()),
            timestamp(trade.executed_at()),
            text(&trade.tags().join(TAG_SEPARATOR)),
        ]
        .join(",")
    });

    render(&TRADE_COLUMNS, rows)
}

fn render(header: &[&str], rows: impl Iterator<Item = String>) -> String {
    let mut out = header.join(",");
    for row in rows {
        // Writing to a String cannot fail.
        let _ = write!(out, "\n{row}");
    }
    out
}

fn text(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn number(value: Decimal) -> String {
    value.normalize().to_string()
}

fn optional_number(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, number)
}

fn timestamp(value: Timestamp) -> String {
    text(&value.to_rfc3339())
}
