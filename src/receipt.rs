//! Receipt
//!
//! Terminal rendering of a table's bill: one row per merged bill line, followed by the
//! bill total in the configured currency.

use std::{fmt::Write, io};

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    billing::{BillLine, TableFilter, bill_total},
    orders::EntryKind,
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Currency code is not an ISO 4217 code rusty-money knows.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Look up an ISO currency by its alpha code, case-insensitively.
///
/// # Errors
///
/// Returns [`ReceiptError::UnknownCurrency`] for codes rusty-money does not know.
pub fn currency(code: &str) -> Result<&'static Currency, ReceiptError> {
    iso::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| ReceiptError::UnknownCurrency(code.to_string()))
}

/// Printable bill for one table, or for every table.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    filter: TableFilter,
    lines: &'a [BillLine],
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Build a receipt over already-merged bill lines.
    pub fn new(filter: TableFilter, lines: &'a [BillLine], currency: &'static Currency) -> Self {
        Self {
            filter,
            lines,
            total: Money::from_decimal(bill_total(lines), currency),
            currency,
        }
    }

    /// Bill total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Currency used for all monetary values
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "\nBill for {}", self.filter).map_err(|_err| ReceiptError::IO)?;

        if self.lines.is_empty() {
            writeln!(out, "No orders.").map_err(|_err| ReceiptError::IO)?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Type", "Category", "Qty", "Price", "Amount", "Status"]);

        for line in self.lines {
            builder.push_record(self.row(line));
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(4..7), Alignment::right());

        for (idx, line) in self.lines.iter().enumerate() {
            let color = if line.status.is_served() {
                color_green()
            } else {
                color_dark_grey()
            };

            table.modify((idx + 1, 7), color);
        }

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "{table_str}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "Total: {}", self.total).map_err(|_err| ReceiptError::IO)?;

        Ok(())
    }

    fn row(&self, line: &BillLine) -> [String; 8] {
        let marker = match line.kind {
            EntryKind::Item => "",
            EntryKind::Combo => "◆",
        };

        let mut name = line.name.clone();

        for component in &line.components {
            _ = write!(name, "\n  {} x{}", component.name, component.quantity);
        }

        [
            marker.to_string(),
            name,
            line.food_type.clone().unwrap_or_default(),
            line.category_name.clone().unwrap_or_default(),
            line.count.to_string(),
            self.money(line.price),
            self.money(line.line_total()),
            line.status.to_string(),
        ]
    }

    fn money(&self, amount: Decimal) -> String {
        Money::from_decimal(amount, self.currency).to_string()
    }
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            out.push_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            out.push_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        out.push_str("\x1b[0m");
    }

    out
}

/// ANSI dark grey foreground.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

/// ANSI green foreground.
fn color_green() -> Color {
    Color::new("\x1b[32m", "\x1b[0m")
}
