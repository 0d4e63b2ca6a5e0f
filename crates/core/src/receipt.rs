//! Receipt

use std::{fmt::Write, io};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{amount::Amount, cart::Cart, orders::Order};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceiptLine {
    name: String,
    unit_price: Amount,
    quantity: u32,
    total: Amount,
}

/// Itemised summary of a cart or a placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    subtotal: Amount,
    discount: Option<(String, Amount)>,
    total: Amount,
}

impl Receipt {
    /// Receipt for the current cart, including any applied coupon.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name.clone(),
                    unit_price: line.price,
                    quantity: line.quantity,
                    total: line.line_total(),
                })
                .collect(),
            subtotal: cart.total(),
            discount: cart
                .coupon()
                .map(|coupon| (coupon.code.clone(), coupon.discount)),
            total: cart.final_total(),
        }
    }

    /// Receipt for a placed order.
    pub fn from_order(order: &Order) -> Self {
        Self {
            lines: order
                .items
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name.clone(),
                    unit_price: line.price,
                    quantity: line.quantity,
                    total: line.line_total(),
                })
                .collect(),
            subtotal: order.total_amount,
            discount: order
                .discount_amount
                .filter(|discount| !discount.is_zero())
                .map(|discount| ("Coupon".to_string(), discount)),
            total: order.payable(),
        }
    }

    /// Total before discounts.
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Amount payable.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Write the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if `out` cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["#", "Item", "Price", "Qty", "Total"]);

        for (index, line) in self.lines.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                line.name.clone(),
                line.unit_price.to_string(),
                line.quantity.to_string(),
                line.total.to_string(),
            ]);
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
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{}", colorize_borders(&table.to_string()))?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let mut rows = vec![(" Subtotal:".to_string(), format!("{}  ", self.subtotal))];

        if let Some((code, discount)) = &self.discount {
            rows.push((format!(" Discount ({code}):"), format!("-{discount}  ")));
        }

        rows.push((" Total:".to_string(), format!("{}  ", self.total)));

        let label_width = rows.iter().map(|(label, _)| label.chars().count()).max();
        let value_width = rows.iter().map(|(_, value)| value.chars().count()).max();

        for (label, value) in &rows {
            writeln!(
                out,
                "{label:>label_width$}  {value:>value_width$}",
                label_width = label_width.unwrap_or_default(),
                value_width = value_width.unwrap_or_default(),
            )?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Wraps runs of box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
