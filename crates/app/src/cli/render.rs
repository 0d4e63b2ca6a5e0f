use std::io;

use jiff::{Timestamp, tz::TimeZone};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use tiffin::{
    addresses::Address,
    cart::Cart,
    coupons::Coupon,
    menu::MenuItem,
    orders::{Order, StepState},
    receipt::Receipt,
};

fn finish(builder: Builder, amount_column: Option<usize>) -> Table {
    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Rows::first(), Color::BOLD);

    if let Some(column) = amount_column {
        table.modify(Columns::new(column..column + 1), Alignment::right());
    }

    table
}

pub(crate) fn menu_table(items: &[&MenuItem]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Dish", "Category", "Price"]);

    for item in items {
        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone(),
            item.price.to_string(),
        ]);
    }

    finish(builder, Some(3))
}

pub(crate) fn offers_table(coupons: &[Coupon]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Code", "Offer", "Min order", "Details"]);

    for coupon in coupons {
        builder.push_record([
            coupon.name.clone(),
            coupon.headline(),
            coupon.min_order.to_string(),
            coupon.description.clone(),
        ]);
    }

    finish(builder, Some(2))
}

pub(crate) fn orders_table(orders: &[Order]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Items", "Status", "Amount"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.order_id.short()),
            order.created_at.map_or_else(|| "-".to_string(), format_date),
            order.items.len().to_string(),
            order.status.to_string(),
            order.payable().to_string(),
        ]);
    }

    finish(builder, Some(4))
}

pub(crate) fn addresses_table(addresses: &[Address]) -> Table {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Label", "Address", "Default"]);

    for address in addresses {
        builder.push_record([
            address.id.clone(),
            address.label.clone(),
            address.to_string(),
            if address.is_default { "yes" } else { "" }.to_string(),
        ]);
    }

    finish(builder, None)
}

pub(crate) fn cart_receipt(cart: &Cart) -> Result<(), String> {
    Receipt::from_cart(cart)
        .write_to(io::stdout())
        .map_err(|error| error.to_string())
}

pub(crate) fn order_detail(order: &Order) -> Result<(), String> {
    println!("order #{} ({})", order.order_id.short(), order.order_id);

    if let Some(placed) = order.created_at {
        println!("placed: {}", format_date(placed));
    }

    match order.status.progress() {
        Some(steps) => {
            let track: Vec<String> = steps
                .iter()
                .map(|step| match step.state {
                    StepState::Done => format!("[x] {}", step.status),
                    StepState::Current => format!("[>] {}", step.status),
                    StepState::Pending => format!("[ ] {}", step.status),
                })
                .collect();

            println!("{}", track.join("  "));
        }
        None => match &order.cancel_reason {
            Some(reason) => println!("CANCELLED: {reason}"),
            None => println!("CANCELLED"),
        },
    }

    println!("payment: {}", order.payment_label());

    if let Some(status) = &order.payment_status {
        println!("payment status: {status}");
    }

    if let Some(address) = &order.delivery_address {
        println!("deliver to: {address}");
    }

    Receipt::from_order(order)
        .write_to(io::stdout())
        .map_err(|error| error.to_string())
}

fn format_date(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%d %b %Y, %H:%M")
        .to_string()
}
