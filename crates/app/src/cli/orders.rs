use clap::{Args, Subcommand, ValueEnum};
use tiffin::{
    orders::{OrderId, OrderSort},
    page::PageState,
    routes::View,
};
use tiffin_app::context::Storefront;

use crate::cli::{enter, render};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

impl From<SortArg> for OrderSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Newest => OrderSort::Newest,
            SortArg::Oldest => OrderSort::Oldest,
            SortArg::Highest => OrderSort::Highest,
            SortArg::Lowest => OrderSort::Lowest,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List past orders
    List {
        /// Ordering
        #[arg(long, value_enum, default_value_t)]
        sort: SortArg,
    },
    /// Show an order and its progress
    Show {
        /// Order id
        id: String,
    },
    /// Cancel an order that has not been prepared yet
    Cancel {
        /// Order id
        id: String,

        /// Why the order is being cancelled
        #[arg(long)]
        reason: String,
    },
    /// Add a past order's dishes to the cart
    Reorder {
        /// Order id
        id: String,
    },
}

pub(crate) async fn run(storefront: &mut Storefront, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List { sort } => {
            enter(storefront, View::Orders)?;

            match storefront.load_orders(sort.into()).await {
                PageState::Loaded(orders) if orders.is_empty() => println!("no orders yet"),
                PageState::Loaded(orders) => println!("{}", render::orders_table(orders)),
                PageState::Failed(message) => return Err(message.clone()),
                PageState::Idle | PageState::Loading(_) => {}
            }
        }
        OrdersSubcommand::Show { id } => {
            let id = OrderId::new(id);

            enter(storefront, View::OrderDetail(id.clone()))?;

            match storefront.load_order(&id).await {
                PageState::Loaded(order) => render::order_detail(order)?,
                PageState::Failed(message) => return Err(message.clone()),
                PageState::Idle | PageState::Loading(_) => {}
            }
        }
        OrdersSubcommand::Cancel { id, reason } => {
            let id = OrderId::new(id);

            enter(storefront, View::OrderDetail(id.clone()))?;

            let order = storefront
                .cancel_order(&id, &reason)
                .await
                .map_err(|error| error.to_string())?;

            println!("order cancelled");
            render::order_detail(&order)?;
        }
        OrdersSubcommand::Reorder { id } => {
            let id = OrderId::new(id);

            enter(storefront, View::OrderDetail(id.clone()))?;

            storefront
                .reorder(&id)
                .await
                .map_err(|error| error.message())?;

            println!("items added to your cart");
            render::cart_receipt(storefront.cart().cart())?;
        }
    }

    Ok(())
}
