use clap::{Args, Subcommand};
use tiffin::{menu::ProductId, routes::View};
use tiffin_app::context::Storefront;

use crate::cli::{enter, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,
    /// Add one unit of a dish
    Add {
        /// Menu item id
        id: String,
    },
    /// Change a line's quantity by a signed amount
    Update {
        /// Menu item id
        id: String,

        /// Quantity change, e.g. 2 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Menu item id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Validate a code, keep it with the cart and show the discounted cart
    Apply {
        /// Coupon code
        code: String,
    },
    /// Drop the applied coupon and show the cart
    Remove,
}

pub(crate) async fn run(storefront: &mut Storefront, command: CartCommand) -> Result<(), String> {
    enter(storefront, View::Menu)?;

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id } => {
            storefront
                .add_to_cart(&ProductId::new(id))
                .await
                .map_err(|error| error.to_string())?;
        }
        CartSubcommand::Update { id, delta } => {
            let id = ProductId::new(id);

            if !storefront.cart_mut().update_quantity(&id, delta) {
                return Err(format!("{id} is not in the cart"));
            }
        }
        CartSubcommand::Remove { id } => {
            let id = ProductId::new(id);

            if !storefront.cart_mut().remove(&id) {
                return Err(format!("{id} is not in the cart"));
            }
        }
        CartSubcommand::Clear => storefront.cart_mut().clear(),
    }

    show(storefront)
}

pub(crate) async fn coupon(
    storefront: &mut Storefront,
    command: CouponCommand,
) -> Result<(), String> {
    enter(storefront, View::Menu)?;

    match command.command {
        CouponSubcommand::Apply { code } => {
            let coupon = storefront
                .apply_coupon(&code)
                .await
                .map_err(|error| error.to_string())?;

            println!("{} applied: {} off", coupon.code, coupon.discount);
        }
        CouponSubcommand::Remove => {
            if !storefront.cart_mut().remove_coupon() {
                return Err("no coupon is applied".to_string());
            }
        }
    }

    show(storefront)
}

fn show(storefront: &Storefront) -> Result<(), String> {
    let cart = storefront.cart().cart();

    if cart.is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    render::cart_receipt(cart)
}
