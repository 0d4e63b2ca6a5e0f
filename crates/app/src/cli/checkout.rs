use clap::{Args, ValueEnum};
use tiffin::{orders::PaymentMethod, routes::View};
use tiffin_app::context::Storefront;

use crate::cli::{enter, render};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Card,
    Upi,
    Net,
    Cod,
}

impl From<MethodArg> for PaymentMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Card => PaymentMethod::Card,
            MethodArg::Upi => PaymentMethod::Upi,
            MethodArg::Net => PaymentMethod::Net,
            MethodArg::Cod => PaymentMethod::Cod,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Payment method
    #[arg(long, value_enum, default_value_t = MethodArg::Card)]
    method: MethodArg,

    /// Coupon code to apply before paying
    #[arg(long)]
    coupon: Option<String>,
}

pub(crate) async fn run(storefront: &mut Storefront, args: CheckoutArgs) -> Result<(), String> {
    enter(storefront, View::Payment)?;

    if let Some(code) = args.coupon.as_deref() {
        let coupon = storefront
            .apply_coupon(code)
            .await
            .map_err(|error| error.to_string())?;

        println!("{} applied: {} off", coupon.code, coupon.discount);
    }

    let cart = storefront.cart().cart();

    if !cart.is_empty() {
        render::cart_receipt(cart)?;
    }

    let confirmation = storefront
        .checkout(args.method.into())
        .await
        .map_err(|error| error.to_string())?;

    enter(storefront, View::OrderSuccess)?;

    println!("order placed: #{}", confirmation.order_id.short());

    if let Some(status) = &confirmation.payment_status {
        println!("payment: {status}");
    }

    if let Some(message) = &confirmation.message {
        println!("{message}");
    }

    println!(
        "track it with: tiffin orders show {}",
        confirmation.order_id
    );

    Ok(())
}
