use clap::{Parser, Subcommand};
use tiffin::routes::{Navigation, View};
use tiffin_app::{config::StorefrontConfig, context::Storefront};

mod address;
mod cart;
mod checkout;
mod menu;
mod open;
mod orders;
mod profile;
mod render;
mod review;
mod session;

#[derive(Debug, Parser)]
#[command(name = "tiffin", about = "Tiffin Service storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in
    Login(session::LoginArgs),
    /// Create an account
    Register(session::RegisterArgs),
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse the menu
    Menu(menu::MenuArgs),
    /// List current offers
    Offers,
    /// Manage the cart
    Cart(cart::CartCommand),
    /// Check a coupon against the cart
    Coupon(cart::CouponCommand),
    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),
    /// Order history
    Orders(orders::OrdersCommand),
    /// Delivery addresses
    Address(address::AddressCommand),
    /// Account profile
    Profile(profile::ProfileCommand),
    /// Leave a review
    Review(review::ReviewArgs),
    /// Route a storefront path
    Open(open::OpenArgs),
}

impl Cli {
    pub(crate) fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let mut storefront = Storefront::from_config(&self.config)
            .map_err(|error| format!("failed to start storefront: {error}"))?;

        storefront.resume_session().await;

        match self.command {
            Commands::Login(args) => session::login(&mut storefront, args).await,
            Commands::Register(args) => session::register(&mut storefront, args).await,
            Commands::Logout => session::logout(&mut storefront).await,
            Commands::Whoami => session::whoami(&mut storefront),
            Commands::Menu(args) => menu::run(&mut storefront, args).await,
            Commands::Offers => menu::offers(&mut storefront).await,
            Commands::Cart(command) => cart::run(&mut storefront, command).await,
            Commands::Coupon(command) => cart::coupon(&mut storefront, command).await,
            Commands::Checkout(args) => checkout::run(&mut storefront, args).await,
            Commands::Orders(command) => orders::run(&mut storefront, command).await,
            Commands::Address(command) => address::run(&mut storefront, command).await,
            Commands::Profile(command) => profile::run(&mut storefront, command).await,
            Commands::Review(args) => review::run(&mut storefront, args).await,
            Commands::Open(args) => open::run(&mut storefront, &args),
        }
    }
}

/// Gate a command on its view.
pub(crate) fn enter(storefront: &mut Storefront, view: View) -> Result<(), String> {
    match storefront.open(view) {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect { to, from } => Err(redirect_message(&to, from.as_ref())),
        Navigation::Pending => Err("your session is still being verified; try again".to_string()),
    }
}

pub(crate) fn redirect_message(to: &View, from: Option<&View>) -> String {
    match (to, from) {
        (View::Login, Some(from)) => {
            format!("please log in first: tiffin login --email <email> --from {from}")
        }
        (to, _) => format!("redirected to {to}"),
    }
}
