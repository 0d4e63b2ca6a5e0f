use clap::Args;
use tiffin::routes::Navigation;
use tiffin_app::context::Storefront;

use crate::cli::redirect_message;

#[derive(Debug, Args)]
pub(crate) struct OpenArgs {
    /// Storefront path, e.g. /dashboard/orders
    path: String,
}

pub(crate) fn run(storefront: &mut Storefront, args: &OpenArgs) -> Result<(), String> {
    match storefront.navigate(&args.path) {
        Navigation::Render(view) => println!("{view}"),
        Navigation::Redirect { to, from } => println!("{}", redirect_message(&to, from.as_ref())),
        Navigation::Pending => println!("waiting for the session to be verified"),
    }

    Ok(())
}
