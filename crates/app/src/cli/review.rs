use clap::Args;
use tiffin::routes::View;
use tiffin_app::context::Storefront;

use crate::cli::enter;

#[derive(Debug, Args)]
pub(crate) struct ReviewArgs {
    /// Stars, 1 to 5
    #[arg(long)]
    rating: u8,

    /// What you thought
    #[arg(long)]
    comment: String,
}

pub(crate) async fn run(storefront: &mut Storefront, args: ReviewArgs) -> Result<(), String> {
    enter(storefront, View::Review)?;

    storefront
        .submit_review(args.rating, &args.comment)
        .await
        .map_err(|error| error.to_string())?;

    println!("thanks for your review");

    Ok(())
}
