use clap::{Args, ValueEnum};
use tiffin::{
    menu::{self, ALL_CATEGORIES, MenuQuery, PriceSort},
    page::PageState,
    routes::View,
};
use tiffin_app::context::Storefront;

use crate::cli::{enter, render};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    #[default]
    Default,
    Low,
    High,
}

impl From<SortArg> for PriceSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Default => PriceSort::Default,
            SortArg::Low => PriceSort::LowToHigh,
            SortArg::High => PriceSort::HighToLow,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Category to show
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,

    /// Search dish names and categories
    #[arg(long, default_value = "")]
    search: String,

    /// Price ordering
    #[arg(long, value_enum, default_value_t)]
    sort: SortArg,
}

pub(crate) async fn run(storefront: &mut Storefront, args: MenuArgs) -> Result<(), String> {
    enter(storefront, View::Menu)?;

    let items = match storefront.load_menu().await {
        PageState::Loaded(items) => items,
        PageState::Failed(message) => return Err(message.clone()),
        PageState::Idle | PageState::Loading(_) => return Ok(()),
    };

    let query = MenuQuery {
        category: args.category,
        search: args.search,
        sort: args.sort.into(),
    };

    println!("categories: {}", menu::categories(items).join(", "));

    let matches = query.apply(items);

    if matches.is_empty() {
        println!("no dishes match");
        return Ok(());
    }

    println!("{}", render::menu_table(&matches));

    Ok(())
}

pub(crate) async fn offers(storefront: &mut Storefront) -> Result<(), String> {
    enter(storefront, View::Offers)?;

    match storefront.load_offers().await {
        PageState::Loaded(coupons) if coupons.is_empty() => println!("no offers right now"),
        PageState::Loaded(coupons) => println!("{}", render::offers_table(coupons)),
        PageState::Failed(message) => return Err(message.clone()),
        PageState::Idle | PageState::Loading(_) => {}
    }

    Ok(())
}
