use clap::{Args, Subcommand};
use tiffin::{addresses::NewAddress, page::PageState, routes::View};
use tiffin_app::context::Storefront;

use crate::cli::{enter, render};

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Args)]
struct AddressFields {
    /// Short name, e.g. Home or Office
    #[arg(long)]
    label: String,

    /// Street address
    #[arg(long)]
    line: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    pincode: String,

    /// Deliver here by default
    #[arg(long)]
    default: bool,
}

impl From<AddressFields> for NewAddress {
    fn from(fields: AddressFields) -> Self {
        Self {
            label: fields.label,
            address_line: fields.line,
            city: fields.city,
            state: fields.state,
            pincode: fields.pincode,
            is_default: fields.default,
        }
    }
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// List saved addresses
    List,
    /// Save a new address
    Add(AddressFields),
    /// Replace a saved address
    Update {
        /// Address id
        id: String,

        #[command(flatten)]
        fields: AddressFields,
    },
    /// Delete a saved address
    Delete {
        /// Address id
        id: String,
    },
    /// Show the default delivery address
    Default,
}

pub(crate) async fn run(
    storefront: &mut Storefront,
    command: AddressCommand,
) -> Result<(), String> {
    enter(storefront, View::Addresses)?;

    let addresses = storefront.services().addresses.clone();

    let result = match command.command {
        AddressSubcommand::List => return list(storefront).await,
        AddressSubcommand::Add(fields) => addresses
            .create_address(fields.into())
            .await
            .map(|address| println!("saved address {}", address.id)),
        AddressSubcommand::Update { id, fields } => addresses
            .update_address(id, fields.into())
            .await
            .map(|()| println!("address updated")),
        AddressSubcommand::Delete { id } => addresses
            .delete_address(id)
            .await
            .map(|()| println!("address deleted")),
        AddressSubcommand::Default => addresses.default_address().await.map(|address| {
            match address {
                Some(address) => println!("{} ({address})", address.label),
                None => println!("no default address; add one with --default"),
            }
        }),
    };

    storefront.sync_session();

    result.map_err(|error| error.message())
}

async fn list(storefront: &mut Storefront) -> Result<(), String> {
    match storefront.load_addresses().await {
        PageState::Loaded(addresses) if addresses.is_empty() => println!("no saved addresses"),
        PageState::Loaded(addresses) => println!("{}", render::addresses_table(addresses)),
        PageState::Failed(message) => return Err(message.clone()),
        PageState::Idle | PageState::Loading(_) => {}
    }

    Ok(())
}
