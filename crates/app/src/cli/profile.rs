use clap::{Args, Subcommand};
use tiffin::{profile::PhoneUpdate, routes::View};
use tiffin_app::{
    auth::{PasswordChange, ProfileState},
    context::Storefront,
    domain::profile,
};

use crate::cli::enter;

#[derive(Debug, Args)]
pub(crate) struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProfileSubcommand {
    /// Show the account profile
    Show,
    /// Link a phone number
    Phone {
        /// Phone number
        phone: String,
    },
    /// Send a verification code to a phone
    SendOtp {
        /// Phone number
        phone: String,
    },
    /// Verify a phone with the received code
    VerifyOtp {
        /// Phone number
        phone: String,

        /// Code received by SMS
        otp: String,
    },
    /// Change the account password
    Password {
        /// Current password
        #[arg(long, env = "TIFFIN_PASSWORD", hide_env_values = true)]
        current: String,

        /// New password
        #[arg(long, env = "TIFFIN_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
}

pub(crate) async fn run(
    storefront: &mut Storefront,
    command: ProfileCommand,
) -> Result<(), String> {
    enter(storefront, View::Profile)?;

    let profiles = storefront.services().profile.clone();

    let result = match command.command {
        ProfileSubcommand::Show => {
            show(storefront.auth().profile());
            return Ok(());
        }
        ProfileSubcommand::Phone { phone } => profiles
            .update_phone(PhoneUpdate {
                phone,
                verified: None,
            })
            .await
            .map(|()| println!("phone updated")),
        ProfileSubcommand::SendOtp { phone } => profiles
            .send_otp(phone)
            .await
            .map(|()| println!("code sent")),
        ProfileSubcommand::VerifyOtp { phone, otp } => {
            profile::verify_phone(profiles.as_ref(), phone, otp)
                .await
                .map(|()| println!("phone verified"))
        }
        ProfileSubcommand::Password { current, new } => {
            let change = PasswordChange::new(current, new).map_err(|error| error.to_string())?;

            profiles
                .update_password(change)
                .await
                .map(|()| println!("password updated"))
        }
    };

    storefront.sync_session();

    result.map_err(|error| error.message())
}

fn show(profile: Option<&ProfileState>) {
    match profile {
        Some(ProfileState::Loaded(profile)) => {
            println!("email: {}", profile.email);
            println!("phone: {}", profile.phone.as_deref().unwrap_or("Not linked"));

            if profile.phone_verified == Some(true) {
                println!("phone verified");
            }
        }
        Some(ProfileState::Unavailable(message)) => println!("profile unavailable: {message}"),
        Some(ProfileState::Loading) | None => println!("profile not loaded"),
    }
}
