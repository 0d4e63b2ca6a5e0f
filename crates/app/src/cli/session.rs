use clap::Args;
use tiffin::routes::View;
use tiffin_app::{
    auth::{Credentials, ProfileState, RegisterOutcome},
    context::Storefront,
};

use crate::cli::enter;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "TIFFIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Path to continue with after signing in
    #[arg(long)]
    from: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "TIFFIN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(storefront: &mut Storefront, args: LoginArgs) -> Result<(), String> {
    enter(storefront, View::Login)?;

    let from = args.from.as_deref().and_then(View::from_path);
    let credentials = Credentials::new(args.email, args.password);

    let next = storefront
        .login(&credentials, from)
        .await
        .map_err(|error| error.message())?;

    println!("logged in");
    println!("continue at: {next}");

    Ok(())
}

pub(crate) async fn register(
    storefront: &mut Storefront,
    args: RegisterArgs,
) -> Result<(), String> {
    enter(storefront, View::Signup)?;

    let credentials = Credentials::new(args.email, args.password);

    match storefront
        .register(&credentials)
        .await
        .map_err(|error| error.message())?
    {
        RegisterOutcome::SignedIn(_) => println!("account created; you are logged in"),
        RegisterOutcome::Created(message) => {
            println!("{message}");
            println!("next: tiffin login --email {}", credentials.email);
        }
    }

    Ok(())
}

pub(crate) async fn logout(storefront: &mut Storefront) -> Result<(), String> {
    storefront.logout().await;

    println!("logged out");

    Ok(())
}

pub(crate) fn whoami(storefront: &mut Storefront) -> Result<(), String> {
    enter(storefront, View::Profile)?;

    match storefront.auth().profile() {
        Some(ProfileState::Loaded(profile)) => println!("{}", profile.email),
        Some(ProfileState::Unavailable(message)) => {
            println!("logged in (profile unavailable: {message})");
        }
        Some(ProfileState::Loading) | None => println!("logged in"),
    }

    Ok(())
}
