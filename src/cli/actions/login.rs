use super::{context, report};
use crate::{cli::globals::GlobalArgs, routes::LoginPage};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
}

/// # Errors
/// Returns an error if the credentials are rejected or the API is unreachable.
pub async fn execute(args: Args) -> Result<()> {
    let mut ctx = context(&args.globals)?;
    let mut page = LoginPage::new();
    page.set_username(&args.username);
    page.set_password(args.password.expose_secret());

    let outcome = page.submit(&mut ctx).await;
    report(&mut ctx, outcome)?;

    match ctx.session.account() {
        Some(account) => {
            println!("Signed in as {} <{}>", account.login, account.email);
            println!("Locale: {}", ctx.session.locale());
            println!("Authorities: {}", account.authorities.into_iter().collect::<Vec<_>>().join(", "));
        }
        None => println!("Signed in as {}", args.username),
    }
    println!("Redirected to {}", ctx.navigator.location());
    Ok(())
}
