use super::{context, report};
use crate::{
    cli::globals::GlobalArgs,
    routes::{paths, ResetPasswordConfirmPage, ResetPasswordRequestPage, ResetPasswordRequestView},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct RequestArgs {
    pub globals: GlobalArgs,
    pub email: String,
}

#[derive(Debug)]
pub struct ConfirmArgs {
    pub globals: GlobalArgs,
    pub link: Option<String>,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// # Errors
/// Returns an error if the email is invalid or the request fails.
pub async fn request(args: RequestArgs) -> Result<()> {
    let mut ctx = context(&args.globals)?;
    let mut page = ResetPasswordRequestPage::new();
    page.set_email(&args.email);

    let outcome = page.submit(&mut ctx).await;
    report(&mut ctx, outcome)?;

    if let ResetPasswordRequestView::Confirmation {
        title, description, ..
    } = page.view()
    {
        println!("{title}");
        println!("{description}");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the passwords are invalid or the server rejects the key.
pub async fn confirm(args: ConfirmArgs) -> Result<()> {
    let mut ctx = context(&args.globals)?;
    let mut page = ResetPasswordConfirmPage::new(args.link.as_deref().unwrap_or(paths::RESET_CONFIRM));
    page.set_password(args.password.expose_secret());
    page.set_confirm_password(args.confirm_password.expose_secret());

    let outcome = page.submit(&mut ctx).await;
    report(&mut ctx, outcome)?;

    println!("Redirected to {}", ctx.navigator.location());
    Ok(())
}
