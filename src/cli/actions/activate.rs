use super::context;
use crate::{
    cli::globals::GlobalArgs,
    routes::{paths, ActivatePage, ActivateView},
};
use anyhow::{bail, Result};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub link: Option<String>,
}

/// # Errors
/// Returns an error if the link has no key or the server rejects it.
pub async fn execute(args: Args) -> Result<()> {
    let ctx = context(&args.globals)?;
    let mut page = ActivatePage::new(args.link.as_deref().unwrap_or(paths::ACTIVATE));
    page.run(&ctx).await;

    match page.view() {
        ActivateView::Success { login_href } => {
            println!("Account activated, you can now sign in at {login_href}");
            Ok(())
        }
        ActivateView::Error { message, .. } => bail!("Activation failed: {message}"),
        ActivateView::Loading => bail!("Activation did not complete"),
    }
}
