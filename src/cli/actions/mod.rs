pub mod activate;
pub mod login;
pub mod mock;
pub mod reset;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    api::ApiClient,
    cli::globals::GlobalArgs,
    components::ToastStatus,
    routes::{AppContext, SubmitOutcome},
    session::SessionStore,
};
use anyhow::{bail, Result};
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Mock(mock::Args),
    Login(login::Args),
    Activate(activate::Args),
    ResetRequest(reset::RequestArgs),
    ResetConfirm(reset::ConfirmArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Fresh anonymous context against the configured API.
fn context(globals: &GlobalArgs) -> Result<AppContext> {
    let api = ApiClient::new(globals.config(), Arc::new(SessionStore::new()))?;
    Ok(AppContext::new(api))
}

/// Prints pending toasts and turns a failed submission into an error.
fn report(ctx: &mut AppContext, outcome: SubmitOutcome) -> Result<()> {
    for toast in ctx.toasts.drain() {
        let marker = match toast.status {
            ToastStatus::Success => "✔",
            ToastStatus::Error => "✘",
        };
        match toast.description {
            Some(description) => println!("{marker} {}: {description}", toast.title),
            None => println!("{marker} {}", toast.title),
        }
    }

    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Blocked(errors) => {
            for (field, message) in &errors.errors {
                println!("  {field}: {message}");
            }
            bail!("form is invalid")
        }
        SubmitOutcome::Busy => bail!("a submission is already in progress"),
        SubmitOutcome::Failed(err) => Err(err.into()),
    }
}
