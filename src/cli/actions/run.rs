use crate::cli::actions::{activate, login, mock, reset, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Mock(args) => mock::execute(args).await,
        Action::Login(args) => login::execute(args).await,
        Action::Activate(args) => activate::execute(args).await,
        Action::ResetRequest(args) => reset::request(args).await,
        Action::ResetConfirm(args) => reset::confirm(args).await,
    }
}
