use crate::cli::{
    actions::{activate, login, mock, reset, Action},
    commands::ARG_API_URL,
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::new(matches.get_one::<String>(ARG_API_URL).cloned());

    match matches.subcommand() {
        Some(("mock", sub_m)) => Ok(Action::Mock(mock::Args {
            port: sub_m.get_one::<u16>("port").copied().unwrap_or(8080),
        })),
        Some(("login", sub_m)) => Ok(Action::Login(login::Args {
            globals,
            username: required(sub_m, "username")?,
            password: SecretString::from(required(sub_m, "password")?),
        })),
        Some(("activate", sub_m)) => Ok(Action::Activate(activate::Args {
            globals,
            link: sub_m.get_one::<String>("link").cloned(),
        })),
        Some(("reset-password", sub_m)) => match sub_m.subcommand() {
            Some(("request", req_m)) => Ok(Action::ResetRequest(reset::RequestArgs {
                globals,
                email: required(req_m, "email")?,
            })),
            Some(("confirm", conf_m)) => Ok(Action::ResetConfirm(reset::ConfirmArgs {
                globals,
                link: conf_m.get_one::<String>("link").cloned(),
                password: SecretString::from(required(conf_m, "password")?),
                confirm_password: SecretString::from(required(conf_m, "confirm-password")?),
            })),
            _ => Err(anyhow!("unknown reset-password subcommand")),
        },
        _ => Err(anyhow!("unknown subcommand")),
    }
}
