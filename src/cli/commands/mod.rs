pub mod logging;

use crate::config::ENV_API_BASE_URL;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("account-ui")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the account API, example: http://localhost:8080")
                .env(ENV_API_BASE_URL)
                .global(true),
        )
        .subcommand(mock_command())
        .subcommand(login_command())
        .subcommand(activate_command())
        .subcommand(reset_password_command());

    logging::with_args(command)
}

fn mock_command() -> Command {
    Command::new("mock").about("Serve the mock account API").arg(
        Arg::new("port")
            .short('p')
            .long("port")
            .help("Port to listen on")
            .default_value("8080")
            .env("ACCOUNT_UI_PORT")
            .value_parser(clap::value_parser!(u16)),
    )
}

fn login_command() -> Command {
    Command::new("login")
        .about("Sign in and show the resulting session")
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .help("Account login")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .help("Account password")
                .env("ACCOUNT_UI_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

fn activate_command() -> Command {
    Command::new("activate")
        .about("Activate an account from its activation link")
        .arg(
            Arg::new("link")
                .long("link")
                .help("Activation link, example: http://localhost:3000/account/activate?key=<key>"),
        )
}

fn reset_password_command() -> Command {
    Command::new("reset-password")
        .about("Request or complete a password reset")
        .subcommand_required(true)
        .subcommand(
            Command::new("request")
                .about("Send a reset link to the account email")
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Account email")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("confirm")
                .about("Set a new password with the key from the reset link")
                .arg(
                    Arg::new("link")
                        .long("link")
                        .help("Reset link, example: http://localhost:3000/account/reset/finish?key=<key>"),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("New password")
                        .required(true),
                )
                .arg(
                    Arg::new("confirm-password")
                        .long("confirm-password")
                        .help("New password, again")
                        .required(true),
                ),
        )
}
