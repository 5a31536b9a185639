//! # Account UI
//!
//! `account-ui` is the headless client side of an account surface: login,
//! registration, activation and password reset, built from a declarative form
//! engine and a handful of presentational widgets. Views are plain values that a
//! UI shell renders; the bundled CLI is one such shell.
//!
//! ## Layers
//!
//! - [`api`], [`config`] and [`session`] hold the HTTP plumbing, endpoint
//!   configuration and the shared session (token, locale, cached account).
//! - [`features`] wraps the account and auth endpoints. Each call is a single
//!   attempt; only success handlers write to the session.
//! - [`form`] is the form-state engine. Validation rules are data, and
//!   cross-field rules declare their dependencies explicitly.
//! - [`components`] contains field adapters and widgets that turn state into
//!   view models.
//! - [`routes`] composes the above into page flows.
//! - [`mock`] serves the account API from memory for local development.

pub mod api;
pub mod cli;
pub mod components;
pub mod config;
pub mod features;
pub mod form;
pub mod mock;
pub mod routes;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
