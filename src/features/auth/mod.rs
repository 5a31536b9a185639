//! Auth feature: credential login against `/authenticate` and local logout.
//! This module touches the session token and must avoid logging it.

mod client;
pub mod types;

pub use client::AuthClient;
