//! Account feature: session bootstrap, registration, activation, profile
//! updates and the password reset/change endpoints.

mod client;
pub mod types;

pub use client::AccountClient;
