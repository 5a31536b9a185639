//! Feature clients for the account and auth endpoints. Each operation is one
//! request with no retry; callers decide how to recover from errors.

pub mod account;
pub mod auth;
mod mutation;

pub use mutation::Mutation;
