pub mod api;
pub mod auth;
pub mod client;
pub mod pagination;

pub use client::TraktClient;
