//! Typed HTTP access to the foody backend.
//!
//! `client` holds the shared plumbing; each sibling module adds the endpoints
//! of one backend area to `ApiClient`.

pub mod admin;
pub mod auth;
pub mod client;
pub mod email;
pub mod food;
pub mod report;
pub mod services;
pub mod social;
pub mod types;
pub mod user;

pub use client::ApiClient;
pub use services::{AuthService, FavoritesService, UserService};
