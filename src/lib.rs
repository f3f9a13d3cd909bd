//! Client library for the foody diet-tracking backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` is the typed HTTP surface. `state` holds the client-side stores, the
//! most important being `state::auth::SessionManager`, which owns who is
//! signed in and mirrors it into a `util::storage::KeyValueStore` so a later
//! run can restore it. `router` gates named routes on that mirror.

pub mod catalog;
pub mod config;
pub mod error;
pub mod net;
pub mod router;
pub mod state;
pub mod util;
