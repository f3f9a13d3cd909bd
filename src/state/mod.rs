//! Client-side stores. Each owns one slice of UI state and is safe to share
//! behind an `Arc`, except `MealStore`, which is plain owned data.

pub mod auth;
pub mod favorites;
pub mod meal;

pub use auth::{Role, Session, SessionManager, SessionStatus, SessionUser, UserPatch};
pub use favorites::FavoritesStore;
pub use meal::{MealStore, MealTime};
