//! Auth-session state for the current client process.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionManager` is the only writer of who is signed in. UI and CLI code
//! read snapshots through `session()`; the route guard reads the durable
//! mirror instead (see `router`).
//!
//! STATE MACHINE
//! =============
//! Anonymous -> Authenticating -> Authenticated   (`login`)
//! Authenticated -> Anonymous                     (`logout`, always effective locally)
//! Anonymous -> Restoring -> Authenticated | Anonymous   (`load_from_storage`)
//!
//! User and token are set and cleared together. Restoration may hold a token
//! without a user while verification is pending.
//!
//! ERROR HANDLING
//! ==============
//! `login` and `load_user_info` forward the collaborator's `ApiError`
//! unchanged. `logout` and restoration never fail: they log and settle in a
//! clean anonymous state.
//!
//! CONCURRENCY
//! ===========
//! The lock is never held across an `.await`. Operations can interleave at
//! suspension points, so results are applied only if the token they were
//! issued for is still the current one.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::net::services::{AuthService, UserService};
use crate::net::types::{LoginRequest, UserResponse};
use crate::util::storage::{KeyValueStore, LOGGED_IN_KEY, ROLE_KEY, TOKEN_KEY};

// =============================================================================
// ROLE
// =============================================================================

/// Authorization role. Wire form is `ROLE_*`; bare names are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Guest,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "ROLE_USER" | "USER" => Self::User,
            "ROLE_ADMIN" | "ADMIN" => Self::Admin,
            "ROLE_GUEST" | "GUEST" => Self::Guest,
            other => {
                tracing::debug!(role = other, "unrecognized role");
                Self::Other(other.to_owned())
            }
        }
    }

    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
            Self::Guest => "ROLE_GUEST",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_wire().to_owned()
    }
}

// =============================================================================
// USER RECORD
// =============================================================================

/// Daily reference intake the backend computes from the body profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardIntake {
    pub weight: Option<f64>,
    pub kcal: Option<f64>,
    pub carb: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub sugar: Option<f64>,
    pub natrium: Option<f64>,
}

/// Body measurements and derived intake targets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalProfile {
    pub age: Option<u32>,
    pub height: f64,
    pub weight: f64,
    pub gender: String,
    pub activity_level: i32,
    pub is_diabetes: Option<bool>,
    pub standard: StandardIntake,
}

/// The signed-in user as the client knows it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub display_name: String,
    /// Blank until the first profile fetch; the login response omits it.
    pub email: String,
    pub role: Role,
    pub profile: Option<PhysiologicalProfile>,
}

impl From<UserResponse> for SessionUser {
    fn from(resp: UserResponse) -> Self {
        let profile = PhysiologicalProfile {
            age: resp.age,
            height: resp.height,
            weight: resp.weight,
            gender: resp.gender,
            activity_level: resp.activity_level,
            is_diabetes: resp.is_diabetes,
            standard: StandardIntake {
                weight: resp.std_weight,
                kcal: resp.std_kcal,
                carb: resp.std_carb,
                protein: resp.std_protein,
                fat: resp.std_fat,
                sugar: resp.std_sugar,
                natrium: resp.std_natrium,
            },
        };
        Self {
            id: resp.id,
            display_name: resp.name,
            email: resp.email,
            role: Role::parse(&resp.role),
            profile: Some(profile),
        }
    }
}

/// Partial update merged by [`SessionManager::update_user`]. Only `Some`
/// fields are applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub profile: Option<PhysiologicalProfile>,
}

// =============================================================================
// SESSION
// =============================================================================

/// Read-only snapshot of the authentication state.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Session {
    user: Option<SessionUser>,
    token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Guest)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Restoring,
}

#[derive(Debug, Default)]
struct Inner {
    session: Session,
    status: SessionStatus,
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

/// Single authority over the current session and its durable mirror.
pub struct SessionManager {
    auth: Arc<dyn AuthService>,
    users: Arc<dyn UserService>,
    store: Arc<dyn KeyValueStore>,
    inner: RwLock<Inner>,
}

impl SessionManager {
    /// Create an empty (anonymous) manager. Nothing is read from `store`
    /// until [`load_from_storage`](Self::load_from_storage).
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>, users: Arc<dyn UserService>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { auth, users, store, inner: RwLock::new(Inner::default()) }
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[must_use]
    pub fn session(&self) -> Session {
        self.read(|inner| inner.session.clone())
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.read(|inner| inner.status)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read(|inner| inner.session.token.clone())
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.read(|inner| inner.session.user.clone())
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read(|inner| inner.session.is_logged_in())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.read(|inner| inner.session.is_admin())
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.read(|inner| inner.session.is_guest())
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Sign in, mirror the token, then backfill the profile.
    ///
    /// # Errors
    ///
    /// Returns the authentication service's error unchanged; the session is
    /// left as it was. If the follow-up profile fetch fails its error is
    /// returned too, but the session stays signed in with the provisional
    /// user record.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let previous = self.write(|inner| std::mem::replace(&mut inner.status, SessionStatus::Authenticating));

        let response = match self.auth.login(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(identifier = %request.id, error = %e, "login rejected");
                self.write(|inner| {
                    if inner.status == SessionStatus::Authenticating {
                        inner.status = previous;
                    }
                });
                return Err(e);
            }
        };

        let role = Role::parse(&response.role);
        let user = SessionUser {
            id: response.user_id,
            display_name: response.name,
            email: String::new(),
            role,
            profile: None,
        };
        tracing::info!(user_id = %user.id, role = user.role.as_wire(), "logged in");

        self.write(|inner| {
            self.mirror_session(&response.access_token, &user.role);
            inner.session.token = Some(response.access_token);
            inner.session.user = Some(user);
            inner.status = SessionStatus::Authenticated;
        });

        self.load_user_info().await
    }

    /// End the session. The server call is best-effort; local state and the
    /// mirror are always cleared.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            tracing::warn!(error = %e, "server logout failed; clearing local session anyway");
        }
        self.write(|inner| self.clear_locked(inner));
        tracing::info!("logged out");
    }

    /// Refresh the user record from the profile endpoint without touching
    /// the token.
    ///
    /// # Errors
    ///
    /// Returns the user service's error unchanged. Unlike restoration, a
    /// failure here does not clear the session.
    pub async fn load_user_info(&self) -> Result<(), ApiError> {
        let token = self.token().unwrap_or_default();
        let profile = self.users.fetch_my_profile(&token).await?;
        self.apply_profile(&token, profile);
        Ok(())
    }

    /// Attempt to restore a session from the durable mirror, verifying the
    /// token with the server before trusting it. Never fails: any rejection
    /// clears the session and the mirror.
    pub async fn load_from_storage(&self) {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let flagged = self.store.get(LOGGED_IN_KEY).as_deref() == Some("true");
        let Some(token) = token.filter(|_| flagged) else {
            tracing::debug!("no mirrored session; skipping restoration");
            return;
        };

        tracing::debug!("restoring mirrored session");
        self.write(|inner| {
            inner.session.token = Some(token.clone());
            inner.status = SessionStatus::Restoring;
        });

        match self.users.fetch_my_profile(&token).await {
            Ok(profile) => {
                if self.apply_profile(&token, profile) {
                    tracing::info!(user_id = ?self.user().map(|u| u.id), "session restored");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "mirrored session rejected; clearing");
                self.write(|inner| {
                    if inner.session.token.as_deref() == Some(token.as_str()) {
                        self.clear_locked(inner);
                    }
                });
            }
        }
    }

    /// Merge `patch` into the current user without a network call. No-op
    /// when signed out.
    pub fn update_user(&self, patch: UserPatch) {
        self.write(|inner| {
            let Some(user) = inner.session.user.as_mut() else {
                return;
            };
            if let Some(name) = patch.display_name {
                user.display_name = name;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(role) = patch.role {
                self.store.set(ROLE_KEY, role.as_wire());
                user.role = role;
            }
            if let Some(profile) = patch.profile {
                user.profile = Some(profile);
            }
        });
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Install a fetched profile if `token` is still current. Returns whether
    /// it was applied.
    fn apply_profile(&self, token: &str, profile: UserResponse) -> bool {
        let user = SessionUser::from(profile);
        self.write(|inner| {
            if inner.session.token.as_deref() != Some(token) {
                tracing::debug!("discarding profile fetched for a superseded session");
                return false;
            }
            self.mirror_session(token, &user.role);
            inner.session.user = Some(user);
            inner.status = SessionStatus::Authenticated;
            true
        })
    }

    fn mirror_session(&self, token: &str, role: &Role) {
        self.store.set(LOGGED_IN_KEY, "true");
        self.store.set(ROLE_KEY, role.as_wire());
        self.store.set(TOKEN_KEY, token);
    }

    fn clear_locked(&self, inner: &mut Inner) {
        inner.session = Session::default();
        inner.status = SessionStatus::Anonymous;
        self.store.remove(LOGGED_IN_KEY);
        self.store.remove(ROLE_KEY);
        self.store.remove(TOKEN_KEY);
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner))
    }
}
