//! Named routes and the authentication guard in front of them.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard decides from the durable mirror (`isLoggedIn`, `userRole`), not
//! from a live `SessionManager`. It therefore lags the session until the
//! manager next writes the mirror.
//!
//! DESIGN
//! ======
//! Patterns support static segments, `:param`, and a single trailing
//! optional `:param?`. Query strings and a trailing slash are ignored when
//! matching.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::state::auth::Role;
use crate::util::storage::{KeyValueStore, LOGGED_IN_KEY, ROLE_KEY};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    Main,
    Login,
    Signup,
    Analyze,
    FoodSearch,
    AnalysisResult,
    MealManagement,
    Characters,
    MyPage,
    Admin,
    OauthCallback,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Analyze => "analyze",
            Self::FoodSearch => "food-search",
            Self::AnalysisResult => "analysis-result",
            Self::MealManagement => "meal-management",
            Self::Characters => "characters",
            Self::MyPage => "my-page",
            Self::Admin => "admin",
            Self::OauthCallback => "oauth-callback",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub pattern: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl Route {
    const fn open(name: RouteName, pattern: &'static str) -> Self {
        Self { name, pattern, requires_auth: false, requires_admin: false }
    }
}

/// A resolved path: the matched route plus captured parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub name: RouteName,
    pub params: HashMap<String, String>,
    #[serde(skip)]
    pub route: Route,
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Clone, Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// The application's route table.
    #[must_use]
    pub fn new() -> Self {
        let routes = vec![
            Route::open(RouteName::Main, "/"),
            Route::open(RouteName::Login, "/login"),
            Route::open(RouteName::Signup, "/signup"),
            Route::open(RouteName::Analyze, "/analyze"),
            Route::open(RouteName::FoodSearch, "/analyze/foods"),
            Route::open(RouteName::AnalysisResult, "/analyze/result/:id?"),
            Route::open(RouteName::MealManagement, "/meal-management"),
            Route::open(RouteName::Characters, "/characters"),
            Route { requires_auth: true, ..Route::open(RouteName::MyPage, "/my-page") },
            Route { requires_auth: true, requires_admin: true, ..Route::open(RouteName::Admin, "/admin") },
            Route::open(RouteName::OauthCallback, "/oauth/callback"),
        ];
        Self { routes }
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn route(&self, name: RouteName) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// First route whose pattern matches `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let segments = path_segments(path);
        self.routes.iter().find_map(|route| {
            match_pattern(route.pattern, &segments).map(|params| RouteMatch {
                name: route.name,
                params,
                route: route.clone(),
            })
        })
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<HashMap<String, String>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let optional_tail = parts.last().is_some_and(|p| p.starts_with(':') && p.ends_with('?'));
    let required = if optional_tail { parts.len() - 1 } else { parts.len() };

    if segments.len() < required || segments.len() > parts.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (part, segment) in parts.iter().zip(segments) {
        if let Some(name) = part.strip_prefix(':') {
            params.insert(name.trim_end_matches('?').to_owned(), (*segment).to_owned());
        } else if part != segment {
            return None;
        }
    }
    Some(params)
}

// =============================================================================
// GUARD
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    Redirect(RouteName),
    NotFound,
}

/// Tuning for the admin check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardPolicy {
    /// When off, any signed-in user may open admin routes.
    pub strict_admin: bool,
}

pub struct RouteGuard {
    store: Arc<dyn KeyValueStore>,
    policy: GuardPolicy,
}

impl RouteGuard {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_policy(store, GuardPolicy::default())
    }

    #[must_use]
    pub fn with_policy(store: Arc<dyn KeyValueStore>, policy: GuardPolicy) -> Self {
        Self { store, policy }
    }

    /// Decide whether navigation to `route` may proceed.
    #[must_use]
    pub fn check(&self, route: &Route) -> GuardDecision {
        let logged_in = self.store.get(LOGGED_IN_KEY).as_deref() == Some("true");
        let admin = self.store.get(ROLE_KEY).is_some_and(|r| Role::parse(&r) == Role::Admin);

        let decision = if route.requires_auth && !logged_in {
            GuardDecision::Redirect(RouteName::Login)
        } else if route.requires_admin && !admin {
            if logged_in && !self.policy.strict_admin {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(RouteName::Main)
            }
        } else {
            GuardDecision::Allow
        };

        tracing::debug!(route = %route.name, logged_in, admin, ?decision, "route guard");
        decision
    }

    /// Resolve `path` and check the matched route.
    #[must_use]
    pub fn navigate(&self, router: &Router, path: &str) -> GuardDecision {
        match router.resolve(path) {
            Some(matched) => self.check(&matched.route),
            None => GuardDecision::NotFound,
        }
    }
}
