use super::*;
use crate::util::storage::MemoryStore;

fn guard(entries: &[(&str, &str)]) -> RouteGuard {
    RouteGuard::new(Arc::new(MemoryStore::with_entries(entries)))
}

fn strict_guard(entries: &[(&str, &str)]) -> RouteGuard {
    RouteGuard::with_policy(Arc::new(MemoryStore::with_entries(entries)), GuardPolicy { strict_admin: true })
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolves_static_routes() {
    let router = Router::new();
    assert_eq!(router.resolve("/").unwrap().name, RouteName::Main);
    assert_eq!(router.resolve("/analyze").unwrap().name, RouteName::Analyze);
    assert_eq!(router.resolve("/analyze/foods").unwrap().name, RouteName::FoodSearch);
    assert_eq!(router.resolve("/oauth/callback").unwrap().name, RouteName::OauthCallback);
}

#[test]
fn optional_param_may_be_present_or_absent() {
    let router = Router::new();

    let with_id = router.resolve("/analyze/result/42").unwrap();
    assert_eq!(with_id.name, RouteName::AnalysisResult);
    assert_eq!(with_id.params.get("id").map(String::as_str), Some("42"));

    let without = router.resolve("/analyze/result").unwrap();
    assert_eq!(without.name, RouteName::AnalysisResult);
    assert!(without.params.is_empty());
}

#[test]
fn query_and_trailing_slash_are_ignored() {
    let router = Router::new();
    assert_eq!(router.resolve("/my-page/").unwrap().name, RouteName::MyPage);
    assert_eq!(router.resolve("/oauth/callback?code=abc&state=x").unwrap().name, RouteName::OauthCallback);
}

#[test]
fn unknown_paths_do_not_resolve() {
    let router = Router::new();
    assert!(router.resolve("/nope").is_none());
    assert!(router.resolve("/analyze/result/1/extra").is_none());
    assert!(router.resolve("/login/again").is_none());
}

#[test]
fn route_flags_match_table() {
    let router = Router::new();
    let my_page = router.route(RouteName::MyPage).unwrap();
    assert!(my_page.requires_auth && !my_page.requires_admin);
    let admin = router.route(RouteName::Admin).unwrap();
    assert!(admin.requires_auth && admin.requires_admin);
    assert_eq!(router.routes().iter().filter(|r| r.requires_auth).count(), 2);
}

// =============================================================================
// guard
// =============================================================================

#[test]
fn anonymous_is_sent_to_login_for_protected_routes() {
    let router = Router::new();
    let guard = guard(&[]);
    assert_eq!(guard.navigate(&router, "/my-page"), GuardDecision::Redirect(RouteName::Login));
    assert_eq!(guard.navigate(&router, "/admin"), GuardDecision::Redirect(RouteName::Login));
    assert_eq!(guard.navigate(&router, "/characters"), GuardDecision::Allow);
}

#[test]
fn signed_in_user_passes_auth_check() {
    let router = Router::new();
    let guard = guard(&[(LOGGED_IN_KEY, "true"), (ROLE_KEY, "ROLE_USER")]);
    assert_eq!(guard.navigate(&router, "/my-page"), GuardDecision::Allow);
}

#[test]
fn admin_route_open_to_any_signed_in_user_by_default() {
    let router = Router::new();
    let guard = guard(&[(LOGGED_IN_KEY, "true"), (ROLE_KEY, "ROLE_USER")]);
    assert_eq!(guard.navigate(&router, "/admin"), GuardDecision::Allow);
}

#[test]
fn strict_policy_redirects_non_admin_to_main() {
    let router = Router::new();
    let user = strict_guard(&[(LOGGED_IN_KEY, "true"), (ROLE_KEY, "ROLE_USER")]);
    assert_eq!(user.navigate(&router, "/admin"), GuardDecision::Redirect(RouteName::Main));

    let admin = strict_guard(&[(LOGGED_IN_KEY, "true"), (ROLE_KEY, "ADMIN")]);
    assert_eq!(admin.navigate(&router, "/admin"), GuardDecision::Allow);
}

#[test]
fn flag_must_be_literal_true() {
    let router = Router::new();
    let guard = guard(&[(LOGGED_IN_KEY, "yes"), (ROLE_KEY, "ROLE_ADMIN")]);
    assert_eq!(guard.navigate(&router, "/my-page"), GuardDecision::Redirect(RouteName::Login));
}

#[test]
fn unknown_path_is_not_found() {
    assert_eq!(guard(&[]).navigate(&Router::new(), "/missing"), GuardDecision::NotFound);
}

#[test]
fn decision_serializes_with_target() {
    let json = serde_json::to_value(GuardDecision::Redirect(RouteName::Login)).unwrap();
    assert_eq!(json, serde_json::json!({ "decision": "redirect", "target": "login" }));
}
