use super::*;
use crate::net::types::LoginResponse;
use crate::util::storage::MemoryStore;
use std::sync::Mutex;
use tokio::sync::Notify;

// =============================================================================
// Fakes
// =============================================================================

struct FakeAuth {
    login_result: Mutex<Option<Result<LoginResponse, ApiError>>>,
    logout_result: Result<(), ApiError>,
    logout_calls: Mutex<usize>,
}

impl FakeAuth {
    fn accepting(role: &str) -> Self {
        Self {
            login_result: Mutex::new(Some(Ok(login_response(role)))),
            logout_result: Ok(()),
            logout_calls: Mutex::new(0),
        }
    }

    fn rejecting(err: ApiError) -> Self {
        Self { login_result: Mutex::new(Some(Err(err))), logout_result: Ok(()), logout_calls: Mutex::new(0) }
    }

    fn with_failing_logout(mut self) -> Self {
        self.logout_result = Err(ApiError::Network("connection reset".into()));
        self
    }
}

#[async_trait::async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.login_result
            .lock()
            .unwrap()
            .take()
            .expect("unexpected login call")
    }

    async fn logout(&self) -> Result<(), ApiError> {
        *self.logout_calls.lock().unwrap() += 1;
        self.logout_result.clone()
    }
}

struct FakeUsers {
    responses: Mutex<Vec<Result<UserResponse, ApiError>>>,
    tokens_seen: Mutex<Vec<String>>,
    /// Calls for this token wait on the `Notify`; others answer at once.
    gate: Option<(String, Arc<Notify>)>,
}

impl FakeUsers {
    fn new(responses: Vec<Result<UserResponse, ApiError>>) -> Self {
        Self { responses: Mutex::new(responses), tokens_seen: Mutex::new(Vec::new()), gate: None }
    }

    fn gated(responses: Vec<Result<UserResponse, ApiError>>, token: &str, gate: Arc<Notify>) -> Self {
        Self { gate: Some((token.to_owned(), gate)), ..Self::new(responses) }
    }

    fn calls(&self) -> usize {
        self.tokens_seen.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl UserService for FakeUsers {
    async fn fetch_my_profile(&self, token: &str) -> Result<UserResponse, ApiError> {
        self.tokens_seen.lock().unwrap().push(token.to_owned());
        if let Some((gated, gate)) = &self.gate {
            if gated == token {
                gate.notified().await;
            }
        }
        self.responses.lock().unwrap().remove(0)
    }
}

fn login_response(role: &str) -> LoginResponse {
    LoginResponse {
        access_token: "tok-1".into(),
        token_type: "Bearer".into(),
        user_id: "kim01".into(),
        name: "Kim".into(),
        role: role.into(),
    }
}

fn profile(id: &str, role: &str) -> UserResponse {
    UserResponse {
        id: id.into(),
        name: "Kim".into(),
        age: Some(31),
        email: "k@x.com".into(),
        height: 168.0,
        weight: 58.5,
        gender: "F".into(),
        activity_level: 2,
        is_diabetes: Some(false),
        role: role.into(),
        std_weight: Some(60.0),
        std_kcal: Some(2000.0),
        std_carb: None,
        std_protein: None,
        std_fat: None,
        std_sugar: None,
        std_natrium: None,
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status { status: 401, body: "expired".into() }
}

fn credentials() -> LoginRequest {
    LoginRequest { id: "kim01".into(), password: "pw".into() }
}

fn manager(auth: FakeAuth, users: Arc<FakeUsers>, store: Arc<MemoryStore>) -> SessionManager {
    SessionManager::new(Arc::new(auth), users, store)
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_parses_prefixed_and_bare_forms() {
    assert_eq!(Role::parse("ROLE_ADMIN"), Role::Admin);
    assert_eq!(Role::parse("ADMIN"), Role::Admin);
    assert_eq!(Role::parse("ROLE_GUEST"), Role::Guest);
    assert_eq!(Role::parse("ROLE_USER"), Role::User);
    assert_eq!(Role::parse("ROLE_EXPERT"), Role::Other("ROLE_EXPERT".into()));
}

#[test]
fn role_wire_form_is_prefixed() {
    assert_eq!(Role::parse("ADMIN").as_wire(), "ROLE_ADMIN");
    assert_eq!(Role::Other("ROLE_EXPERT".into()).as_wire(), "ROLE_EXPERT");
}

#[test]
fn session_user_from_profile_keeps_standard_intake() {
    let user = SessionUser::from(profile("u1", "ROLE_USER"));
    assert_eq!(user.display_name, "Kim");
    let body = user.profile.unwrap();
    assert_eq!(body.age, Some(31));
    assert_eq!(body.standard.kcal, Some(2000.0));
}

// =============================================================================
// Initial state
// =============================================================================

#[test]
fn new_manager_is_anonymous() {
    let store = Arc::new(MemoryStore::new());
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), Arc::new(FakeUsers::new(vec![])), store);
    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert_eq!(mgr.session(), Session::default());
    assert!(!mgr.is_logged_in());
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_populates_session_and_mirror() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users.clone(), store.clone());

    mgr.login(&credentials()).await.unwrap();

    assert_eq!(mgr.status(), SessionStatus::Authenticated);
    assert!(mgr.is_logged_in());
    assert!(!mgr.is_admin());
    assert!(!mgr.is_guest());
    assert_eq!(mgr.token().as_deref(), Some("tok-1"));
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(store.get(LOGGED_IN_KEY).as_deref(), Some("true"));
    assert_eq!(store.get(ROLE_KEY).as_deref(), Some("ROLE_USER"));
    assert_eq!(users.tokens_seen.lock().unwrap().as_slice(), ["tok-1"]);
}

#[tokio::test]
async fn login_backfills_email_from_profile() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store);

    mgr.login(&credentials()).await.unwrap();

    let user = mgr.user().unwrap();
    assert_eq!(user.email, "k@x.com");
    assert!(user.profile.is_some());
}

#[tokio::test]
async fn login_role_flags_follow_returned_role() {
    for (role, admin, guest) in [("ROLE_ADMIN", true, false), ("ROLE_GUEST", false, true), ("ROLE_USER", false, false)] {
        let store = Arc::new(MemoryStore::new());
        let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", role))]));
        let mgr = manager(FakeAuth::accepting(role), users, store);
        mgr.login(&credentials()).await.unwrap();
        assert_eq!(mgr.is_admin(), admin, "role {role}");
        assert_eq!(mgr.is_guest(), guest, "role {role}");
    }
}

#[tokio::test]
async fn rejected_login_stays_anonymous_and_propagates_error() {
    let store = Arc::new(MemoryStore::with_entries(&[("unrelated", "kept")]));
    let users = Arc::new(FakeUsers::new(vec![]));
    let mgr = manager(FakeAuth::rejecting(unauthorized()), users.clone(), store.clone());

    let err = mgr
        .login(&LoginRequest { id: "bad".into(), password: "wrong".into() })
        .await
        .unwrap_err();

    assert_eq!(err, unauthorized());
    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert_eq!(mgr.session(), Session::default());
    assert_eq!(store.len(), 1);
    assert_eq!(users.calls(), 0);
}

#[tokio::test]
async fn login_profile_failure_propagates_but_keeps_provisional_user() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Err(ApiError::Network("timeout".into()))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());

    let err = mgr.login(&credentials()).await.unwrap_err();

    assert_eq!(err, ApiError::Network("timeout".into()));
    assert!(mgr.is_logged_in());
    let user = mgr.user().unwrap();
    assert_eq!(user.id, "kim01");
    assert_eq!(user.email, "");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn login_then_logout_restores_initial_state() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());

    mgr.login(&credentials()).await.unwrap();
    mgr.logout().await;

    assert_eq!(mgr.session(), Session::default());
    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert!(store.is_empty());
}

#[tokio::test]
async fn logout_clears_locally_even_when_server_fails() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_ADMIN"))]));
    let auth = Arc::new(FakeAuth::accepting("ROLE_ADMIN").with_failing_logout());
    let mgr = SessionManager::new(auth.clone(), users, store.clone());

    mgr.login(&credentials()).await.unwrap();
    mgr.logout().await;

    assert_eq!(*auth.logout_calls.lock().unwrap(), 1);
    assert!(!mgr.is_logged_in());
    assert!(mgr.user().is_none());
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(ROLE_KEY), None);
    assert_eq!(store.get(LOGGED_IN_KEY), None);
}

// =============================================================================
// load_from_storage
// =============================================================================

#[tokio::test]
async fn restore_with_empty_mirror_makes_no_call() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users.clone(), store);

    mgr.load_from_storage().await;

    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert_eq!(users.calls(), 0);
}

#[tokio::test]
async fn restore_requires_logged_in_flag() {
    let store = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "abc"), (LOGGED_IN_KEY, "false")]));
    let users = Arc::new(FakeUsers::new(vec![]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users.clone(), store);

    mgr.load_from_storage().await;

    assert!(!mgr.is_logged_in());
    assert_eq!(users.calls(), 0);
}

#[tokio::test]
async fn restore_with_valid_token_authenticates() {
    let store = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "abc"), (LOGGED_IN_KEY, "true")]));
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("u1", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users.clone(), store.clone());

    mgr.load_from_storage().await;

    let session = mgr.session();
    assert_eq!(session.user().unwrap().id, "u1");
    assert_eq!(session.user().unwrap().email, "k@x.com");
    assert!(session.is_logged_in());
    assert!(!session.is_admin());
    assert_eq!(mgr.status(), SessionStatus::Authenticated);
    assert_eq!(users.tokens_seen.lock().unwrap().as_slice(), ["abc"]);
    assert_eq!(store.get(ROLE_KEY).as_deref(), Some("ROLE_USER"));
}

#[tokio::test]
async fn restore_with_rejected_token_clears_everything() {
    let store = Arc::new(MemoryStore::with_entries(&[
        (TOKEN_KEY, "stale"),
        (LOGGED_IN_KEY, "true"),
        (ROLE_KEY, "ROLE_USER"),
    ]));
    let users = Arc::new(FakeUsers::new(vec![Err(unauthorized())]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());

    mgr.load_from_storage().await;

    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert_eq!(mgr.session(), Session::default());
    assert!(store.is_empty());
}

#[tokio::test]
async fn restore_discards_profile_when_logout_interleaves() {
    let store = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "abc"), (LOGGED_IN_KEY, "true")]));
    let gate = Arc::new(Notify::new());
    let users = Arc::new(FakeUsers::gated(vec![Ok(profile("u1", "ROLE_USER"))], "abc", gate.clone()));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());

    tokio::join!(mgr.load_from_storage(), async {
        mgr.logout().await;
        gate.notify_one();
    });

    assert_eq!(mgr.session(), Session::default());
    assert_eq!(mgr.status(), SessionStatus::Anonymous);
    assert!(store.is_empty());
}

#[tokio::test]
async fn restore_rejection_keeps_session_from_interleaved_login() {
    let store = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "stale"), (LOGGED_IN_KEY, "true")]));
    let gate = Arc::new(Notify::new());
    // Answers are taken in completion order: the login's fetch finishes first.
    let users = Arc::new(FakeUsers::gated(
        vec![Ok(profile("kim01", "ROLE_USER")), Err(unauthorized())],
        "stale",
        gate.clone(),
    ));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users.clone(), store.clone());

    tokio::join!(mgr.load_from_storage(), async {
        mgr.login(&credentials()).await.unwrap();
        gate.notify_one();
    });

    assert_eq!(users.tokens_seen.lock().unwrap().as_slice(), ["stale", "tok-1"]);
    assert_eq!(mgr.status(), SessionStatus::Authenticated);
    assert_eq!(mgr.token().as_deref(), Some("tok-1"));
    assert_eq!(mgr.user().unwrap().id, "kim01");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    assert_eq!(store.get(LOGGED_IN_KEY).as_deref(), Some("true"));
}

#[tokio::test]
async fn rejected_login_during_restore_keeps_restoring_status() {
    let store = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "abc"), (LOGGED_IN_KEY, "true")]));
    let gate = Arc::new(Notify::new());
    let users = Arc::new(FakeUsers::gated(vec![Ok(profile("u1", "ROLE_USER"))], "abc", gate.clone()));
    let mgr = manager(FakeAuth::rejecting(unauthorized()), users, store.clone());

    tokio::join!(mgr.load_from_storage(), async {
        let err = mgr.login(&credentials()).await.unwrap_err();
        assert_eq!(err, unauthorized());
        assert_eq!(mgr.status(), SessionStatus::Restoring);
        assert!(mgr.user().is_none());
        assert_eq!(mgr.token().as_deref(), Some("abc"));
        gate.notify_one();
    });

    assert_eq!(mgr.status(), SessionStatus::Authenticated);
    assert_eq!(mgr.user().unwrap().id, "u1");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
}

// =============================================================================
// load_user_info
// =============================================================================

#[tokio::test]
async fn standalone_profile_failure_propagates_and_keeps_session() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![
        Ok(profile("kim01", "ROLE_USER")),
        Err(ApiError::Status { status: 500, body: String::new() }),
    ]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());
    mgr.login(&credentials()).await.unwrap();

    let err = mgr.load_user_info().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(mgr.is_logged_in());
    assert_eq!(mgr.user().unwrap().email, "k@x.com");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn load_user_info_refreshes_record_without_touching_token() {
    let store = Arc::new(MemoryStore::new());
    let mut refreshed = profile("kim01", "ROLE_USER");
    refreshed.name = "Kim Updated".into();
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER")), Ok(refreshed)]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store);
    mgr.login(&credentials()).await.unwrap();

    mgr.load_user_info().await.unwrap();

    assert_eq!(mgr.user().unwrap().display_name, "Kim Updated");
    assert_eq!(mgr.token().as_deref(), Some("tok-1"));
}

// =============================================================================
// update_user
// =============================================================================

#[test]
fn update_user_while_anonymous_is_noop() {
    let store = Arc::new(MemoryStore::new());
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), Arc::new(FakeUsers::new(vec![])), store.clone());

    mgr.update_user(UserPatch { display_name: Some("X".into()), ..UserPatch::default() });

    assert!(mgr.user().is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn update_user_changes_only_targeted_field() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store);
    mgr.login(&credentials()).await.unwrap();
    let before = mgr.user().unwrap();

    mgr.update_user(UserPatch { display_name: Some("X".into()), ..UserPatch::default() });

    let after = mgr.user().unwrap();
    assert_eq!(after.display_name, "X");
    assert_eq!(after.id, before.id);
    assert_eq!(after.email, before.email);
    assert_eq!(after.role, before.role);
    assert_eq!(after.profile, before.profile);
}

#[tokio::test]
async fn update_user_role_is_mirrored() {
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(FakeUsers::new(vec![Ok(profile("kim01", "ROLE_USER"))]));
    let mgr = manager(FakeAuth::accepting("ROLE_USER"), users, store.clone());
    mgr.login(&credentials()).await.unwrap();

    mgr.update_user(UserPatch { role: Some(Role::Admin), ..UserPatch::default() });

    assert!(mgr.is_admin());
    assert_eq!(store.get(ROLE_KEY).as_deref(), Some("ROLE_ADMIN"));
}
