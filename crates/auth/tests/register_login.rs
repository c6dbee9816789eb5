//! Integration tests for registration and login.
//!
//! - Happy path: register then log in
//! - Validation order and messages
//! - Duplicate usernames, including the store-level constraint
//! - Wrong password and unknown user

use assert_matches::assert_matches;
use mdip_auth::{AuthError, AuthService, PasswordConfig};
use mdip_db::models::user::CreateUser;
use mdip_db::repositories::UserRepo;
use mdip_db::schema::ensure_schema;
use mdip_db::Gateway;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> Gateway {
    let db = Gateway::open_in_memory().unwrap();
    ensure_schema(&db).unwrap();
    db
}

fn service(db: &Gateway) -> AuthService<'_> {
    AuthService::new(db, PasswordConfig::insecure_fast())
}

// ---------------------------------------------------------------------------
// Test: register and login
// ---------------------------------------------------------------------------

#[test]
fn test_register_then_login() {
    let db = setup();
    let auth = service(&db);

    let id = auth.register("alice", "secret1", None).unwrap();
    let user = auth.login("alice", "secret1").unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, "user");
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert!(auth.user_exists("alice").unwrap());
}

#[test]
fn test_login_returns_stored_role() {
    let db = setup();
    let auth = service(&db);

    auth.register("root1", "adminpass", Some("admin")).unwrap();
    let user = auth.login("root1", "adminpass").unwrap();

    assert!(user.is_admin());
    assert_eq!(
        auth.get_user_by_username("root1").unwrap().map(|u| u.id),
        Some(user.id)
    );
}

#[test]
fn test_password_is_never_stored_in_plain_text() {
    let db = setup();
    let auth = service(&db);

    auth.register("bob", "hunter22", None).unwrap();
    let stored = UserRepo::find_by_username(&db, "bob").unwrap().unwrap();
    assert!(!stored.password_hash.contains("hunter22"));
}

// ---------------------------------------------------------------------------
// Test: registration failures
// ---------------------------------------------------------------------------

#[test]
fn test_duplicate_username() {
    let db = setup();
    let auth = service(&db);

    auth.register("carol", "secret1", None).unwrap();
    let err = auth.register("carol", "another1", None).unwrap_err();

    assert_matches!(err, AuthError::DuplicateUser(ref name) if name == "carol");
    assert_eq!(err.to_string(), "Username 'carol' already exists.");
}

#[test]
fn test_username_rules() {
    let db = setup();
    let auth = service(&db);

    let err = auth.register("ab", "secret1", None).unwrap_err();
    assert_matches!(err, AuthError::Validation(_));
    assert_eq!(err.to_string(), "Username must be 3-20 characters.");

    let err = auth.register("bad name", "secret1", None).unwrap_err();
    assert_eq!(err.to_string(), "Username must contain only letters and numbers.");
}

#[test]
fn test_password_rules() {
    let db = setup();
    let auth = service(&db);

    let err = auth.register("dave", "12345", None).unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 6 characters.");

    let long = "x".repeat(51);
    let err = auth.register("dave", &long, None).unwrap_err();
    assert_eq!(err.to_string(), "Password cannot exceed 50 characters.");

    assert!(!auth.user_exists("dave").unwrap());
}

#[test]
fn test_duplicate_reported_before_password_rules() {
    let db = setup();
    let auth = service(&db);

    auth.register("erin", "secret1", None).unwrap();
    assert_matches!(
        auth.register("erin", "123", None),
        Err(AuthError::DuplicateUser(_))
    );
}

#[test]
fn test_store_constraint_surfaces_as_storage_error() {
    let db = setup();
    let auth = service(&db);

    // A row inserted behind the service's back, as a concurrent
    // registration would, trips the UNIQUE constraint directly.
    UserRepo::create(
        &db,
        &CreateUser {
            username: "frank".into(),
            password_hash: "x".into(),
            role: "user".into(),
        },
    )
    .unwrap();
    let err = UserRepo::create(
        &db,
        &CreateUser {
            username: "frank".into(),
            password_hash: "y".into(),
            role: "user".into(),
        },
    )
    .map_err(AuthError::from)
    .unwrap_err();

    assert_matches!(err, AuthError::Storage(ref e) if e.is_unique_violation());
    assert!(auth.user_exists("frank").unwrap());
}

// ---------------------------------------------------------------------------
// Test: login failures
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_user() {
    let db = setup();
    let auth = service(&db);

    let err = auth.login("nobody", "secret1").unwrap_err();
    assert_matches!(err, AuthError::UserNotFound);
    assert_eq!(err.to_string(), "Username not found.");
}

#[test]
fn test_wrong_password() {
    let db = setup();
    let auth = service(&db);

    auth.register("grace", "secret1", None).unwrap();
    let err = auth.login("grace", "secret2").unwrap_err();
    assert_matches!(err, AuthError::IncorrectPassword);
    assert_eq!(err.to_string(), "Incorrect password.");
}

#[test]
fn test_malformed_stored_hash_rejects_login() {
    let db = setup();
    let auth = service(&db);

    UserRepo::create(
        &db,
        &CreateUser {
            username: "heidi".into(),
            password_hash: "plaintext".into(),
            role: "user".into(),
        },
    )
    .unwrap();

    assert_matches!(
        auth.login("heidi", "plaintext"),
        Err(AuthError::IncorrectPassword)
    );
}

#[test]
fn test_stored_hash_with_inflated_cost_rejects_login() {
    let db = setup();
    let auth = service(&db);

    let id = auth.register("judy", "secret1", None).unwrap();
    let stored = UserRepo::find_by_id(&db, id).unwrap().unwrap();
    let inflated = stored.password_hash.replace(",t=1,", ",t=2000000,");
    assert_ne!(inflated, stored.password_hash);
    UserRepo::update_password(&db, id, &inflated).unwrap();

    assert_matches!(
        auth.login("judy", "secret1"),
        Err(AuthError::IncorrectPassword)
    );
}

#[test]
fn test_accounts_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("auth.db").display());

    {
        let db = Gateway::new(&url, true).unwrap();
        ensure_schema(&db).unwrap();
        service(&db).register("ivan", "secret1", None).unwrap();
    }

    let db = Gateway::new(&url, false).unwrap();
    assert_eq!(service(&db).login("ivan", "secret1").unwrap().username, "ivan");
}
