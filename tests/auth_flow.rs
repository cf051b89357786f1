mod common;

use spinrewards_backend::AppError;
use spinrewards_backend::models::{LoginRequest, UpdateProfileRequest};
use spinrewards_backend::services::{AuthService, ReferralService, UserService};
use spinrewards_backend::utils::JwtService;

fn auth_service(pool: &sea_orm::DatabaseConnection) -> (AuthService, UserService) {
    let user_service = UserService::new(pool.clone());
    let referral_service = ReferralService::new(pool.clone(), user_service.clone());
    let auth = AuthService::new(
        JwtService::new("test-secret", 3600),
        user_service.clone(),
        referral_service,
        false,
    );
    (auth, user_service)
}

#[tokio::test]
async fn login_resolves_by_email() {
    let pool = common::setup_db().await;
    let (auth, user_service) = auth_service(&pool);

    let created = common::create_account(&user_service, "alice").await;

    let (user, token) = auth
        .login(LoginRequest {
            username: "whatever".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, created.id);
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_falls_back_to_username_with_matching_email() {
    let pool = common::setup_db().await;
    let (auth, user_service) = auth_service(&pool);

    common::create_account(&user_service, "bob").await;

    // email alone does not resolve, username does but only when the
    // email matches the record
    let err = auth
        .login(LoginRequest {
            username: "bob".to_string(),
            email: "not-bob@example.com".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let (user, _) = auth
        .login(LoginRequest {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.username, "bob");
}

#[tokio::test]
async fn session_cookie_is_http_only_with_ttl() {
    let pool = common::setup_db().await;
    let (auth, _) = auth_service(&pool);

    let cookie = auth.session_cookie("some-token".to_string());
    assert_eq!(cookie.name(), "token");
    assert_eq!(cookie.http_only(), Some(true));
    assert!(cookie.max_age().is_some());

    let removal = auth.logout_cookie();
    assert_eq!(removal.name(), "token");
    assert_eq!(removal.value(), "");
}

#[tokio::test]
async fn profile_update_is_partial_and_validated() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());

    let user = common::create_account(&user_service, "carol").await;
    common::create_account(&user_service, "taken").await;

    // empty update is rejected
    let err = user_service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                username: None,
                profile_pic: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // colliding username is rejected
    let err = user_service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                username: Some("taken".to_string()),
                profile_pic: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UniquenessViolation(_)));

    // partial update keeps the other field
    let updated = user_service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                username: None,
                profile_pic: Some("https://cdn.example.com/pic.png".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.username, "carol");
    assert_eq!(
        updated.profile_pic.as_deref(),
        Some("https://cdn.example.com/pic.png")
    );

    let renamed = user_service
        .update_profile(
            user.id,
            UpdateProfileRequest {
                username: Some("caroline".to_string()),
                profile_pic: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.username, "caroline");
}

#[tokio::test]
async fn profile_update_for_missing_account_is_not_found() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());

    let err = user_service
        .update_profile(
            9999,
            UpdateProfileRequest {
                username: Some("ghost".to_string()),
                profile_pic: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
