mod common;

use actix_web::body::to_bytes;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use sea_orm::ConnectionTrait;

use spinrewards_backend::handlers;
use spinrewards_backend::middlewares::AuthMiddleware;
use spinrewards_backend::services::{SESSION_COOKIE, UserService};
use spinrewards_backend::utils::JwtService;

async fn build_app(
    pool: sea_orm::DatabaseConnection,
    jwt_service: JwtService,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let user_service = UserService::new(pool);

    test::init_service(
        App::new()
            .wrap(AuthMiddleware::new(
                jwt_service.clone(),
                user_service.clone(),
            ))
            .app_data(web::Data::new(user_service))
            .service(web::scope("/api/v1").configure(handlers::auth::auth_config)),
    )
    .await
}

fn me_request(token: Option<&str>) -> actix_http::Request {
    let mut req = test::TestRequest::get().uri("/api/v1/auth/me");
    if let Some(token) = token {
        req = req.cookie(Cookie::new(SESSION_COOKIE, token.to_string()));
    }
    req.to_request()
}

/// Middleware rejections surface as `Err` at the service boundary; render
/// them the way the HTTP server would.
async fn rejection_response(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: actix_http::Request,
) -> (StatusCode, serde_json::Value) {
    let err = test::try_call_service(app, req)
        .await
        .expect_err("Expected the session gate to reject the request");
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.expect("Failed to read body");
    let body: serde_json::Value =
        serde_json::from_slice(&bytes).expect("Error body was not JSON");
    (status, body)
}

#[actix_web::test]
async fn test_request_without_credential_is_unauthorized() {
    let pool = common::setup_db().await;
    let jwt_service = JwtService::new("test-secret", 3600);
    let app = build_app(pool, jwt_service).await;

    let (status, body) = rejection_response(&app, me_request(None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[actix_web::test]
async fn test_garbled_token_is_unauthorized() {
    let pool = common::setup_db().await;
    let jwt_service = JwtService::new("test-secret", 3600);
    let app = build_app(pool, jwt_service).await;

    let (status, body) = rejection_response(&app, me_request(Some("not-a-jwt"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[actix_web::test]
async fn test_token_for_deleted_account_is_unauthorized() {
    let pool = common::setup_db().await;
    let jwt_service = JwtService::new("test-secret", 3600);
    let token = jwt_service
        .generate_token(9999)
        .expect("Failed to generate token");
    let app = build_app(pool, jwt_service).await;

    let (status, body) = rejection_response(&app, me_request(Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[actix_web::test]
async fn test_valid_credential_reaches_the_handler() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let user = common::create_account(&user_service, "gatekeeper").await;

    let jwt_service = JwtService::new("test-secret", 3600);
    let token = jwt_service
        .generate_token(user.id)
        .expect("Failed to generate token");
    let app = build_app(pool, jwt_service).await;

    let resp = test::try_call_service(&app, me_request(Some(&token)))
        .await
        .expect("Expected the request to pass the session gate");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "gatekeeper");
}

#[actix_web::test]
async fn test_storage_failure_is_a_database_error_not_unauthorized() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let user = common::create_account(&user_service, "resolver").await;

    let jwt_service = JwtService::new("test-secret", 3600);
    let token = jwt_service
        .generate_token(user.id)
        .expect("Failed to generate token");
    let app = build_app(pool.clone(), jwt_service).await;

    // Break account resolution out from under a still-valid credential.
    pool.execute_unprepared("DROP TABLE users")
        .await
        .expect("Failed to drop users table");

    let (status, body) = rejection_response(&app, me_request(Some(&token))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
}
