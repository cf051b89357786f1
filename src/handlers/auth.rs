use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::models::*;
use crate::services::{AuthService, UserService};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i32> {
    req.extensions().get::<i32>().copied()
}

#[utoipa::path(
    get,
    path = "/auth/ping",
    tag = "auth",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn ping() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "pong",
        "time": Utc::now().to_rfc3339()
    })))
}

#[utoipa::path(
    post,
    path = "/auth/google",
    tag = "auth",
    request_body = GoogleAuthRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = AuthResponse),
        (status = 400, description = "Invalid identity fields"),
        (status = 409, description = "Identity field already taken")
    )
)]
/// Exchange provider identity fields for a session cookie, creating the
/// account (and crediting the referrer) on first sign-in.
pub async fn google_auth(
    auth_service: web::Data<AuthService>,
    request: web::Json<GoogleAuthRequest>,
) -> Result<HttpResponse> {
    match auth_service.google_sign_in(request.into_inner()).await {
        Ok((user, token)) => Ok(HttpResponse::Ok()
            .cookie(auth_service.session_cookie(token))
            .json(json!({
                "success": true,
                "data": { "user": user }
            }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = AuthResponse),
        (status = 404, description = "No account matches the username/email pair")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    match auth_service.login(request.into_inner()).await {
        Ok((user, token)) => Ok(HttpResponse::Ok()
            .cookie(auth_service.session_cookie(token))
            .json(json!({
                "success": true,
                "data": { "user": user }
            }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout(auth_service: web::Data<AuthService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .cookie(auth_service.logout_cookie())
        .json(json!({
            "success": true,
            "message": "Logged out"
        })))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(user_service: web::Data<UserService>, req: HttpRequest) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match user_service.get_user(user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": UserResponse::from(user)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/ping", web::get().to(ping))
            .route("/google", web::post().to(google_auth))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
