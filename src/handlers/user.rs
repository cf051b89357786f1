use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::{ReferralService, UserService};

fn get_user_id_from_request(req: &HttpRequest) -> Option<i32> {
    req.extensions().get::<i32>().copied()
}

#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "user",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Current account's public fields", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match user_service.get_user(user_id).await {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": UserResponse::from(user)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/user/profile",
    tag = "user",
    request_body = UpdateProfileRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "No fields to update or invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match user_service
        .update_profile(user_id, request.into_inner())
        .await
    {
        Ok(user) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": user
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/referrals",
    tag = "user",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Referrals with referred-account profiles", body = [ReferralResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_referrals(
    referral_service: web::Data<ReferralService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match referral_service.list_for_referrer(user_id).await {
        Ok(referrals) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": referrals
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/user/referrals/count",
    tag = "user",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Number of referred signups", body = ReferralCountResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_referrals_count(
    referral_service: web::Data<ReferralService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req).unwrap_or(0);

    match referral_service.count_for_referrer(user_id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": ReferralCountResponse { count }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .route("/profile", web::get().to(get_profile))
            .route("/profile", web::patch().to(update_profile))
            .route("/referrals", web::get().to(get_referrals))
            .route("/referrals/count", web::get().to(get_referrals_count)),
    );
}
