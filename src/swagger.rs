use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::WithdrawalStatus;
use crate::handlers;
use crate::models::*;
use crate::services::SESSION_COOKIE;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::ping,
        handlers::auth::google_auth,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::user::get_profile,
        handlers::user::update_profile,
        handlers::user::get_referrals,
        handlers::user::get_referrals_count,
        handlers::spin::get_count,
        handlers::spin::spin,
        handlers::spin::get_recent,
        handlers::withdrawal::create_withdrawal,
        handlers::withdrawal::get_withdrawals,
    ),
    components(
        schemas(
            GoogleAuthRequest,
            LoginRequest,
            UpdateProfileRequest,
            UserResponse,
            AuthResponse,
            SpinEventResponse,
            SpinResponse,
            SpinCountResponse,
            ReferredUser,
            ReferralResponse,
            ReferralCountResponse,
            CreateWithdrawalRequest,
            WithdrawalResponse,
            WithdrawalStatus,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in and session management"),
        (name = "user", description = "Profile and referrals"),
        (name = "spins", description = "Daily reward draw"),
        (name = "withdrawals", description = "Point payout requests")
    ),
    info(
        title = "Spin Rewards API",
        description = "Points, daily spins, referrals and withdrawals",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
