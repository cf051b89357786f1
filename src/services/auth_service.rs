use crate::error::{AppError, AppResult};
use crate::models::{GoogleAuthRequest, LoginRequest, UserResponse};
use crate::services::{NewUser, ReferralService, UserService};
use crate::utils::JwtService;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};

/// Name of the HTTP-only cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Session/identity gate: exchanges identity fields for a signed session
/// credential and creates accounts on first sign-in.
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    user_service: UserService,
    referral_service: ReferralService,
    secure_cookies: bool,
}

impl AuthService {
    pub fn new(
        jwt_service: JwtService,
        user_service: UserService,
        referral_service: ReferralService,
        secure_cookies: bool,
    ) -> Self {
        Self {
            jwt_service,
            user_service,
            referral_service,
            secure_cookies,
        }
    }

    /// Sign in with provider identity fields, creating the account (and
    /// recording the referral) on first contact. Returns the public user
    /// fields and a fresh session token.
    pub async fn google_sign_in(
        &self,
        request: GoogleAuthRequest,
    ) -> AppResult<(UserResponse, String)> {
        if let Some(user) = self
            .user_service
            .find_by_google_id(&request.google_id)
            .await?
        {
            let token = self.jwt_service.generate_token(user.id)?;
            return Ok((user.into(), token));
        }

        // Provider id unknown but the email may already belong to an account
        // created through another path; treat that as the same person.
        if let Some(user) = self.user_service.find_by_email(&request.email).await? {
            let token = self.jwt_service.generate_token(user.id)?;
            return Ok((user.into(), token));
        }

        let referrer = match &request.referral_code {
            Some(code) => self.user_service.find_by_referral_code(code).await?,
            None => None,
        };

        let user = self
            .user_service
            .create_user(NewUser {
                username: request.username,
                email: request.email,
                google_id: Some(request.google_id),
                profile_pic: request.profile_pic,
                referred_by: referrer.as_ref().map(|r| r.id),
            })
            .await?;

        if let Some(referrer) = referrer {
            self.referral_service
                .create_referral(referrer.id, user.id)
                .await?;
        }

        let token = self.jwt_service.generate_token(user.id)?;
        Ok((user.into(), token))
    }

    /// Username/email pair sign-in for accounts that already exist.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(UserResponse, String)> {
        let user = match self.user_service.find_by_email(&request.email).await? {
            Some(user) => Some(user),
            None => self
                .user_service
                .find_by_username(&request.username)
                .await?
                .filter(|u| u.email == request.email),
        };

        let user = user.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let token = self.jwt_service.generate_token(user.id)?;
        Ok((user.into(), token))
    }

    /// Shape the session token as the HTTP-only cookie handed to the browser.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .max_age(CookieDuration::seconds(self.jwt_service.get_expires_in()))
            .finish()
    }

    /// An expired empty cookie that clears the session on the client.
    pub fn logout_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}
