use crate::error::AppError;
use crate::services::{SESSION_COOKIE, UserService};
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    excluded_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec!["/swagger-ui", "/swagger-ui/", "/api-docs/openapi.json"],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/", "/api/v1/auth/"],
            // Paths under a public prefix that still require the session.
            excluded_paths: vec!["/api/v1/auth/me"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self
            .excluded_paths
            .iter()
            .any(|&excluded| path.starts_with(excluded))
        {
            return false;
        }

        if self.exact_paths.contains(&path) {
            return true;
        }

        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// Validates the session credential on every protected request and binds the
/// resolved account id to the request extensions.
pub struct AuthMiddleware {
    jwt_service: JwtService,
    user_service: UserService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService, user_service: UserService) -> Self {
        Self {
            jwt_service,
            user_service,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
            user_service: self.user_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: JwtService,
    user_service: UserService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials.
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if self.public_paths.is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let service = Rc::clone(&self.service);
        let jwt_service = self.jwt_service.clone();
        let user_service = self.user_service.clone();

        Box::pin(async move {
            let token = extract_token(&req)
                .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))?;

            let claims = jwt_service
                .verify_token(&token)
                .map_err(|_| AppError::AuthError("Invalid session token".to_string()))?;

            let user_id: i32 = claims
                .sub
                .parse()
                .map_err(|_| AppError::AuthError("Invalid session token".to_string()))?;

            // The token may outlive the account record; re-resolve on every
            // request so a stale credential is rejected, not trusted. A storage
            // failure here is not an auth failure and propagates as such.
            let user = user_service
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

            req.extensions_mut().insert(user.id);

            service.call(req).await
        })
    }
}

/// Session token from the HTTP-only cookie, or a Bearer header for
/// non-browser API clients.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
