use crate::entities::user_entity as users;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sign-in/sign-up with already-resolved provider identity fields. The
/// provider redirect dance happens client-side; this backend only receives
/// the resulting identity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthRequest {
    pub google_id: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "jane")]
    pub username: String,
    pub profile_pic: Option<String>,
    /// Referral code of an existing account, credited 200 points when it resolves.
    pub referral_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "jane")]
    pub username: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub profile_pic: Option<String>,
}

/// Public account fields; never exposes google_id or referred_by.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub points: i64,
    pub referral_code: String,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile_pic: user.profile_pic,
            points: user.points,
            referral_code: user.referral_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
}
