use crate::entities::{referral_entity as referrals, user_entity as users};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Public profile slice of a referred account, shown in the referrer's list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferredUser {
    pub id: i32,
    pub username: String,
    pub profile_pic: Option<String>,
}

impl From<users::Model> for ReferredUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile_pic: user.profile_pic,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub id: i32,
    pub referrer_id: i32,
    pub referred_id: i32,
    pub points: i64,
    pub created_at: DateTime<Utc>,
    /// None when the referred account cannot be resolved; the list itself
    /// still succeeds.
    pub referred_user: Option<ReferredUser>,
}

impl ReferralResponse {
    pub fn new(referral: referrals::Model, referred_user: Option<users::Model>) -> Self {
        Self {
            id: referral.id,
            referrer_id: referral.referrer_id,
            referred_id: referral.referred_id,
            points: referral.points,
            created_at: referral.created_at,
            referred_user: referred_user.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReferralCountResponse {
    pub count: i64,
}
