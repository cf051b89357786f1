use crate::entities::spin_entity as spins;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinEventResponse {
    pub id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl From<spins::Model> for SpinEventResponse {
    fn from(spin: spins::Model) -> Self {
        Self {
            id: spin.id,
            user_id: spin.user_id,
            amount: spin.amount,
            created_at: spin.created_at,
        }
    }
}

/// Result of one successful spin: the event, the account's new balance and
/// how many spins are left today.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub spin: SpinEventResponse,
    pub points: i64,
    pub spins_remaining: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpinCountResponse {
    pub count: i64,
    pub remaining: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecentSpinsQuery {
    /// Cap on returned events (default 10).
    pub limit: Option<u64>,
}
