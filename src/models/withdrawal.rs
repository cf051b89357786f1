use crate::entities::{WithdrawalStatus, withdrawal_entity as withdrawals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalRequest {
    #[schema(example = 1000)]
    pub amount: i64,
    /// External payment-account handle.
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    pub id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub destination: String,
    pub status: WithdrawalStatus,
    pub created_at: DateTime<Utc>,
}

impl From<withdrawals::Model> for WithdrawalResponse {
    fn from(w: withdrawals::Model) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            amount: w.amount,
            destination: w.destination,
            status: w.status,
            created_at: w.created_at,
        }
    }
}
