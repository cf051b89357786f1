use crate::entities::{referral_entity as referrals, user_entity as users};
use crate::error::AppResult;
use crate::models::ReferralResponse;
use crate::services::UserService;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Points credited to the referrer for each signed-up referral.
pub const REFERRAL_BONUS: i64 = 200;

/// Append-only ledger linking referrer to referred account. Entries are only
/// ever created from account creation, which runs once per account.
#[derive(Clone)]
pub struct ReferralService {
    pool: DatabaseConnection,
    user_service: UserService,
}

impl ReferralService {
    pub fn new(pool: DatabaseConnection, user_service: UserService) -> Self {
        Self { pool, user_service }
    }

    /// Record the referral and credit the referrer in one transaction.
    pub async fn create_referral(
        &self,
        referrer_id: i32,
        referred_id: i32,
    ) -> AppResult<referrals::Model> {
        let txn = self.pool.begin().await?;

        let referral = referrals::ActiveModel {
            referrer_id: Set(referrer_id),
            referred_id: Set(referred_id),
            points: Set(REFERRAL_BONUS),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        self.user_service
            .adjust_points(&txn, referrer_id, REFERRAL_BONUS)
            .await?;

        txn.commit().await?;
        Ok(referral)
    }

    /// All referrals made by the account, each enriched with the referred
    /// account's public profile. A referred account that no longer resolves
    /// degrades to a null enrichment instead of failing the list.
    pub async fn list_for_referrer(&self, user_id: i32) -> AppResult<Vec<ReferralResponse>> {
        let rows = referrals::Entity::find()
            .filter(referrals::Column::ReferrerId.eq(user_id))
            .order_by_asc(referrals::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for referral in rows {
            let referred_user = users::Entity::find_by_id(referral.referred_id)
                .one(&self.pool)
                .await?;
            result.push(ReferralResponse::new(referral, referred_user));
        }

        Ok(result)
    }

    pub async fn count_for_referrer(&self, user_id: i32) -> AppResult<i64> {
        let count = referrals::Entity::find()
            .filter(referrals::Column::ReferrerId.eq(user_id))
            .count(&self.pool)
            .await?;
        Ok(count as i64)
    }
}
