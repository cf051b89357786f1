use crate::entities::{spin_entity as spins, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{SpinEventResponse, SpinResponse};
use crate::services::UserService;
use crate::utils::start_of_local_day;
use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Spins allowed per account per calendar day.
pub const DAILY_SPIN_QUOTA: i64 = 10;

/// The first spin of each day grants a fixed bonus instead of a draw.
pub const FIRST_SPIN_BONUS: i64 = 50;

/// Reward multiset for every spin after the first of the day.
pub const WHEEL_AMOUNTS: [i64; 9] = [5, 8, 10, 12, 15, 20, 25, 30, 40];

fn draw_amount(today_count: i64) -> i64 {
    if today_count == 0 {
        return FIRST_SPIN_BONUS;
    }
    let mut rng = rand::thread_rng();
    WHEEL_AMOUNTS[rng.gen_range(0..WHEEL_AMOUNTS.len())]
}

/// Append-only ledger of point-earning spin events with a daily quota.
#[derive(Clone)]
pub struct SpinService {
    pool: DatabaseConnection,
    user_service: UserService,
}

impl SpinService {
    pub fn new(pool: DatabaseConnection, user_service: UserService) -> Self {
        Self { pool, user_service }
    }

    /// Number of spin events for the account since local midnight.
    pub async fn count_today(&self, user_id: i32) -> AppResult<i64> {
        self.count_today_on(&self.pool, user_id).await
    }

    async fn count_today_on<C>(&self, conn: &C, user_id: i32) -> AppResult<i64>
    where
        C: ConnectionTrait,
    {
        let count = spins::Entity::find()
            .filter(spins::Column::UserId.eq(user_id))
            .filter(spins::Column::CreatedAt.gte(start_of_local_day()))
            .count(conn)
            .await?;
        Ok(count as i64)
    }

    /// Perform one spin: quota check, reward draw, event append and balance
    /// grant run inside a single transaction so the event and the increment
    /// land together and concurrent spins cannot slip past the quota.
    pub async fn spin(&self, user_id: i32) -> AppResult<SpinResponse> {
        let txn = self.pool.begin().await?;

        let today_count = self.count_today_on(&txn, user_id).await?;
        if today_count >= DAILY_SPIN_QUOTA {
            return Err(AppError::QuotaExceeded("No spins left today".to_string()));
        }

        let amount = draw_amount(today_count);

        let event = spins::ActiveModel {
            user_id: Set(user_id),
            amount: Set(amount),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        self.user_service
            .adjust_points(&txn, user_id, amount)
            .await?;

        let points = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .map(|u| u.points)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        txn.commit().await?;

        Ok(SpinResponse {
            spin: event.into(),
            points,
            spins_remaining: DAILY_SPIN_QUOTA - (today_count + 1),
        })
    }

    /// Spin events for the account ascending by creation time, capped at
    /// `limit` rows.
    pub async fn recent(&self, user_id: i32, limit: u64) -> AppResult<Vec<SpinEventResponse>> {
        let models = spins::Entity::find()
            .filter(spins::Column::UserId.eq(user_id))
            .order_by_asc(spins::Column::CreatedAt)
            .limit(limit)
            .all(&self.pool)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
