use crate::entities::{WithdrawalStatus, user_entity as users, withdrawal_entity as withdrawals};
use crate::error::{AppError, AppResult};
use crate::models::WithdrawalResponse;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// Smallest amount of points a payout request may ask for.
pub const MIN_WITHDRAWAL: i64 = 1000;

/// Append-only ledger of payout requests. Requests start (and, as far as this
/// service is concerned, stay) in `pending`.
#[derive(Clone)]
pub struct WithdrawalService {
    pool: DatabaseConnection,
}

impl WithdrawalService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Validate the amount, deduct the balance and append a pending request.
    ///
    /// The balance check and the deduction are one conditional update
    /// (`points = points - amount` only where `points >= amount`), so two
    /// concurrent requests can never overdraw the account; the losing update
    /// simply matches zero rows and is reported as insufficient balance.
    pub async fn request_withdrawal(
        &self,
        user_id: i32,
        amount: i64,
        destination: String,
    ) -> AppResult<WithdrawalResponse> {
        if destination.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Destination account is required".to_string(),
            ));
        }
        if amount < MIN_WITHDRAWAL {
            return Err(AppError::BelowMinimum(format!(
                "Minimum withdrawal amount is {MIN_WITHDRAWAL} points"
            )));
        }

        let txn = self.pool.begin().await?;

        users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let deducted = users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).sub(amount),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .filter(users::Column::Points.gte(amount))
            .exec(&txn)
            .await?;

        if deducted.rows_affected == 0 {
            return Err(AppError::InsufficientBalance(
                "Insufficient points".to_string(),
            ));
        }

        let withdrawal = withdrawals::ActiveModel {
            user_id: Set(user_id),
            amount: Set(amount),
            destination: Set(destination),
            status: Set(WithdrawalStatus::Pending),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(withdrawal.into())
    }

    /// All payout requests for the account, ascending by creation time.
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<WithdrawalResponse>> {
        let rows = withdrawals::Entity::find()
            .filter(withdrawals::Column::UserId.eq(user_id))
            .order_by_asc(withdrawals::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
