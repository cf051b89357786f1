use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{UpdateProfileRequest, UserResponse};
use crate::utils::{generate_unique_referral_code, validate_email, validate_username};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};

/// Input for account creation. `referred_by` must already be resolved to an
/// existing account id by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub google_id: Option<String>,
    pub profile_pic: Option<String>,
    pub referred_by: Option<i32>,
}

/// Account directory: identity lookups, account creation, balance deltas and
/// profile edits.
#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    // Lookups return Ok(None) on absence; a missing account is an expected
    // outcome here, not an error.

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(id).one(&self.pool).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.pool)
            .await?)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::GoogleId.eq(google_id))
            .one(&self.pool)
            .await?)
    }

    pub async fn find_by_referral_code(&self, code: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::ReferralCode.eq(code))
            .one(&self.pool)
            .await?)
    }

    pub async fn get_user(&self, id: i32) -> AppResult<users::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Create an account with a zero balance and a fresh unique referral code.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<users::Model> {
        validate_username(&new_user.username)?;
        validate_email(&new_user.email)?;

        if self.find_by_username(&new_user.username).await?.is_some() {
            return Err(AppError::UniquenessViolation(
                "Username already taken".to_string(),
            ));
        }
        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(AppError::UniquenessViolation(
                "Email already registered".to_string(),
            ));
        }
        if let Some(google_id) = &new_user.google_id
            && self.find_by_google_id(google_id).await?.is_some()
        {
            return Err(AppError::UniquenessViolation(
                "Account already exists for this Google identity".to_string(),
            ));
        }

        let referral_code = generate_unique_referral_code(&self.pool).await?;

        let user = users::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            google_id: Set(new_user.google_id),
            profile_pic: Set(new_user.profile_pic),
            points: Set(0),
            referral_code: Set(referral_code),
            referred_by: Set(new_user.referred_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(user)
    }

    /// Apply a signed delta to the point balance as a single server-side
    /// `points = points + delta` update, so concurrent grants never lose
    /// increments to a read-modify-write race.
    pub async fn adjust_points<C>(&self, conn: &C, user_id: i32, delta: i64) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Points,
                Expr::col(users::Column::Points).add(delta),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    /// Partial update of username / profile picture.
    pub async fn update_profile(
        &self,
        user_id: i32,
        request: UpdateProfileRequest,
    ) -> AppResult<UserResponse> {
        if request.username.is_none() && request.profile_pic.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        if let Some(username) = &request.username {
            validate_username(username)?;

            if let Some(existing) = self.find_by_username(username).await?
                && existing.id != user_id
            {
                return Err(AppError::UniquenessViolation(
                    "Username already taken".to_string(),
                ));
            }
        }

        let mut model = self.get_user(user_id).await?.into_active_model();
        if let Some(username) = request.username {
            model.username = Set(username);
        }
        if let Some(profile_pic) = request.profile_pic {
            model.profile_pic = Set(Some(profile_pic));
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }
}
