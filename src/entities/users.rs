use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Account record. Accounts are created on first sign-in and never deleted;
/// `points` only ever changes through server-side atomic deltas.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub email: String,
    /// External provider identity, absent for accounts created via plain login.
    pub google_id: Option<String>,
    pub profile_pic: Option<String>,
    pub points: i64,
    /// Unique token handed out for referring new signups; immutable once assigned.
    pub referral_code: String,
    /// Referrer's account id, set at most once at creation.
    pub referred_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
