use crate::entities::user_entity as users;
use crate::error::AppResult;
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

const CODE_LEN: usize = 8;
const CODE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Generate an 8-character referral code not yet assigned to any account.
pub async fn generate_unique_referral_code(pool: &DatabaseConnection) -> AppResult<String> {
    loop {
        let code = random_code();

        let exists = users::Entity::find()
            .filter(users::Column::ReferralCode.eq(&code))
            .one(pool)
            .await?;

        if exists.is_none() {
            return Ok(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_code_shape() {
        let code = random_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
