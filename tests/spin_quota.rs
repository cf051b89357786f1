mod common;

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use spinrewards_backend::AppError;
use spinrewards_backend::entities::spin_entity as spins;
use spinrewards_backend::services::{
    DAILY_SPIN_QUOTA, FIRST_SPIN_BONUS, SpinService, UserService, WHEEL_AMOUNTS,
};

#[tokio::test]
async fn first_spin_of_day_grants_fixed_bonus() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "alice").await;

    let result = spin_service.spin(user.id).await.unwrap();
    assert_eq!(result.spin.amount, FIRST_SPIN_BONUS);
    assert_eq!(result.points, FIRST_SPIN_BONUS);
    assert_eq!(result.spins_remaining, DAILY_SPIN_QUOTA - 1);

    assert_eq!(spin_service.count_today(user.id).await.unwrap(), 1);
}

#[tokio::test]
async fn later_spins_draw_from_the_wheel() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "bob").await;

    spin_service.spin(user.id).await.unwrap();
    for _ in 0..3 {
        let result = spin_service.spin(user.id).await.unwrap();
        assert!(
            WHEEL_AMOUNTS.contains(&result.spin.amount),
            "{} is not a wheel value",
            result.spin.amount
        );
    }
}

#[tokio::test]
async fn eleventh_spin_fails_without_side_effects() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "carol").await;

    for i in 0..DAILY_SPIN_QUOTA {
        let result = spin_service.spin(user.id).await.unwrap();
        assert_eq!(result.spins_remaining, DAILY_SPIN_QUOTA - i - 1);
    }

    let balance_before = user_service.get_user(user.id).await.unwrap().points;

    let err = spin_service.spin(user.id).await.unwrap_err();
    assert!(matches!(err, AppError::QuotaExceeded(_)));

    // no event appended, no balance change
    assert_eq!(
        spin_service.count_today(user.id).await.unwrap(),
        DAILY_SPIN_QUOTA
    );
    assert_eq!(
        user_service.get_user(user.id).await.unwrap().points,
        balance_before
    );
}

#[tokio::test]
async fn balance_equals_sum_of_granted_amounts() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "dave").await;

    let mut total = 0;
    for _ in 0..3 {
        total += spin_service.spin(user.id).await.unwrap().spin.amount;
    }

    assert_eq!(user_service.get_user(user.id).await.unwrap().points, total);
}

#[tokio::test]
async fn count_today_ignores_earlier_days() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "erin").await;

    // a spin dated yesterday must not count against today's quota
    spins::ActiveModel {
        user_id: Set(user.id),
        amount: Set(20),
        created_at: Set(Utc::now() - Duration::days(1)),
        ..Default::default()
    }
    .insert(&pool)
    .await
    .unwrap();

    assert_eq!(spin_service.count_today(user.id).await.unwrap(), 0);

    // and today's first spin still gets the first-of-day bonus
    let result = spin_service.spin(user.id).await.unwrap();
    assert_eq!(result.spin.amount, FIRST_SPIN_BONUS);
}

#[tokio::test]
async fn recent_is_ascending_and_bounded() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let spin_service = SpinService::new(pool.clone(), user_service.clone());

    let user = common::create_account(&user_service, "frank").await;

    for _ in 0..3 {
        spin_service.spin(user.id).await.unwrap();
    }

    let all = spin_service.recent(user.id, 10).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let bounded = spin_service.recent(user.id, 2).await.unwrap();
    assert_eq!(bounded.len(), 2);
}
