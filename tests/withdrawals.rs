mod common;

use spinrewards_backend::AppError;
use spinrewards_backend::entities::WithdrawalStatus;
use spinrewards_backend::services::{MIN_WITHDRAWAL, UserService, WithdrawalService};

#[tokio::test]
async fn below_minimum_fails_regardless_of_balance() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "alice").await;
    user_service.adjust_points(&pool, user.id, 5000).await.unwrap();

    let err = withdrawal_service
        .request_withdrawal(user.id, MIN_WITHDRAWAL - 1, "acct-1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BelowMinimum(_)));

    assert_eq!(user_service.get_user(user.id).await.unwrap().points, 5000);
    assert!(withdrawal_service.list_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn insufficient_balance_leaves_account_untouched() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "bob").await;
    user_service.adjust_points(&pool, user.id, 5000).await.unwrap();

    let err = withdrawal_service
        .request_withdrawal(user.id, 6000, "acct-2".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InsufficientBalance(_)));

    assert_eq!(user_service.get_user(user.id).await.unwrap().points, 5000);
    assert!(withdrawal_service.list_for_user(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn successful_withdrawal_deducts_and_stays_pending() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "carol").await;
    user_service.adjust_points(&pool, user.id, 5000).await.unwrap();

    let withdrawal = withdrawal_service
        .request_withdrawal(user.id, 1000, "acct-3".to_string())
        .await
        .unwrap();

    assert_eq!(withdrawal.amount, 1000);
    assert_eq!(withdrawal.destination, "acct-3");
    assert_eq!(withdrawal.status, WithdrawalStatus::Pending);

    assert_eq!(user_service.get_user(user.id).await.unwrap().points, 4000);

    let history = withdrawal_service.list_for_user(user.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, WithdrawalStatus::Pending);
}

#[tokio::test]
async fn exact_balance_can_be_withdrawn() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "dave").await;
    user_service.adjust_points(&pool, user.id, 1000).await.unwrap();

    withdrawal_service
        .request_withdrawal(user.id, 1000, "acct-4".to_string())
        .await
        .unwrap();

    assert_eq!(user_service.get_user(user.id).await.unwrap().points, 0);
}

#[tokio::test]
async fn history_is_ordered_by_creation() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "erin").await;
    user_service.adjust_points(&pool, user.id, 5000).await.unwrap();

    let first = withdrawal_service
        .request_withdrawal(user.id, 1000, "acct-5".to_string())
        .await
        .unwrap();
    let second = withdrawal_service
        .request_withdrawal(user.id, 2000, "acct-5".to_string())
        .await
        .unwrap();

    let history = withdrawal_service.list_for_user(user.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, first.id);
    assert_eq!(history[1].id, second.id);
    assert!(history[0].created_at <= history[1].created_at);
}

#[tokio::test]
async fn empty_destination_is_rejected() {
    let pool = common::setup_db().await;
    let user_service = UserService::new(pool.clone());
    let withdrawal_service = WithdrawalService::new(pool.clone());

    let user = common::create_account(&user_service, "frank").await;
    user_service.adjust_points(&pool, user.id, 5000).await.unwrap();

    let err = withdrawal_service
        .request_withdrawal(user.id, 1000, "  ".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
