use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use spinrewards_backend::entities::user_entity as users;
use spinrewards_backend::services::{NewUser, UserService};

/// Fresh in-memory database with the full schema applied. A single pooled
/// connection, otherwise every checkout would see its own empty memory db.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let pool = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory sqlite");
    Migrator::up(&pool, None)
        .await
        .expect("Failed to run migrations");
    pool
}

#[allow(dead_code)]
pub async fn create_account(service: &UserService, username: &str) -> users::Model {
    service
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            google_id: Some(format!("google-{username}")),
            profile_pic: None,
            referred_by: None,
        })
        .await
        .expect("Failed to create account")
}
