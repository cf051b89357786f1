pub mod auth;
pub mod spin;
pub mod user;
pub mod withdrawal;

pub use auth::auth_config;
pub use spin::spin_config;
pub use user::user_config;
pub use withdrawal::withdrawal_config;
