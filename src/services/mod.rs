pub mod auth_service;
pub mod referral_service;
pub mod spin_service;
pub mod user_service;
pub mod withdrawal_service;

pub use auth_service::*;
pub use referral_service::*;
pub use spin_service::*;
pub use user_service::*;
pub use withdrawal_service::*;
