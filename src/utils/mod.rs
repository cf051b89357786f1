pub mod day;
pub mod jwt;
pub mod referral_code;
pub mod validate;

pub use day::start_of_local_day;
pub use jwt::*;
pub use referral_code::generate_unique_referral_code;
pub use validate::{validate_email, validate_username};
