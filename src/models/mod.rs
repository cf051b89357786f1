pub mod common;
pub mod referral;
pub mod spin;
pub mod user;
pub mod withdrawal;

pub use common::*;
pub use referral::*;
pub use spin::*;
pub use user::*;
pub use withdrawal::*;
