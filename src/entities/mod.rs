pub mod referrals;
pub mod spins;
pub mod users;
pub mod withdrawals;

pub use referrals as referral_entity;
pub use spins as spin_entity;
pub use users as user_entity;
pub use withdrawals as withdrawal_entity;

pub use withdrawals::WithdrawalStatus;
