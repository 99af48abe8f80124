//! 공학경제 계산 모듈 모음.

pub mod aec;
pub mod discount;

pub use aec::{CashFlowError, CashFlowSchedule};
pub use discount::{annuity_factor, capital_recovery_factor, present_factor};
