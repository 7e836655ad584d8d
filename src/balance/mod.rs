//! Balance recomputation engine - full-rescan balance derivation and the
//! per-account locks serializing it.

mod account_locks;
mod balance_calculator;
mod balance_service;


// Re-export the public interface
pub use account_locks::{acquire, AccountLockRegistry};
pub use balance_calculator::calculate_balance;
pub use balance_service::BalanceService;
