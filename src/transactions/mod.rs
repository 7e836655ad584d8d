//! Transaction ledger module - the only mutator of account balances.

mod transactions_constants;
mod transactions_model;
mod transactions_repository;
mod transactions_service;
mod transactions_traits;


// Re-export the public interface
pub use transactions_constants::*;
pub use transactions_model::{
    NewTransaction, Transaction, TransactionDB, TransactionFilter, TransactionType,
    TransactionUpdate, TransferCredit,
};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
