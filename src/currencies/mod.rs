//! Currency registry module - reference data for account denominations.

mod currencies_model;
mod currencies_repository;
mod currencies_service;
mod currencies_traits;

#[cfg(test)]
mod currencies_model_tests;
#[cfg(test)]
mod currencies_service_tests;

// Re-export the public interface
pub use currencies_model::{
    validate_currency_code, Currency, CurrencyDB, CurrencyUpdate, NewCurrency,
};
pub use currencies_repository::CurrencyRepository;
pub use currencies_service::CurrencyService;
pub use currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
