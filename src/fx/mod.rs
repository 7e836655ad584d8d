//! Cross-currency conversion resolver - advisory rates and transfer credits.

mod fx_errors;
mod fx_model;
mod fx_repository;
mod fx_service;
mod fx_traits;

#[cfg(test)]
mod fx_service_tests;

// Re-export the public interface
pub use fx_errors::FxError;
pub use fx_model::{ImpliedTransferRate, ImpliedTransferRateDB};
pub use fx_repository::FxRepository;
pub use fx_service::{effective_amount, FxService};
pub use fx_traits::{FxRepositoryTrait, FxServiceTrait};
