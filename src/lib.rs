pub mod db;

pub mod accounts;
pub mod audit;
pub mod balance;
pub mod constants;
pub mod currencies;
pub mod errors;
pub mod fx;
pub mod schema;
pub mod transactions;

pub use errors::{Error, Result};
