use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::fx::effective_amount;
use crate::transactions::{Transaction, TransactionType, TransferCredit};

/// Computes an account's balance from scratch.
///
/// `outgoing` holds every transaction whose source is the account; `incoming`
/// holds every transfer whose destination is the account. Incomes add their
/// amount, expenses and outgoing transfers subtract theirs, and incoming
/// transfers add the effective (possibly converted) amount. The result is
/// rounded half-away-from-zero to the account currency's precision.
pub fn calculate_balance(
    initial_balance: Decimal,
    outgoing: &[Transaction],
    incoming: &[TransferCredit],
    account_currency: &str,
    decimal_places: u32,
) -> Decimal {
    let mut balance = initial_balance;

    for transaction in outgoing {
        match TransactionType::from_str(&transaction.transaction_type) {
            Ok(TransactionType::Income) => balance += transaction.amount,
            Ok(TransactionType::Expense) => balance -= transaction.amount,
            Ok(TransactionType::Transfer) => balance -= transaction.amount,
            Err(_) => {
                warn!(
                    "Skipping transaction {} with unknown type '{}'",
                    transaction.id, transaction.transaction_type
                );
            }
        }
    }

    for credit in incoming {
        balance += effective_amount(
            &credit.transaction,
            &credit.source_currency,
            account_currency,
        );
    }

    balance.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}
