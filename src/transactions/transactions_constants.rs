/// Stable string form for income transactions
pub const TRANSACTION_TYPE_INCOME: &str = "income";

/// Stable string form for expense transactions
pub const TRANSACTION_TYPE_EXPENSE: &str = "expense";

/// Stable string form for transfer transactions
pub const TRANSACTION_TYPE_TRANSFER: &str = "transfer";
