/// Account types
///
/// Each constant is the stored string form of one supported account category.

/// Day-to-day spending account.
pub const ACCOUNT_TYPE_CHECKING: &str = "checking";

/// Interest-bearing savings account.
pub const ACCOUNT_TYPE_SAVINGS: &str = "savings";

/// Credit card or revolving credit line. Balances are typically negative.
pub const ACCOUNT_TYPE_CREDIT: &str = "credit";

/// Brokerage or retirement account.
pub const ACCOUNT_TYPE_INVESTMENT: &str = "investment";

/// Physical cash on hand.
pub const ACCOUNT_TYPE_CASH: &str = "cash";

/// Anything that does not fit the categories above.
pub const ACCOUNT_TYPE_OTHER: &str = "other";
