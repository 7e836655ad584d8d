//! Tests for the advisory exchange rate resolver.

#[cfg(test)]
mod tests {
    use crate::currencies::{Currency, CurrencyRepositoryTrait, CurrencyUpdate, NewCurrency};
    use crate::errors::{CurrencyError, Error, Result};
    use crate::fx::fx_model::ImpliedTransferRate;
    use crate::fx::fx_traits::{FxRepositoryTrait, FxServiceTrait};
    use crate::fx::{effective_amount, FxService};
    use crate::transactions::Transaction;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn test_date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    // --- Mock FxRepository ---
    struct MockFxRepository {
        implied: Mutex<Option<ImpliedTransferRate>>,
    }

    impl MockFxRepository {
        fn new() -> Self {
            Self {
                implied: Mutex::new(None),
            }
        }

        fn with_implied(rate: Decimal, from_currency: &str, to_currency: &str) -> Self {
            Self {
                implied: Mutex::new(Some(ImpliedTransferRate {
                    rate,
                    from_currency: from_currency.to_string(),
                    to_currency: to_currency.to_string(),
                })),
            }
        }
    }

    impl FxRepositoryTrait for MockFxRepository {
        fn latest_transfer_rate(
            &self,
            _from_currency: &str,
            _to_currency: &str,
        ) -> Result<Option<ImpliedTransferRate>> {
            Ok(self.implied.lock().unwrap().clone())
        }
    }

    // --- Mock CurrencyRepository ---
    struct MockCurrencyRepository {
        currencies: Mutex<HashMap<String, Currency>>,
    }

    impl MockCurrencyRepository {
        fn new() -> Self {
            Self {
                currencies: Mutex::new(HashMap::new()),
            }
        }

        fn add_currency(&self, currency: Currency) {
            self.currencies
                .lock()
                .unwrap()
                .insert(currency.code.clone(), currency);
        }
    }

    impl CurrencyRepositoryTrait for MockCurrencyRepository {
        fn get_by_code(&self, code: &str) -> Result<Currency> {
            self.currencies
                .lock()
                .unwrap()
                .get(code)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("Currency {} not found", code)))
        }

        fn list(&self) -> Result<Vec<Currency>> {
            Ok(self.currencies.lock().unwrap().values().cloned().collect())
        }

        fn list_active(&self) -> Result<Vec<Currency>> {
            Ok(self
                .currencies
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.is_active)
                .cloned()
                .collect())
        }

        fn create(&self, _new_currency: NewCurrency) -> Result<Currency> {
            unimplemented!()
        }

        fn update(&self, _code: &str, _update: CurrencyUpdate) -> Result<Currency> {
            unimplemented!()
        }
    }

    fn create_test_currency(
        code: &str,
        decimal_places: i32,
        exchange_rate: Option<Decimal>,
    ) -> Currency {
        Currency {
            code: code.to_string(),
            name: code.to_string(),
            symbol: code.to_string(),
            decimal_places,
            is_active: true,
            exchange_rate,
            rate_source: None,
            notes: None,
            created_at: test_date(),
            updated_at: test_date(),
        }
    }

    fn create_service(
        fx_repository: MockFxRepository,
        currency_repository: MockCurrencyRepository,
    ) -> FxService {
        FxService::new(Arc::new(fx_repository), Arc::new(currency_repository))
    }

    // ============================================================================
    // get_exchange_rate Tests
    // ============================================================================

    #[test]
    fn test_same_currency_rate_is_one() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        let rate = service.get_exchange_rate("USD", "usd").unwrap();
        assert_eq!(rate, Decimal::ONE);
    }

    #[test]
    fn test_implied_rate_preferred_over_defaults() {
        let service = create_service(
            MockFxRepository::with_implied(dec!(0.92), "USD", "EUR"),
            MockCurrencyRepository::new(),
        );
        let rate = service.get_exchange_rate("USD", "EUR").unwrap();
        assert_eq!(rate, dec!(0.92));
    }

    #[test]
    fn test_implied_rate_inverted_for_reverse_direction() {
        let service = create_service(
            MockFxRepository::with_implied(dec!(0.92), "USD", "EUR"),
            MockCurrencyRepository::new(),
        );
        let rate = service.get_exchange_rate("EUR", "USD").unwrap();
        assert_eq!(rate, dec!(1.086957));
    }

    #[test]
    fn test_zero_implied_rate_falls_back_to_defaults() {
        let service = create_service(
            MockFxRepository::with_implied(dec!(0), "USD", "EUR"),
            MockCurrencyRepository::new(),
        );
        let rate = service.get_exchange_rate("USD", "EUR").unwrap();
        assert_eq!(rate, dec!(0.85));
    }

    #[test]
    fn test_default_rates_compose_through_base_currency() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        let rate = service.get_exchange_rate("EUR", "GBP").unwrap();
        assert_eq!(rate, dec!(0.858824));
    }

    #[test]
    fn test_manual_registry_rate_overrides_default_table() {
        let currencies = MockCurrencyRepository::new();
        currencies.add_currency(create_test_currency("EUR", 2, Some(dec!(0.90))));

        let service = create_service(MockFxRepository::new(), currencies);
        let rate = service.get_exchange_rate("USD", "EUR").unwrap();
        assert_eq!(rate, dec!(0.90));
    }

    #[test]
    fn test_unknown_pair_returns_rate_not_found() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        let result = service.get_exchange_rate("USD", "XCD");
        assert!(matches!(
            result,
            Err(Error::Currency(CurrencyError::RateNotFound(_)))
        ));
    }

    #[test]
    fn test_malformed_code_is_rejected() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        assert!(service.get_exchange_rate("US", "EUR").is_err());
        assert!(service.get_exchange_rate("USD", "EU1").is_err());
    }

    // ============================================================================
    // convert_amount Tests
    // ============================================================================

    #[test]
    fn test_convert_amount_same_currency_passthrough() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        let converted = service.convert_amount(dec!(123.45), "USD", "USD").unwrap();
        assert_eq!(converted, dec!(123.45));
    }

    #[test]
    fn test_convert_amount_applies_rate_and_rounds() {
        let currencies = MockCurrencyRepository::new();
        currencies.add_currency(create_test_currency("JPY", 0, None));

        let service = create_service(MockFxRepository::new(), currencies);
        let converted = service.convert_amount(dec!(1.005), "USD", "JPY").unwrap();
        assert_eq!(converted, dec!(111));
    }

    #[test]
    fn test_convert_amount_returns_original_when_no_rate() {
        let service = create_service(MockFxRepository::new(), MockCurrencyRepository::new());
        let converted = service.convert_amount(dec!(100), "USD", "XCD").unwrap();
        assert_eq!(converted, dec!(100));
    }

    // ============================================================================
    // effective_amount Tests
    // ============================================================================

    fn create_test_transfer(amount: Decimal, converted_amount: Option<Decimal>) -> Transaction {
        Transaction {
            id: "txn-1".to_string(),
            owner_id: "owner-1".to_string(),
            account_id: "acct-1".to_string(),
            transaction_type: "transfer".to_string(),
            amount,
            description: None,
            notes: None,
            category: None,
            reference_number: None,
            transaction_date: test_date(),
            transfer_to_account_id: Some("acct-2".to_string()),
            exchange_rate: None,
            converted_amount,
            created_at: test_date(),
            updated_at: test_date(),
        }
    }

    #[test]
    fn test_effective_amount_same_currency_ignores_converted() {
        let transfer = create_test_transfer(dec!(20), Some(dec!(999)));
        assert_eq!(effective_amount(&transfer, "USD", "USD"), dec!(20));
    }

    #[test]
    fn test_effective_amount_cross_currency_uses_converted() {
        let transfer = create_test_transfer(dec!(100), Some(dec!(92)));
        assert_eq!(effective_amount(&transfer, "USD", "EUR"), dec!(92));
    }

    #[test]
    fn test_effective_amount_cross_currency_fallback() {
        let transfer = create_test_transfer(dec!(100), None);
        assert_eq!(effective_amount(&transfer, "USD", "EUR"), dec!(100));
    }
}
