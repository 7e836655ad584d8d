//! Tests for Currency domain models.

#[cfg(test)]
mod tests {
    use crate::currencies::currencies_model::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    // ============================================================================
    // Currency Code Validation Tests
    // ============================================================================

    #[test]
    fn test_validate_currency_code_accepts_three_letters() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("eur").is_ok());
        assert!(validate_currency_code("Jpy").is_ok());
    }

    #[test]
    fn test_validate_currency_code_rejects_wrong_length() {
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("USDT").is_err());
        assert!(validate_currency_code("").is_err());
    }

    #[test]
    fn test_validate_currency_code_rejects_non_letters() {
        assert!(validate_currency_code("US1").is_err());
        assert!(validate_currency_code("U S").is_err());
        assert!(validate_currency_code("U$D").is_err());
    }

    // ============================================================================
    // NewCurrency Validation Tests
    // ============================================================================

    fn create_test_new_currency() -> NewCurrency {
        NewCurrency {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            decimal_places: 2,
            is_active: true,
            exchange_rate: None,
            rate_source: None,
            notes: None,
        }
    }

    #[test]
    fn test_new_currency_validate_accepts_valid() {
        assert!(create_test_new_currency().validate().is_ok());
    }

    #[test]
    fn test_new_currency_validate_rejects_bad_code() {
        let mut currency = create_test_new_currency();
        currency.code = "DOLLAR".to_string();
        assert!(matches!(
            currency.validate(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_new_currency_validate_rejects_empty_name() {
        let mut currency = create_test_new_currency();
        currency.name = "   ".to_string();
        assert!(currency.validate().is_err());
    }

    #[test]
    fn test_new_currency_validate_rejects_empty_symbol() {
        let mut currency = create_test_new_currency();
        currency.symbol = String::new();
        assert!(currency.validate().is_err());
    }

    #[test]
    fn test_new_currency_validate_decimal_places_bounds() {
        let mut currency = create_test_new_currency();

        currency.decimal_places = 0;
        assert!(currency.validate().is_ok());

        currency.decimal_places = 8;
        assert!(currency.validate().is_ok());

        currency.decimal_places = -1;
        assert!(currency.validate().is_err());

        currency.decimal_places = 9;
        assert!(currency.validate().is_err());
    }

    #[test]
    fn test_currency_update_validate_rejects_bad_decimal_places() {
        let update = CurrencyUpdate {
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            decimal_places: 12,
            is_active: true,
            exchange_rate: None,
            rate_source: None,
            notes: None,
        };
        assert!(update.validate().is_err());
    }

    // ============================================================================
    // Conversion Tests
    // ============================================================================

    #[test]
    fn test_new_currency_conversion_uppercases_code() {
        let mut currency = create_test_new_currency();
        currency.code = "usd".to_string();

        let db: CurrencyDB = currency.into();
        assert_eq!(db.code, "USD");
    }

    #[test]
    fn test_new_currency_conversion_serializes_rate_as_string() {
        let mut currency = create_test_new_currency();
        currency.exchange_rate = Some(dec!(3.75));

        let db: CurrencyDB = currency.into();
        assert_eq!(db.exchange_rate.as_deref(), Some("3.75"));
    }

    #[test]
    fn test_currency_db_conversion_parses_rate() {
        let mut currency = create_test_new_currency();
        currency.exchange_rate = Some(dec!(0.85));

        let db: CurrencyDB = currency.into();
        let domain: Currency = db.into();
        assert_eq!(domain.exchange_rate, Some(dec!(0.85)));
    }

    #[test]
    fn test_currency_db_conversion_handles_missing_rate() {
        let db: CurrencyDB = create_test_new_currency().into();
        let domain: Currency = db.into();
        assert_eq!(domain.exchange_rate, None);
    }
}
