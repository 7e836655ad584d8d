//! Tests for the currency registry service.

#[cfg(test)]
mod tests {
    use crate::audit::{AuditLog, AuditLogRepositoryTrait, NewAuditLog};
    use crate::currencies::currencies_model::*;
    use crate::currencies::currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
    use crate::currencies::CurrencyService;
    use crate::errors::{Error, Result};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn test_date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
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

        fn add_currency(&self, code: &str) {
            let currency = Currency {
                code: code.to_string(),
                name: code.to_string(),
                symbol: code.to_string(),
                decimal_places: 2,
                is_active: true,
                exchange_rate: None,
                rate_source: None,
                notes: None,
                created_at: test_date(),
                updated_at: test_date(),
            };
            self.currencies
                .lock()
                .unwrap()
                .insert(code.to_string(), currency);
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

        fn create(&self, new_currency: NewCurrency) -> Result<Currency> {
            let code = new_currency.code.to_ascii_uppercase();
            let currency = Currency {
                code: code.clone(),
                name: new_currency.name,
                symbol: new_currency.symbol,
                decimal_places: new_currency.decimal_places,
                is_active: new_currency.is_active,
                exchange_rate: new_currency.exchange_rate,
                rate_source: new_currency.rate_source,
                notes: new_currency.notes,
                created_at: test_date(),
                updated_at: test_date(),
            };
            self.currencies
                .lock()
                .unwrap()
                .insert(code, currency.clone());
            Ok(currency)
        }

        fn update(&self, code: &str, update: CurrencyUpdate) -> Result<Currency> {
            let mut currencies = self.currencies.lock().unwrap();
            let currency = currencies
                .get_mut(code)
                .ok_or_else(|| Error::NotFound(format!("Currency {} not found", code)))?;
            currency.name = update.name;
            currency.symbol = update.symbol;
            currency.decimal_places = update.decimal_places;
            currency.is_active = update.is_active;
            currency.exchange_rate = update.exchange_rate;
            currency.rate_source = update.rate_source;
            currency.notes = update.notes;
            Ok(currency.clone())
        }
    }

    // --- Mock AuditLogRepository ---
    struct MockAuditLogRepository {
        entries: Mutex<Vec<NewAuditLog>>,
    }

    impl MockAuditLogRepository {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<NewAuditLog> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl AuditLogRepositoryTrait for MockAuditLogRepository {
        fn record(&self, entry: NewAuditLog) -> Result<AuditLog> {
            let log = AuditLog {
                id: "audit-1".to_string(),
                owner_id: entry.owner_id.clone(),
                action: entry.action.clone(),
                model_type: entry.model_type.clone(),
                model_id: entry.model_id.clone(),
                old_values: entry.old_values.clone(),
                new_values: entry.new_values.clone(),
                ip_address: entry.ip_address.clone(),
                user_agent: entry.user_agent.clone(),
                description: entry.description.clone(),
                created_at: test_date(),
            };
            self.entries.lock().unwrap().push(entry);
            Ok(log)
        }

        fn list_for_model(&self, _model_type: &str, _model_id: &str) -> Result<Vec<AuditLog>> {
            unimplemented!()
        }

        fn list_for_owner(&self, _owner_id: &str) -> Result<Vec<AuditLog>> {
            unimplemented!()
        }
    }

    fn setup() -> (CurrencyService, Arc<MockCurrencyRepository>, Arc<MockAuditLogRepository>) {
        let repository = Arc::new(MockCurrencyRepository::new());
        let audit = Arc::new(MockAuditLogRepository::new());
        let service = CurrencyService::new(repository.clone(), audit.clone());
        (service, repository, audit)
    }

    fn create_test_new_currency(code: &str) -> NewCurrency {
        NewCurrency {
            code: code.to_string(),
            name: "Swiss Franc".to_string(),
            symbol: "CHF".to_string(),
            decimal_places: 2,
            is_active: true,
            exchange_rate: Some(dec!(0.88)),
            rate_source: Some("manual".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_get_currency_uppercases_code() {
        let (service, repository, _) = setup();
        repository.add_currency("USD");

        let currency = service.get_currency("usd").unwrap();
        assert_eq!(currency.code, "USD");
    }

    #[tokio::test]
    async fn test_create_currency_validates_code() {
        let (service, _, _) = setup();

        let result = service
            .create_currency("admin", create_test_new_currency("FRANC"))
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_currency_records_audit() {
        let (service, _, audit) = setup();

        let created = service
            .create_currency("admin", create_test_new_currency("CHF"))
            .await
            .unwrap();
        assert_eq!(created.exchange_rate, Some(dec!(0.88)));

        let entries = audit.recorded();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "created");
        assert_eq!(entries[0].model_type, "Currency");
        assert_eq!(entries[0].model_id, "CHF");
    }

    #[tokio::test]
    async fn test_update_currency_records_old_and_new_values() {
        let (service, repository, audit) = setup();
        repository.add_currency("EUR");

        let update = CurrencyUpdate {
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            decimal_places: 2,
            is_active: false,
            exchange_rate: Some(dec!(0.90)),
            rate_source: Some("manual".to_string()),
            notes: None,
        };
        let updated = service.update_currency("admin", "eur", update).await.unwrap();

        assert!(!updated.is_active);
        assert_eq!(updated.exchange_rate, Some(dec!(0.90)));

        let entries = audit.recorded();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "updated");
        assert!(entries[0].old_values.is_some());
        assert!(entries[0].new_values.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_currency_is_not_found() {
        let (service, _, _) = setup();

        let update = CurrencyUpdate {
            name: "Euro".to_string(),
            symbol: "€".to_string(),
            decimal_places: 2,
            is_active: true,
            exchange_rate: None,
            rate_source: None,
            notes: None,
        };
        let result = service.update_currency("admin", "EUR", update).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_active_currencies_filters() {
        let (service, repository, _) = setup();
        repository.add_currency("USD");
        repository.add_currency("EUR");
        repository
            .currencies
            .lock()
            .unwrap()
            .get_mut("EUR")
            .unwrap()
            .is_active = false;

        let active = service.list_active_currencies().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "USD");
    }
}
