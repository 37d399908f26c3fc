//! Ledger configuration.

use serde::{Deserialize, Serialize};

use spoolstock_core::Currency;

/// Configuration for a [`crate::Warehouse`].
///
/// The base currency is an explicit setting rather than a hardcoded field
/// name, so the same ledger works for deployments reporting in a different
/// currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerConfig {
    /// The currency all costs are normalized into.
    pub base_currency: Currency,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_currency: Currency::Pln,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_is_pln() {
        assert_eq!(LedgerConfig::default().base_currency, Currency::Pln);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: LedgerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LedgerConfig::default());

        let config: LedgerConfig =
            serde_json::from_str(r#"{"baseCurrency": "EUR"}"#).unwrap();
        assert_eq!(config.base_currency, Currency::Eur);
    }
}
