//! Currency codes and base-currency normalization.
//!
//! The [`Normalizer`] converts a `(price, currency, exchange rate)` triple
//! into an amount in the configured base currency. It is a pure function
//! over exact decimals: costs feed financial reporting, so binary floating
//! point is never used.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of currencies a purchase may be priced in.
///
/// Extending the set means adding a variant here; callers treat the set as
/// data (parse with [`FromStr`], enumerate with [`Currency::ALL`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish złoty.
    Pln,
    /// Euro.
    Eur,
    /// United States dollar.
    Usd,
    /// Czech koruna.
    Czk,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 4] = [Self::Pln, Self::Eur, Self::Usd, Self::Czk];

    /// The ISO-4217 code for this currency.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pln => "PLN",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Czk => "CZK",
        }
    }
}

impl FromStr for Currency {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PLN" => Ok(Self::Pln),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "CZK" => Ok(Self::Czk),
            _ => Err(NormalizeError::InvalidCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a price cannot be normalized into the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The currency code is outside the supported set.
    #[error("unsupported currency: {0}")]
    InvalidCurrency(String),
    /// A non-base currency was given a non-positive exchange rate.
    #[error("exchange rate for {currency} must be positive, got {rate}")]
    InvalidRate {
        /// The currency the rate was supplied for.
        currency: Currency,
        /// The rejected rate.
        rate: Decimal,
    },
    /// The price is not positive.
    #[error("price must be positive, got {0}")]
    InvalidPrice(Decimal),
}

/// Converts prices in any supported currency into the base currency.
///
/// Exchange rates are caller-supplied per purchase; the normalizer validates
/// them but never looks rates up. When the purchase currency *is* the base
/// currency the rate is forced to exactly 1 regardless of caller input.
///
/// # Examples
///
/// ```
/// use spoolstock_core::{Currency, Normalizer};
/// use rust_decimal_macros::dec;
///
/// let fx = Normalizer::default(); // base PLN
///
/// assert_eq!(
///     fx.normalize(dec!(100), Currency::Eur, dec!(4.30)).unwrap(),
///     dec!(430.00),
/// );
///
/// // Base currency: the rate the caller passes is irrelevant
/// assert_eq!(
///     fx.normalize(dec!(100), Currency::Pln, dec!(9.99)).unwrap(),
///     dec!(100),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalizer {
    base: Currency,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Currency::Pln)
    }
}

impl Normalizer {
    /// Create a normalizer with the given base currency.
    #[must_use]
    pub const fn new(base: Currency) -> Self {
        Self { base }
    }

    /// The base currency everything is normalized into.
    #[must_use]
    pub const fn base(self) -> Currency {
        self.base
    }

    /// Resolve the effective exchange rate for a purchase.
    ///
    /// Returns exactly 1 when `currency` is the base currency; otherwise the
    /// caller-supplied rate, which must be positive.
    pub fn effective_rate(
        self,
        currency: Currency,
        rate: Decimal,
    ) -> Result<Decimal, NormalizeError> {
        if currency == self.base {
            return Ok(Decimal::ONE);
        }
        if rate <= Decimal::ZERO {
            return Err(NormalizeError::InvalidRate { currency, rate });
        }
        Ok(rate)
    }

    /// Convert a price into the base currency.
    ///
    /// Pure: no side effects, exact decimal multiplication.
    pub fn normalize(
        self,
        price: Decimal,
        currency: Currency,
        rate: Decimal,
    ) -> Result<Decimal, NormalizeError> {
        if price <= Decimal::ZERO {
            return Err(NormalizeError::InvalidPrice(price));
        }
        let rate = self.effective_rate(currency, rate)?;
        Ok(price * rate)
    }
}
