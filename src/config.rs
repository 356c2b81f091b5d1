//! Process settings and generator tunables.

use chrono::Duration;
use rust_decimal::Decimal;
use std::env;
use std::ops::RangeInclusive;

use crate::error::{GeneratorError, Result};

/// Database settings read from the environment (`.env` is loaded first).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
}

impl Settings {
    /// `DATABASE_URL` wins; otherwise the URL is assembled from
    /// `PG_HOST`, `PG_PORT`, `PG_DB`, `PG_USER` and `PG_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        if let Ok(database_url) = env::var("DATABASE_URL") {
            return Ok(Self { database_url });
        }

        let var = |name: &str| {
            env::var(name).map_err(|_| GeneratorError::Config(format!("{} must be set", name)))
        };

        let port: u16 = var("PG_PORT")?
            .parse()
            .map_err(|e| GeneratorError::Config(format!("PG_PORT is not a port: {}", e)))?;

        Ok(Self {
            database_url: postgres_url(
                &var("PG_USER")?,
                &var("PG_PASSWORD")?,
                &var("PG_HOST")?,
                port,
                &var("PG_DB")?,
            ),
        })
    }
}

fn postgres_url(user: &str, password: &str, host: &str, port: u16, db: &str) -> String {
    format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, db)
}

/// Every tunable of the synthesis engine and the TVL join.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Tokens per protocol, drawn once per generator instance
    pub token_count: RangeInclusive<usize>,
    pub protocol_name_len: RangeInclusive<usize>,
    pub token_name_len: RangeInclusive<usize>,
    pub token_symbol_len: RangeInclusive<usize>,
    pub token_decimals: RangeInclusive<i32>,
    /// Share of all protocol tokens each account holds, in percent (rounded up)
    pub tokens_per_account_pct: usize,
    /// Share of accounts that receive a new balance row per earlier block, in percent (rounded up)
    pub changing_accounts_pct: usize,
    /// Populations smaller than this change entirely at every block
    pub full_coverage_below: usize,
    pub final_token_amount: Decimal,
    pub balance_drift_pct: u32,
    pub price_drift_pct: u32,
    pub block_length: Duration,
    pub tick_length: Duration,
    /// Forward window in which a balance snapshot may match a price tick
    pub price_match_window: Duration,
    pub insert_chunk_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            token_count: 10..=50,
            protocol_name_len: 5..=5,
            token_name_len: 4..=7,
            token_symbol_len: 3..=4,
            token_decimals: 1..=20,
            tokens_per_account_pct: 2,
            changing_accounts_pct: 5,
            full_coverage_below: 20,
            final_token_amount: Decimal::from(100),
            balance_drift_pct: 15,
            price_drift_pct: 15,
            block_length: Duration::hours(1),
            tick_length: Duration::minutes(10),
            price_match_window: Duration::hours(1),
            insert_chunk_size: 1000,
        }
    }
}

impl GeneratorConfig {
    pub fn tokens_per_account(&self, token_count: usize) -> usize {
        (token_count * self.tokens_per_account_pct).div_ceil(100)
    }

    pub fn changing_accounts(&self, account_count: usize) -> usize {
        if account_count < self.full_coverage_below {
            account_count
        } else {
            (account_count * self.changing_accounts_pct).div_ceil(100)
        }
    }
}

/// The single USD figure both synthesizers are anchored to.
///
/// At the end timestamp every account holds `final_token_amount` of each of
/// its `tokens_per_account` tokens, all priced at `final_token_price()`, so the
/// protocol's TVL equals `deposit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositTarget {
    pub deposit: Decimal,
    pub accounts: usize,
    pub tokens_per_account: usize,
    pub final_token_amount: Decimal,
}

impl DepositTarget {
    pub fn final_token_price(&self) -> Decimal {
        let units = Decimal::from(self.accounts)
            * Decimal::from(self.tokens_per_account)
            * self.final_token_amount;

        if units.is_zero() {
            Decimal::ZERO
        } else {
            self.deposit / units
        }
    }
}
