//! Options of the two shell commands, parsed from `--flag value` strings.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{GeneratorError, Result};

pub const DEFAULT_ACCOUNTS: usize = 100;
pub const DEFAULT_DEPOSIT: i64 = 2_000_000;
pub const DEFAULT_WINDOW_DAYS: i64 = 5;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts `YYYY-MM-DD` or an ISO datetime without offset; values are read as UTC.
fn parse_datetime(value: &str) -> std::result::Result<NaiveDateTime, String> {
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| format!("invalid date '{}'", value))
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "generate_protocol_data")]
struct GenerateProtocolDataArgs {
    /// Number of accounts using the protocol
    #[arg(long)]
    accounts: Option<usize>,

    /// Activation date of the protocol (default: now - 5 days)
    #[arg(long, value_parser = parse_datetime)]
    start: Option<NaiveDateTime>,

    /// Deactivation date of the protocol (default: now)
    #[arg(long, value_parser = parse_datetime)]
    end: Option<NaiveDateTime>,

    /// Last deposit sum in USD
    #[arg(long)]
    deposit: Option<Decimal>,
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "get_current_deposit")]
struct GetCurrentDepositArgs {
    /// Id of the requested protocol
    #[arg(long)]
    protocol: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateProtocolDataOptions {
    pub accounts: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub deposit: Decimal,
}

impl GenerateProtocolDataOptions {
    /// `now` supplies the defaults for `--start` and `--end`.
    pub fn parse_args(arg: &str, now: NaiveDateTime) -> Result<Self> {
        let args = GenerateProtocolDataArgs::try_parse_from(arg.split_whitespace())
            .map_err(|e| GeneratorError::InvalidOptions(e.to_string()))?;

        let options = Self {
            accounts: args.accounts.unwrap_or(DEFAULT_ACCOUNTS),
            start: args
                .start
                .unwrap_or(now - Duration::days(DEFAULT_WINDOW_DAYS)),
            end: args.end.unwrap_or(now),
            deposit: args.deposit.unwrap_or(Decimal::from(DEFAULT_DEPOSIT)),
        };

        if options.end < options.start {
            return Err(GeneratorError::InvalidTimeRange);
        }
        if options.deposit.is_sign_negative() {
            return Err(GeneratorError::InvalidOptions(
                "deposit cannot be negative".to_string(),
            ));
        }

        Ok(options)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetCurrentDepositOptions {
    pub protocol: i64,
}

impl GetCurrentDepositOptions {
    pub fn parse_args(arg: &str) -> Result<Self> {
        let args = GetCurrentDepositArgs::try_parse_from(arg.split_whitespace())
            .map_err(|e| GeneratorError::InvalidOptions(e.to_string()))?;

        Ok(Self {
            protocol: args.protocol,
        })
    }
}
