//! Error type shared by the generator, the store helpers and the shell.

use rust_decimal::Decimal;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("end date cannot be before start date")]
    InvalidTimeRange,

    #[error("cannot sample {requested} items from a population of {population}")]
    SampleTooLarge { requested: usize, population: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("there is no such protocol ({0}). Price cannot be defined.")]
    ProtocolNotFound(i64),

    #[error("arithmetic overflow perturbing {value} by factor {factor}")]
    ArithmeticOverflow { value: Decimal, factor: Decimal },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
