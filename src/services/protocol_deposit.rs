//! Current deposit (TVL) lookup for a protocol.

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use tracing::warn;

use crate::error::{GeneratorError, Result};
use crate::models::command::GetCurrentDepositOptions;
use crate::services::tvl_history::get_current_protocol_deposit;

pub async fn get_protocol_deposit<C: ConnectionTrait>(
    conn: &C,
    options: &GetCurrentDepositOptions,
) -> Result<Decimal> {
    match get_current_protocol_deposit(conn, options.protocol).await? {
        Some(deposit) => Ok(deposit),
        None => {
            warn!(protocol_id = options.protocol, "No TVL history for protocol");
            Err(GeneratorError::ProtocolNotFound(options.protocol))
        }
    }
}
