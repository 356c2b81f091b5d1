//! TVL aggregation over stored balance and price facts.
//!
//! For every (protocol_token, block) the balances of all accounts that have
//! a row at that block are summed and valued at the earliest price tick of
//! the token inside `[balance timestamp, balance timestamp + window]`.
//! Pairs without a tick in the window produce no TVL row at all; they are
//! neither zero-filled nor forward-filled.
//!
//! Like `services::store`, these are free functions over `ConnectionTrait`
//! so aggregation runs inside the generator's transaction.

use chrono::Duration;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement};
use tracing::{debug, info};

use crate::error::Result;

const DELETE_HISTORY_SQL: &str = r#"
    DELETE FROM tvl_history tvl
    USING protocol_token pt
    WHERE
        tvl.protocol_token_id = pt.id
        AND pt.protocol_id = $1
"#;

const CALCULATE_HISTORY_SQL: &str = r#"
    INSERT INTO tvl_history (
        protocol_token_id,
        created_at_block,
        amount,
        amount_usd,
        created_at
    )
    SELECT
        abh.protocol_token_id,
        abh.created_at_block,
        SUM(abh.amount) AS amount,
        SUM(abh.amount) * MIN(tick.usd_price) AS amount_usd,
        MIN(tick.created_at) AS created_at
    FROM account_balance_history abh
    JOIN protocol_token pt ON abh.protocol_token_id = pt.id
    JOIN LATERAL (
        SELECT tp.usd_price, tp.created_at
        FROM token_price tp
        WHERE
            tp.token_id = pt.token_id
            AND tp.created_at >= abh.created_at
            AND tp.created_at <= abh.created_at + make_interval(secs => $2)
        ORDER BY tp.created_at
        LIMIT 1
    ) tick ON TRUE
    WHERE pt.protocol_id = $1
    GROUP BY
        abh.protocol_token_id,
        abh.created_at_block
"#;

const GET_CURRENT_DEPOSIT_SQL: &str = r#"
    WITH block AS (
        SELECT MAX(tvl.created_at_block) AS max_block_num
        FROM tvl_history tvl
        JOIN protocol_token pt ON tvl.protocol_token_id = pt.id
        WHERE pt.protocol_id = $1
    )
    SELECT SUM(tvl.amount_usd) AS deposit
    FROM tvl_history tvl
    JOIN protocol_token pt ON tvl.protocol_token_id = pt.id
    WHERE
        pt.protocol_id = $1
        AND tvl.created_at_block = (SELECT max_block_num FROM block)
"#;

#[derive(Debug, FromQueryResult)]
struct CurrentDeposit {
    deposit: Option<Decimal>,
}

/// Replace the protocol's TVL history with a fresh aggregation.
///
/// Existing rows are deleted first, so running this twice leaves one row
/// per (protocol_token, block). Run it inside the caller's transaction to
/// keep delete and insert atomic. Returns the number of TVL rows written.
pub async fn calculate_history_by_protocol_id<C: ConnectionTrait>(
    conn: &C,
    protocol_id: i64,
    price_match_window: Duration,
) -> Result<u64> {
    let deleted = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            DELETE_HISTORY_SQL,
            [protocol_id.into()],
        ))
        .await?
        .rows_affected();

    if deleted > 0 {
        debug!(protocol_id, deleted, "Dropped previous TVL history");
    }

    let window_secs = price_match_window.num_milliseconds() as f64 / 1000.0;
    let inserted = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            CALCULATE_HISTORY_SQL,
            [protocol_id.into(), window_secs.into()],
        ))
        .await?
        .rows_affected();

    info!(protocol_id, inserted, window_secs, "TVL history calculated");
    Ok(inserted)
}

/// Sum of `amount_usd` at the protocol's latest TVL block.
///
/// `None` means the protocol is unknown or has no TVL rows.
pub async fn get_current_protocol_deposit<C: ConnectionTrait>(
    conn: &C,
    protocol_id: i64,
) -> Result<Option<Decimal>> {
    let row = CurrentDeposit::find_by_statement(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        GET_CURRENT_DEPOSIT_SQL,
        [protocol_id.into()],
    ))
    .one(conn)
    .await?;

    Ok(row.and_then(|r| r.deposit))
}
