//! Thin helpers over the relational store.
//!
//! Free functions generic over `ConnectionTrait`, so one generation run can
//! pass its `DatabaseTransaction` through every write.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};
use tracing::debug;

use crate::entities::{prelude::ProtocolToken, protocol_token};
use crate::error::Result;

/// Bulk insert in chunks of `chunk_size` rows so a statement stays under the
/// Postgres bind parameter limit. Returns the number of inserted rows.
pub async fn insert_all<C, A>(conn: &C, models: Vec<A>, chunk_size: usize) -> Result<u64>
where
    C: ConnectionTrait,
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    let total = models.len();
    let mut inserted = 0;
    let mut models = models.into_iter();

    loop {
        let chunk: Vec<A> = models.by_ref().take(chunk_size.max(1)).collect();
        if chunk.is_empty() {
            break;
        }

        inserted += A::Entity::insert_many(chunk)
            .exec_without_returning(conn)
            .await?;
    }

    debug!(total, inserted, "Bulk insert complete");
    Ok(inserted)
}

pub async fn get_protocol_tokens_by_protocol_id<C: ConnectionTrait>(
    conn: &C,
    protocol_id: i64,
) -> Result<Vec<protocol_token::Model>> {
    let tokens = ProtocolToken::find()
        .filter(protocol_token::Column::ProtocolId.eq(protocol_id))
        .order_by_asc(protocol_token::Column::Id)
        .all(conn)
        .await?;

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::token_price;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn price(token_id: i64) -> token_price::ActiveModel {
        token_price::ActiveModel {
            token_id: Set(token_id),
            usd_price: Set(dec!(1.5)),
            created_at: Set(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap().fixed_offset()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_all_chunks_statements() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let inserted = insert_all(&db, vec![price(1), price(2), price(3)], 2)
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_all_empty_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let inserted = insert_all::<_, token_price::ActiveModel>(&db, vec![], 10)
            .await
            .unwrap();
        assert_eq!(inserted, 0);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_get_protocol_tokens_by_protocol_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                protocol_token::Model {
                    id: 1,
                    protocol_id: 9,
                    token_id: 11,
                },
                protocol_token::Model {
                    id: 2,
                    protocol_id: 9,
                    token_id: 12,
                },
            ]])
            .into_connection();

        let tokens = get_protocol_tokens_by_protocol_id(&db, 9).await.unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.protocol_id == 9));
    }
}
