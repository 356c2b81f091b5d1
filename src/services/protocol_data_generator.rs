//! Protocol data generation pipeline
//!
//! One run, one transaction:
//! 1. stage protocol + tokens and insert them to obtain ids
//! 2. synthesize balances and prices against those ids
//! 3. bulk insert accounts, balance facts and price ticks
//! 4. aggregate TVL history from the stored facts
//!
//! Any error rolls the whole run back.

use rand::Rng;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{error, info};

use crate::config::{DepositTarget, GeneratorConfig};
use crate::entities::protocol_token;
use crate::error::Result;
use crate::models::command::GenerateProtocolDataOptions;
use crate::models::protocol::{NewAccount, NewProtocol};
use crate::services::balance_history::{generate_balance_history, BalanceHistoryParams};
use crate::services::entity_factory::EntityFactory;
use crate::services::price_history::generate_token_prices;
use crate::services::store::{get_protocol_tokens_by_protocol_id, insert_all};
use crate::services::tvl_history::calculate_history_by_protocol_id;

pub struct ProtocolDataGenerator<R: Rng> {
    factory: EntityFactory,
    rng: R,
}

impl<R: Rng + Send> ProtocolDataGenerator<R> {
    /// The token count is fixed here, once per generator.
    pub fn new(config: GeneratorConfig, mut rng: R) -> Self {
        let factory = EntityFactory::new(config, &mut rng);
        Self { factory, rng }
    }

    pub fn factory(&self) -> &EntityFactory {
        &self.factory
    }

    /// Generate and persist a full protocol history, returning the protocol id.
    pub async fn generate_all(
        &mut self,
        db: &DatabaseConnection,
        options: &GenerateProtocolDataOptions,
    ) -> Result<i64> {
        let txn = db.begin().await?;

        match self.generate_in(&txn, options).await {
            Ok(protocol_id) => {
                txn.commit().await?;
                info!(protocol_id, "Protocol data committed");
                Ok(protocol_id)
            }
            Err(e) => {
                error!(error = %e, "Protocol data generation failed, rolling back");
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn generate_in<C: ConnectionTrait>(
        &mut self,
        conn: &C,
        options: &GenerateProtocolDataOptions,
    ) -> Result<i64> {
        let config = self.factory.config().clone();
        let start = options.start.and_utc();
        let end = options.end.and_utc();

        let protocol = self.factory.generate_protocol_with_tokens(&mut self.rng);
        let protocol_id = insert_protocol(conn, &protocol).await?;
        let protocol_tokens = get_protocol_tokens_by_protocol_id(conn, protocol_id).await?;

        info!(
            protocol_id,
            name = %protocol.name,
            tokens = protocol_tokens.len(),
            "Protocol staged"
        );

        let mut accounts = self.factory.generate_accounts(options.accounts, &mut self.rng);
        let target = DepositTarget {
            deposit: options.deposit,
            accounts: accounts.len(),
            tokens_per_account: config.tokens_per_account(self.factory.token_number()),
            final_token_amount: config.final_token_amount,
        };

        generate_balance_history(
            &config,
            &BalanceHistoryParams {
                protocol_tokens: &protocol_tokens,
                tokens_per_account: target.tokens_per_account,
                final_token_amount: target.final_token_amount,
                start,
                end,
            },
            &mut accounts,
            &mut self.rng,
        )?;

        let token_ids: Vec<i64> = protocol_tokens.iter().map(|pt| pt.token_id).collect();
        let prices = generate_token_prices(
            &config,
            &token_ids,
            target.final_token_price(),
            start,
            end,
            &mut self.rng,
        )?;

        let balances = insert_accounts(conn, &accounts, config.insert_chunk_size).await?;
        let price_rows = insert_all(
            conn,
            prices.iter().map(|p| p.to_active_model()).collect(),
            config.insert_chunk_size,
        )
        .await?;

        info!(
            protocol_id,
            accounts = accounts.len(),
            balances,
            price_rows,
            final_token_price = %target.final_token_price(),
            "Facts persisted"
        );

        calculate_history_by_protocol_id(conn, protocol_id, config.price_match_window).await?;

        Ok(protocol_id)
    }
}

async fn insert_protocol<C: ConnectionTrait>(conn: &C, protocol: &NewProtocol) -> Result<i64> {
    let protocol_model = protocol.to_active_model().insert(conn).await?;

    for token in &protocol.tokens {
        let token_model = token.to_active_model().insert(conn).await?;

        protocol_token::ActiveModel {
            protocol_id: Set(protocol_model.id),
            token_id: Set(token_model.id),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    Ok(protocol_model.id)
}

/// Inserts accounts one by one for their ids, then their balance facts in bulk.
async fn insert_accounts<C: ConnectionTrait>(
    conn: &C,
    accounts: &[NewAccount],
    chunk_size: usize,
) -> Result<u64> {
    let mut balances = Vec::new();

    for account in accounts {
        let account_model = account.to_active_model().insert(conn).await?;
        balances.extend(
            account
                .balance_history
                .iter()
                .map(|fact| fact.to_active_model(account_model.id)),
        );
    }

    insert_all(conn, balances, chunk_size).await
}
