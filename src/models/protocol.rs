//! Unsaved protocol graph produced by the entity factory and the synthesizers.
//!
//! Entities become rows in two phases: protocol and tokens are staged and
//! inserted first, then balance and price facts are generated against the
//! ids the store assigned.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::Serialize;

use crate::entities::{account, account_balance_history, protocol, token, token_price};

#[derive(Debug, Clone, Serialize)]
pub struct NewProtocol {
    pub name: String,
    pub tokens: Vec<NewToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewToken {
    pub name: String,
    pub symbol: String,
    pub decimals: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub wallet_address: String,
    pub balance_history: Vec<BalanceFact>,
}

/// Point-in-time holding of one protocol token by the owning account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceFact {
    pub protocol_token_id: i64,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub created_at_block: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceFact {
    pub token_id: i64,
    pub usd_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl NewProtocol {
    pub fn to_active_model(&self) -> protocol::ActiveModel {
        protocol::ActiveModel {
            name: Set(self.name.clone()),
            ..Default::default()
        }
    }
}

impl NewToken {
    pub fn to_active_model(&self) -> token::ActiveModel {
        token::ActiveModel {
            name: Set(self.name.clone()),
            symbol: Set(self.symbol.clone()),
            decimals: Set(self.decimals),
            ..Default::default()
        }
    }
}

impl NewAccount {
    pub fn new(wallet_address: String) -> Self {
        Self {
            wallet_address,
            balance_history: Vec::new(),
        }
    }

    pub fn to_active_model(&self) -> account::ActiveModel {
        account::ActiveModel {
            wallet_address: Set(self.wallet_address.clone()),
            ..Default::default()
        }
    }
}

impl BalanceFact {
    pub fn to_active_model(&self, account_id: i64) -> account_balance_history::ActiveModel {
        account_balance_history::ActiveModel {
            protocol_token_id: Set(self.protocol_token_id),
            account_id: Set(account_id),
            amount: Set(self.amount),
            created_at: Set(self.created_at.fixed_offset()),
            created_at_block: Set(self.created_at_block),
            ..Default::default()
        }
    }
}

impl PriceFact {
    pub fn to_active_model(&self) -> token_price::ActiveModel {
        token_price::ActiveModel {
            token_id: Set(self.token_id),
            usd_price: Set(self.usd_price),
            created_at: Set(self.created_at.fixed_offset()),
            ..Default::default()
        }
    }
}
