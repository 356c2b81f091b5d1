//! `SeaORM` Entity for the protocol <-> token join table
//!
//! Balances and TVL are tracked against this row, not the raw token.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "protocol_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub protocol_id: i64,
    pub token_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::protocol::Entity",
        from = "Column::ProtocolId",
        to = "super::protocol::Column::Id",
        on_delete = "Cascade"
    )]
    Protocol,
    #[sea_orm(
        belongs_to = "super::token::Entity",
        from = "Column::TokenId",
        to = "super::token::Column::Id",
        on_delete = "Cascade"
    )]
    Token,
    #[sea_orm(has_many = "super::account_balance_history::Entity")]
    AccountBalanceHistory,
    #[sea_orm(has_many = "super::tvl_history::Entity")]
    TvlHistory,
}

impl Related<super::protocol::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Protocol.def()
    }
}

impl Related<super::token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Token.def()
    }
}

impl Related<super::account_balance_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountBalanceHistory.def()
    }
}

impl Related<super::tvl_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvlHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
