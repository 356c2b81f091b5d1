//! `SeaORM` Entity for token table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub decimals: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::protocol_token::Entity")]
    ProtocolToken,
    #[sea_orm(has_many = "super::token_price::Entity")]
    TokenPrice,
}

impl Related<super::protocol_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtocolToken.def()
    }
}

impl Related<super::token_price::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TokenPrice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
