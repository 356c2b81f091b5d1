//! `SeaORM` Entity for account table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 40 hex chars, no 0x prefix
    #[sea_orm(unique)]
    pub wallet_address: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_balance_history::Entity")]
    AccountBalanceHistory,
}

impl Related<super::account_balance_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountBalanceHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
