//! SeaORM Entity for append-only account balance facts

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_balance_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub protocol_token_id: i64,
    pub account_id: i64,
    /// Token units held, uint256 range
    #[sea_orm(column_type = "Decimal(Some((78, 0)))")]
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    /// Hourly block index counted from the start of the generated range
    pub created_at_block: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::protocol_token::Entity",
        from = "Column::ProtocolTokenId",
        to = "super::protocol_token::Column::Id",
        on_delete = "Cascade"
    )]
    ProtocolToken,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::protocol_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtocolToken.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
