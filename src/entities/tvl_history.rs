//! SeaORM Entity for derived TVL history
//!
//! Rows are only ever written by the aggregation query in
//! `services::tvl_history`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tvl_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub protocol_token_id: i64,
    /// Sum of account balances at the block
    #[sea_orm(column_type = "Decimal(Some((78, 0)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((78, 18)))")]
    pub amount_usd: Decimal,
    /// Timestamp of the matched price tick
    pub created_at: DateTimeWithTimeZone,
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
}

impl Related<super::protocol_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtocolToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
