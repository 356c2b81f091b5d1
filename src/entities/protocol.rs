//! `SeaORM` Entity for protocol table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "protocol")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::protocol_token::Entity")]
    ProtocolToken,
}

impl Related<super::protocol_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProtocolToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
