use sea_orm::entity::prelude::*;
use serde::Serialize;

/// SeaORM entity for ip_addresses table
///
/// `address_int` mirrors `address` as its unsigned 32-bit value and is what
/// range queries and ordering use.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "ip_addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub address: String,
    pub address_int: i64,
    pub subnet_id: Option<i64>,
    pub owner_label: String,
    pub assigned_date: Option<String>,
    pub occupied: bool,
    pub description: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subnet::Entity",
        from = "Column::SubnetId",
        to = "super::subnet::Column::Id",
        on_delete = "SetNull"
    )]
    Subnet,
}

impl Related<super::subnet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subnet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
