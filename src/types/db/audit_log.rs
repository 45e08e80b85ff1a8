use sea_orm::entity::prelude::*;

/// SeaORM entity for audit_logs table
///
/// Rows are only ever inserted. `before_data` and `after_data` hold JSON text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub actor_id: Option<i64>,
    pub actor_name: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub before_data: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub after_data: Option<String>,
    pub ip_address: String,
    pub client_info: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
