use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AuditLogs::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AuditLogs::ActorId).big_integer())
                    .col(ColumnDef::new(AuditLogs::ActorName).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityType).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityId).big_integer())
                    .col(ColumnDef::new(AuditLogs::BeforeData).text())
                    .col(ColumnDef::new(AuditLogs::AfterData).text())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string().not_null())
                    .col(ColumnDef::new(AuditLogs::ClientInfo).string().not_null())
                    .col(ColumnDef::new(AuditLogs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_action")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::Action)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_entity_type")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::EntityType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_created_at")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    ActorId,
    ActorName,
    Action,
    EntityType,
    EntityId,
    BeforeData,
    AfterData,
    IpAddress,
    ClientInfo,
    CreatedAt,
}
