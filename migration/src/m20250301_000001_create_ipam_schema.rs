use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subnets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subnets::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Subnets::Network).string().not_null())
                    .col(ColumnDef::new(Subnets::Mask).integer().not_null())
                    .col(ColumnDef::new(Subnets::Description).string().not_null().default(""))
                    .col(ColumnDef::new(Subnets::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // (network, mask) identifies a subnet
        manager
            .create_index(
                Index::create()
                    .name("idx_subnets_network_mask")
                    .table(Subnets::Table)
                    .col(Subnets::Network)
                    .col(Subnets::Mask)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IpAddresses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IpAddresses::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(IpAddresses::Address).string().not_null().unique_key())
                    .col(ColumnDef::new(IpAddresses::AddressInt).big_integer().not_null())
                    .col(ColumnDef::new(IpAddresses::SubnetId).big_integer())
                    .col(ColumnDef::new(IpAddresses::OwnerLabel).string().not_null().default(""))
                    .col(ColumnDef::new(IpAddresses::AssignedDate).string())
                    .col(ColumnDef::new(IpAddresses::Occupied).boolean().not_null().default(false))
                    .col(ColumnDef::new(IpAddresses::Description).string().not_null().default(""))
                    .col(ColumnDef::new(IpAddresses::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ip_addresses_subnet_id")
                            .from(IpAddresses::Table, IpAddresses::SubnetId)
                            .to(Subnets::Table, Subnets::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ip_addresses_address_int")
                    .table(IpAddresses::Table)
                    .col(IpAddresses::AddressInt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ip_addresses_subnet_id")
                    .table(IpAddresses::Table)
                    .col(IpAddresses::SubnetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IpAddresses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subnets::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subnets {
    Table,
    Id,
    Network,
    Mask,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IpAddresses {
    Table,
    Id,
    Address,
    AddressInt,
    SubnetId,
    OwnerLabel,
    AssignedDate,
    Occupied,
    Description,
    CreatedAt,
}
