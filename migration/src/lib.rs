pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_ipam_schema;
mod m20250301_000002_create_audit_schema;

pub struct IpamMigrator;

#[async_trait::async_trait]
impl MigratorTrait for IpamMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_ipam_schema::Migration),
        ]
    }
}

pub struct AuditMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AuditMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000002_create_audit_schema::Migration),
        ]
    }
}
