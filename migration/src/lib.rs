pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users_table;
mod m20250310_000002_create_gigs_table;
mod m20250310_000003_create_bids_table;
mod m20250312_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users_table::Migration),
            Box::new(m20250310_000002_create_gigs_table::Migration),
            Box::new(m20250310_000003_create_bids_table::Migration),
            Box::new(m20250312_000001_add_indexes::Migration),
        ]
    }
}
