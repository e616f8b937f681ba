pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_gigs_table;
mod m20260601_000002_create_bids_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_gigs_table::Migration),
            Box::new(m20260601_000002_create_bids_table::Migration),
        ]
    }
}
