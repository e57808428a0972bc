pub use sea_orm_migration::prelude::*;

mod m20250601_000000_init;
mod m20250915_120000_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000000_init::Migration),
            Box::new(m20250915_120000_sessions::Migration),
        ]
    }
}
