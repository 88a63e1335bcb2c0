pub use sea_orm_migration::prelude::*;

mod m20251017_000001_policy;
mod m20251017_000002_policy_renewal;
mod m20251017_000003_payment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_policy::Migration),
            Box::new(m20251017_000002_policy_renewal::Migration),
            Box::new(m20251017_000003_payment::Migration),
        ]
    }
}
