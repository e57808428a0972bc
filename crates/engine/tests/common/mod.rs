use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::Engine;
use migration::MigratorTrait;

/// bcrypt's minimum cost keeps the suite fast.
pub const TEST_HASH_COST: u32 = 4;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .hash_cost(TEST_HASH_COST)
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}
