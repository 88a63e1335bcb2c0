//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context owns an
//! in-memory SQLite database with whatever tables the builder created.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{error::TestError, fixtures::ledger::LedgerFixtures};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// ```ignore
/// let test = TestBuilder::new().with_ledger_tables().build().await?;
///
/// let policy = test.ledger().insert_policy(PolicyFixture::default()).await?;
/// test.ledger().insert_payment(policy.id, 1, date(2025, 1, 15), Decimal::new(110000, 2)).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Create a new test context backed by a fresh in-memory SQLite database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with an empty database
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::DbErr)` - Table creation failed
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Run raw SQL statements, used for indexes entities cannot express.
    pub(crate) async fn with_sql(&self, stmts: &[&str]) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute_unprepared(stmt).await?;
        }

        Ok(())
    }

    /// Access policy ledger fixture helpers.
    pub fn ledger(&self) -> LedgerFixtures<'_> {
        LedgerFixtures::new(&self.db)
    }
}
