//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Unique indexes backing the payment dedup rules, matching the production migrations.
const LEDGER_INDEXES: [&str; 2] = [
    "CREATE UNIQUE INDEX \"idx-payment-policy_id-due_date\" ON \"payment\" (\"policy_id\", \"due_date\")",
    "CREATE UNIQUE INDEX \"idx-payment-policy_id-number_payment\" ON \"payment\" (\"policy_id\", \"number_payment\")",
];

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_ledger_tables: bool,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_ledger_tables: false,
        }
    }

    /// Add the policy ledger tables to the test database.
    ///
    /// Creates Policy, PolicyRenewal and Payment together with the unique indexes on
    /// (`policy_id`, `due_date`) and (`policy_id`, `number_payment`).
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_ledger_tables(mut self) -> Self {
        self.include_ledger_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ledger_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), ledger_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Policy)
    ///     .with_table(Payment)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Build the test context by creating all configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_ledger_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Policy),
                schema.create_table_from_entity(entity::prelude::PolicyRenewal),
                schema.create_table_from_entity(entity::prelude::Payment),
            ]);
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        if self.include_ledger_tables {
            context.with_sql(&LEDGER_INDEXES).await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
