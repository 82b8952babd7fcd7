/// Common test utilities and fixtures
use anyhow::Result;
use std::sync::Arc;
use warden_storage::Database;

/// Create a test database with migrations applied
pub async fn create_test_database() -> Result<Arc<Database>> {
    // In-memory database for tests
    let db = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(db))
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_NAME: &str = "Test User";
    pub const TEST_EMAIL: &str = "testuser@example.com";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
}
