//! Shared test utilities for integration tests
//!
//! - `TestDatabase`: PostgreSQL container with a caller-supplied schema (feature: "postgres")
//! - `TestDataBuilder`: deterministic names and emails derived from the test name
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new("CREATE TABLE users (id UUID PRIMARY KEY);").await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let email = builder.email("alice");
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic values
///
/// Tests sharing one container stay isolated by deriving their values from their own name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A display name such as `"test-alice-1234"`.
    pub fn name(&self, prefix: &str) -> String {
        format!("test-{}-{}", prefix, self.seed)
    }

    /// An address that passes email validation, such as `"alice-1234@example.com"`.
    pub fn email(&self, local: &str) -> String {
        format!("{}-{}@example.com", local, self.seed)
    }
}
