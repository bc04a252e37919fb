//! # Employee Store
//!
//! Persistence adapter translating CRUD intents into document store calls.
//!
//! Handlers only ever see `dyn EmployeeStore`, so the MongoDB-backed store
//! and the in-memory store are interchangeable.
//!
//! # Semantics
//!
//! - No transaction spans multiple calls
//! - Concurrent updates to one record are last-write-wins
//! - Updating a missing record succeeds with zero matches
//! - Deleting a missing record fails with `StoreError::NotFound`

mod config;
mod errors;
mod memory;
mod mongo;

use async_trait::async_trait;

use crate::employee::{Employee, EmployeeId, EmployeeInput};

pub use config::{MissingConfig, StoreConfig};
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryEmployeeStore;
pub use mongo::MongoEmployeeStore;

/// Result of an update-by-id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Records whose identifier matched
    pub matched: u64,
    /// Records whose stored fields actually changed
    pub modified: u64,
}

/// Employee collection operations
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees in store-default order
    async fn list_all(&self) -> StoreResult<Vec<Employee>>;

    /// Persist a new employee under a freshly assigned identifier
    async fn insert(&self, employee: &EmployeeInput) -> StoreResult<EmployeeId>;

    /// Replace all business fields of the employee with the given id
    async fn update_by_id(&self, id: &str, employee: &EmployeeInput) -> StoreResult<UpdateOutcome>;

    /// Remove the employee with the given id
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}
