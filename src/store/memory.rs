//! In-memory employee store
//!
//! Same semantics as the MongoDB store, held in a `RwLock<Vec<_>>`.
//! Used as the store double in tests.

use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::{EmployeeStore, UpdateOutcome};
use crate::employee::{Employee, EmployeeId, EmployeeInput};

/// In-memory employee store for testing
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    employees: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored employees
    pub fn len(&self) -> usize {
        self.employees.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        let employees = self
            .employees
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        Ok(employees.clone())
    }

    async fn insert(&self, employee: &EmployeeInput) -> StoreResult<EmployeeId> {
        let mut employees = self
            .employees
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let id = EmployeeId::generate();
        employees.push(Employee::new(id, employee.clone()));
        Ok(id)
    }

    async fn update_by_id(&self, id: &str, employee: &EmployeeInput) -> StoreResult<UpdateOutcome> {
        let id = EmployeeId::parse(id)?;
        let mut employees = self
            .employees
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let Some(existing) = employees.iter_mut().find(|e| e.id == id) else {
            return Ok(UpdateOutcome::default());
        };

        let before = existing.clone();
        existing.replace_fields(employee);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*existing != before),
        })
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let parsed = EmployeeId::parse(id)?;
        let mut employees = self
            .employees
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let len_before = employees.len();
        employees.retain(|e| e.id != parsed);

        if employees.len() == len_before {
            Err(StoreError::NotFound(id.to_string()))
        } else {
            Ok(())
        }
    }
}
