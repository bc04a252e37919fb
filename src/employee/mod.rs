//! # Employee Module
//!
//! The employee record and the rules a record must satisfy before it is
//! persisted.
//!
//! Validation is a pure function of the payload. It runs identically for
//! create and update and never touches the store.

mod model;
mod validation;

pub use model::{Employee, EmployeeId, EmployeeInput, InvalidEmployeeId};
pub use validation::{validate, FieldViolation, Rule, ValidationErrors};
