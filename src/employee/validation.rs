//! Employee validation
//!
//! Each business field carries a short list of rules, declared in a table
//! below rather than on the serde types. A field reports at most one
//! violation: the first rule it fails.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::model::EmployeeInput;

/// HTML5 "valid e-mail address" grammar
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// A single check applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty after trimming whitespace
    Required,
    /// Plausible `local@domain` address
    Email,
}

impl Rule {
    fn check(self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Email => EMAIL_RE.is_match(value),
        }
    }
}

struct FieldRules {
    label: &'static str,
    value: fn(&EmployeeInput) -> &str,
    rules: &'static [Rule],
}

fn name(input: &EmployeeInput) -> &str {
    &input.name
}

fn email(input: &EmployeeInput) -> &str {
    &input.email
}

fn phone(input: &EmployeeInput) -> &str {
    &input.phone
}

fn department(input: &EmployeeInput) -> &str {
    &input.department
}

const EMPLOYEE_RULES: &[FieldRules] = &[
    FieldRules {
        label: "Name",
        value: name,
        rules: &[Rule::Required],
    },
    FieldRules {
        label: "Email",
        value: email,
        rules: &[Rule::Required, Rule::Email],
    },
    FieldRules {
        label: "Phone",
        value: phone,
        rules: &[Rule::Required],
    },
    FieldRules {
        label: "Department",
        value: department,
        rules: &[Rule::Required],
    },
];

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "Field '{}' is required", self.field),
            Rule::Email => write!(f, "Field '{}' must be a valid email address", self.field),
        }
    }
}

/// Every violation found in a payload, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_violations(.violations))]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate an employee payload.
///
/// Used for both create and update.
pub fn validate(input: &EmployeeInput) -> Result<(), ValidationErrors> {
    let violations: Vec<FieldViolation> = EMPLOYEE_RULES
        .iter()
        .filter_map(|field| {
            let value = (field.value)(input);
            field
                .rules
                .iter()
                .find(|rule| !rule.check(value))
                .map(|&rule| FieldViolation {
                    field: field.label,
                    rule,
                })
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}
