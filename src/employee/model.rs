//! Employee data model
//!
//! Three shapes of the same record:
//! - `EmployeeInput`: what a client sends on create and update
//! - `Employee`: what the store holds and the list endpoint returns
//! - `EmployeeId`: the store-assigned identifier

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Identifier of a stored employee.
///
/// Wraps the store-native ObjectId (24 hex characters on the wire).
/// Assigned once at insert and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId(ObjectId);

impl EmployeeId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier from its hex form
    pub fn parse(value: &str) -> Result<Self, InvalidEmployeeId> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidEmployeeId {
                value: value.to_string(),
            })
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for EmployeeId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for EmployeeId {
    type Err = InvalidEmployeeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for EmployeeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

/// A path segment that is not a valid employee identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a 24 character hex string")]
pub struct InvalidEmployeeId {
    pub value: String,
}

/// Employee payload for create and update.
///
/// Missing and null fields decode as empty strings so validation can report
/// every absent field at once. Unknown fields, including any client-supplied
/// `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeInput {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub department: String,
}

impl EmployeeInput {
    /// Decode a JSON request body.
    ///
    /// Only a JSON object is an employee; arrays and scalars are rejected
    /// even though serde would otherwise fill the struct positionally.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(object))
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A stored employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub department: String,
}

impl Employee {
    /// Build a record from its identifier and business fields
    pub fn new(id: EmployeeId, input: EmployeeInput) -> Self {
        let EmployeeInput {
            name,
            email,
            phone,
            department,
        } = input;

        Self {
            id,
            name,
            email,
            phone,
            department,
        }
    }

    /// Replace every business field, keeping the identifier
    pub fn replace_fields(&mut self, input: &EmployeeInput) {
        self.name = input.name.clone();
        self.email = input.email.clone();
        self.phone = input.phone.clone();
        self.department = input.department.clone();
    }
}
