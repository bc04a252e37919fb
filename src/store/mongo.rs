//! MongoDB employee store
//!
//! One document per employee, keyed by `_id`. The driver pools connections
//! internally, so a single store is shared by every request.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::{EmployeeStore, UpdateOutcome};
use crate::employee::{Employee, EmployeeId, EmployeeInput};

/// Startup health-check deadline. No other call is time-limited.
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Stored document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmployeeRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    department: String,
}

impl EmployeeRecord {
    fn new(id: EmployeeId, input: &EmployeeInput) -> Self {
        Self {
            id: id.as_object_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            department: input.department.clone(),
        }
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Employee::new(
            record.id.into(),
            EmployeeInput {
                name: record.name,
                email: record.email,
                phone: record.phone,
                department: record.department,
            },
        )
    }
}

fn id_filter(id: EmployeeId) -> Document {
    doc! { "_id": id.as_object_id() }
}

fn set_fields(input: &EmployeeInput) -> Document {
    doc! {
        "$set": {
            "name": input.name.as_str(),
            "email": input.email.as_str(),
            "phone": input.phone.as_str(),
            "department": input.department.as_str(),
        }
    }
}

/// Employee store backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoEmployeeStore {
    collection: Collection<EmployeeRecord>,
}

impl MongoEmployeeStore {
    /// Connect, verify the server answers a ping, and select the collection
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        let admin = client.database("admin");
        let ping = admin.run_command(doc! { "ping": 1 }).into_future();
        match tokio::time::timeout(PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(StoreError::Connection(format!("ping failed: {}", e))),
            Err(_) => {
                return Err(StoreError::Connection(format!(
                    "ping timed out after {}s",
                    PING_TIMEOUT.as_secs()
                )))
            }
        }

        info!(
            database = %config.database,
            collection = %config.collection,
            "MongoDB connection established"
        );

        let collection = client
            .database(&config.database)
            .collection::<EmployeeRecord>(&config.collection);
        Ok(Self { collection })
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn list_all(&self) -> StoreResult<Vec<Employee>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::query("error finding employees", e))?;

        // A failure part-way through discards everything read so far.
        let records: Vec<EmployeeRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::query("cursor error", e))?;

        Ok(records.into_iter().map(Employee::from).collect())
    }

    async fn insert(&self, employee: &EmployeeInput) -> StoreResult<EmployeeId> {
        let id = EmployeeId::generate();
        self.collection
            .insert_one(EmployeeRecord::new(id, employee))
            .await
            .map_err(|e| StoreError::query("error inserting employee", e))?;
        Ok(id)
    }

    async fn update_by_id(&self, id: &str, employee: &EmployeeInput) -> StoreResult<UpdateOutcome> {
        let id = EmployeeId::parse(id)?;
        let result = self
            .collection
            .update_one(id_filter(id), set_fields(employee))
            .await
            .map_err(|e| StoreError::query("error updating employee", e))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let parsed = EmployeeId::parse(id)?;
        let result = self
            .collection
            .delete_one(id_filter(parsed))
            .await
            .map_err(|e| StoreError::query("error deleting employee", e))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
