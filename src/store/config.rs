//! Store connection configuration
//!
//! All three values are supplied externally (environment or CLI flags).
//! The service refuses to start if any of them is missing or blank.

use std::fmt;

use thiserror::Error;

pub const URI_VAR: &str = "MONGODB_URI";
pub const DATABASE_VAR: &str = "MONGODB_DB_NAME";
pub const COLLECTION_VAR: &str = "MONGODB_COLLECTION_NAME";

/// Required connection settings were not provided
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required MongoDB environment variables: {}", .missing.join(", "))]
pub struct MissingConfig {
    pub missing: Vec<&'static str>,
}

/// Connection settings for the employee collection
#[derive(Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl StoreConfig {
    /// Build a config, reporting every missing value at once
    pub fn from_parts(
        uri: Option<String>,
        database: Option<String>,
        collection: Option<String>,
    ) -> Result<Self, MissingConfig> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = [
            (URI_VAR, present(&uri)),
            (DATABASE_VAR, present(&database)),
            (COLLECTION_VAR, present(&collection)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        match (uri, database, collection) {
            (Some(uri), Some(database), Some(collection)) if missing.is_empty() => Ok(Self {
                uri,
                database,
                collection,
            }),
            _ => Err(MissingConfig { missing }),
        }
    }
}

// The URI may carry credentials.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}
