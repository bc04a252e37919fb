//! CLI argument definitions using clap
//!
//! Every option can also come from the environment (or a `.env` file),
//! which is how deployments normally supply them.

use clap::Parser;

/// Employee API - CRUD HTTP service for employee records
#[derive(Parser, Debug)]
#[command(name = "employee-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    /// Database holding the employee collection
    #[arg(long, env = "MONGODB_DB_NAME")]
    pub mongodb_db_name: Option<String>,

    /// Employee collection name
    #[arg(long, env = "MONGODB_COLLECTION_NAME")]
    pub mongodb_collection_name: Option<String>,

    /// Host to bind the HTTP server to
    #[arg(long, env = "EMPLOYEE_API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "EMPLOYEE_API_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
