//! # HTTP Server Module
//!
//! Binds URL patterns and methods to handlers and applies cross-origin
//! headers to every route.
//!
//! # Endpoints
//!
//! - `GET /api/employees` - List employees
//! - `POST /api/employees` - Create an employee
//! - `PUT /api/employees/:id` - Replace an employee's fields
//! - `DELETE /api/employees/:id` - Delete an employee

pub mod config;
pub mod employee_routes;
pub mod errors;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
