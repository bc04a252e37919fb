//! employee-api - CRUD HTTP service for employee records
//!
//! Layers, leaf-first:
//! - `employee`: record model and validation
//! - `store`: persistence adapter over MongoDB (or memory)
//! - `http_server`: handlers, router and CORS
//! - `cli`: configuration and startup

pub mod cli;
pub mod employee;
pub mod http_server;
pub mod logging;
pub mod store;
