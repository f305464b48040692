//! # restservice HTTP Server Module
//!
//! Axum server exposing the restservice resource.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/restservice` - Record create and teacher directory
//! - `/api/restservice/{id}` - Record read, update and delete

pub mod config;
pub mod health_routes;
pub mod restservice_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use restservice_routes::RestServiceState;
pub use server::{build_router, HttpServer};
