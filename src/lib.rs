//! restservice - key-value records and a teacher directory over HTTP
//!
//! - [`resource`]: create/update/delete/read of records with server-assigned ids
//! - [`aggregation`]: flattened teacher directory built from the content repository
//! - [`record_store`] and [`content`]: the storage and content collaborators
//! - [`http_server`]: axum routes under `/api/restservice`

pub mod aggregation;
pub mod cli;
pub mod content;
pub mod http_server;
pub mod record_store;
pub mod resource;
