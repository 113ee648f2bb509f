//! Image Gallery backend: lists bucket images over HTTP

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

/// Image listing on top of object storage
pub mod image_storage;

/// HTTP routes
pub mod routes;

/// HTTP server bootstrap
pub mod server;

/// Configuration and error types
pub mod types;
