//! # HTTP Server
//!
//! Route wiring over the lifecycle core. Everything here is boundary
//! plumbing: extract identity, parse parameters, call the service, shape the
//! JSON envelope.

pub mod admin_routes;
pub mod config;
pub mod home_routes;
pub mod paper_routes;
pub mod respond;
pub mod server;
pub mod user_routes;

pub use config::ServerConfig;
pub use server::{AppState, HttpServer};
