//! HTTP API layer for the incident registry.
//!
//! Provides REST endpoints for recording and retiring incidents.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
