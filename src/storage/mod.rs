//! Storage layer for the incident registry.
//!
//! Provides database access via SQLx with SQLite.

mod models;
mod repository;

pub use repository::IncidentRepository;
