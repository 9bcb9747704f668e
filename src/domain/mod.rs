//! Domain types for the incident registry.
//!
//! This module contains the core business entities and value objects.

mod incident;

pub use incident::*;
