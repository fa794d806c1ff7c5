//! Library crate for ctf-arena-back, exposing modules for binaries and integration tests.

/// Runtime configuration loading.
pub mod config;
/// Record store trait, backends, and entities.
pub mod dao;
/// Request, response, and stream payload shapes.
pub mod dto;
/// Service and HTTP error taxonomy.
pub mod error;
/// HTTP route trees.
pub mod routes;
/// Business logic services.
pub mod services;
/// Shared application state: clock cell, event hub, lock registry.
pub mod state;
