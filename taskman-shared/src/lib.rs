//! # Taskman Shared Library
//!
//! This crate contains the persistence and business logic used by the
//! Taskman API server.
//!
//! ## Module Organization
//!
//! - `db`: SQLite connection pool and schema initialization
//! - `models`: Database models and their row operations
//! - `service`: Request validation and orchestration on top of the models
//! - `error`: Storage error type

pub mod db;
pub mod error;
pub mod models;
pub mod service;

/// Current version of the Taskman shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
