//! API route handlers
//!
//! This module contains all route handlers organized by resource:
//!
//! - `health`: Welcome and health check endpoints
//! - `tasks`: Task CRUD endpoints

pub mod health;
pub mod tasks;
