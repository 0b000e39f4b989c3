//! PageDeck Core
//!
//! This crate provides the record stores, services and configuration behind
//! the PageDeck page and agent manager.
//!
//! # Architecture
//!
//! - **Store traits**: `PageStore` / `AgentStore` are the seam a hosted
//!   real-time database client plugs into
//! - **In-memory stores**: the current backends, with sequential page IDs and
//!   UUID agent IDs
//! - **Services**: CRUD plus hierarchy reads, emitting domain events
//! - **Absence is a value**: unknown IDs come back as `None` / `false`, never as errors
//!
//! # Modules
//!
//! - [`models`] - Data structures (Page, Agent and their inputs)
//! - [`db`] - Store traits, in-memory implementations, domain events
//! - [`services`] - PageService and AgentService
//! - [`config`] - Environment-driven runtime configuration

pub mod config;
pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use config::PageDeckConfig;
pub use models::*;
pub use services::*;
