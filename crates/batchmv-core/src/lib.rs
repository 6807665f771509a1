//! batchmv Core - Domain logic for batch rename validation
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Change`, `Conflict`, `ConflictReport`, `Platform`
//! - **Port definitions** - Traits for adapters: `IFileSystem`
//! - **Configuration** - Typed engine configuration with YAML loading
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement. The engine
//! crate (`batchmv-conflict`) consumes these types to detect and repair
//! rename conflicts.

pub mod config;
pub mod domain;
pub mod ports;
