//! RepairRequest: routine maintenance scheduling core.
//!
//! This crate computes when recurring facility maintenance falls due and
//! materializes one support ticket per due task and day.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`maintenance`]: Recurring tasks, recurrence calculation, and the sweep
//! - [`config`]: Sweep configuration read from the environment

pub mod config;
pub mod maintenance;
