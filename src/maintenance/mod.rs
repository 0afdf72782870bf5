//! Routine maintenance scheduling for RepairRequest.
//!
//! Organizations register recurring maintenance tasks; a daily sweep turns
//! every task due that day into a pending `routine_maintenance` ticket. The
//! module follows hexagonal architecture:
//!
//! - Domain types and recurrence arithmetic in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
