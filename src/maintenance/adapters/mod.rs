//! Adapter implementations for the maintenance ports.

pub mod memory;
pub mod postgres;
