//! Step definitions for routine sweep BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
