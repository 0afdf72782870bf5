//! Unit tests for routine maintenance.
