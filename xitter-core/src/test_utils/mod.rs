//! Test utilities and fixtures
//!
//! Seed data mirroring the sample spaces and accounts the platform
//! ships for demos, shared by the CLI demo and integration tests. The
//! core itself makes no assumption about data origin.

pub mod fixtures;

pub use fixtures::*;
