//! querygate - a read-only SQL gateway over a single CSV-backed table.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod config;
pub mod dataset;
pub mod db;
pub mod error;
pub mod logging;
pub mod query;
pub mod safety;
pub mod tools;
