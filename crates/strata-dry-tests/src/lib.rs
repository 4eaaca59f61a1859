// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Strata crates.
#![forbid(unsafe_code)]
//!
//! This crate provides commonly used test utilities to reduce duplication
//! across the Strata test suite.
//!
//! # Modules
//!
//! - [`fixtures`] - Serde-friendly payload types for codec and dataset tests
//! - [`store`] - Instrumented in-memory `ArtifactStore` double

pub mod fixtures;
pub mod store;

// Re-export commonly used items at crate root for convenience
pub use fixtures::SampleRecord;
pub use store::TamperStore;
