// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serde-friendly payload fixtures.

use serde::{Deserialize, Serialize};

/// Small structured payload for codec and dataset tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Record identity.
    pub id: u64,
    /// Human-readable label.
    pub label: String,
    /// Arbitrary numeric field, exercises float round-tripping.
    pub score: f64,
}

impl SampleRecord {
    /// Deterministic record `n`: label `record-<n>`, score `n / 2`.
    #[must_use]
    pub fn numbered(n: u32) -> Self {
        Self {
            id: u64::from(n),
            label: format!("record-{n}"),
            score: f64::from(n) / 2.0,
        }
    }
}
