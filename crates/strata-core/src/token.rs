// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Version tokens and version pinning.
//!
//! A [`VersionToken`] names one point-in-time snapshot of a dataset.
//! Generated tokens are UTC stamps at microsecond resolution in a
//! fixed-width, filesystem-safe shape (dots instead of colons), so their
//! lexicographic order IS their temporal order — "most recent version"
//! reduces to "greatest string". Generation is strictly monotonic across the
//! whole process: a compare-and-swap loop over the last issued microsecond
//! guarantees that concurrent calls never collide, even within one clock
//! tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Errors from constructing a [`VersionToken`] out of caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token was empty.
    #[error("version token is empty")]
    Empty,

    /// Token contained a `/`. A token is exactly one path component of the
    /// versioned layout, so separators would change the layout's depth.
    #[error("version token {token:?} contains a path separator")]
    Separator {
        /// The rejected token text.
        token: String,
    },

    /// Token contained a NUL byte.
    #[error("version token {token:?} contains a NUL byte")]
    Nul {
        /// The rejected token text.
        token: String,
    },
}

// Last issued stamp in microseconds since the epoch, process-wide. Each
// generation CASes `max(now, last + 1)` into place, so no two calls — on any
// threads — ever observe the same value, and issued stamps only move forward
// even if the wall clock steps backwards.
static LAST_ISSUED_MICROS: AtomicU64 = AtomicU64::new(0);

// 9999-12-31T23:59:59.999999Z, the largest stamp the token shape can carry.
const MAX_TOKEN_MICROS: u64 = 253_402_300_799_999_999;
const MAX_TOKEN_TEXT: &str = "9999-12-31T23.59.59.999999Z";

const TOKEN_FORMAT: &str = "%Y-%m-%dT%H.%M.%S.%6fZ";

fn now_micros() -> u64 {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    u64::try_from(micros).unwrap_or(u64::MAX)
}

fn next_issued_micros(now: u64) -> u64 {
    let mut last = LAST_ISSUED_MICROS.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last.saturating_add(1));
        match LAST_ISSUED_MICROS.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

fn format_micros(micros: u64) -> String {
    let clamped = micros.min(MAX_TOKEN_MICROS);
    let Ok(signed) = i64::try_from(clamped) else {
        return MAX_TOKEN_TEXT.to_string();
    };
    match chrono::DateTime::from_timestamp_micros(signed) {
        Some(stamp) => stamp.format(TOKEN_FORMAT).to_string(),
        None => MAX_TOKEN_TEXT.to_string(),
    }
}

/// Identifier for one point-in-time snapshot of a dataset.
///
/// Opaque once constructed; ordering is the derived lexicographic `Ord` on
/// the token text, which coincides with temporal order for generated tokens
/// (`2026-08-24T12.30.59.000042Z` — fixed width, zero padded). Caller-supplied
/// tokens join the same ordering wherever their text sorts.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VersionToken(String);

impl VersionToken {
    /// Validate caller input as a token.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] if `token` is empty, contains `/`, or
    /// contains a NUL byte.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        if token.contains('/') {
            return Err(TokenError::Separator { token });
        }
        if token.contains('\0') {
            return Err(TokenError::Nul { token });
        }
        Ok(Self(token))
    }

    /// Generate a fresh token, strictly greater than every token this
    /// process has generated before.
    ///
    /// The only side effect is advancing the process-wide issue counter; the
    /// wall clock is read once and bumped past the last issued stamp when
    /// two calls land in the same microsecond.
    #[must_use]
    pub fn generate() -> Self {
        Self(format_micros(next_issued_micros(now_micros())))
    }

    /// View the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version pinning for one dataset: which snapshot to load, which to save.
///
/// `None` on the load side means "most recent existing version"; `None` on
/// the save side means "auto-generate a fresh token at save time".
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct VersionSpec {
    /// Pinned load token, or `None` for most-recent.
    pub load: Option<VersionToken>,
    /// Pinned save token, or `None` for auto-generated.
    pub save: Option<VersionToken>,
}

impl VersionSpec {
    /// Load the most recent version; auto-generate save tokens.
    #[must_use]
    pub fn latest() -> Self {
        Self::default()
    }

    /// Pin both the load and save side to `token`.
    #[must_use]
    pub fn pinned(token: VersionToken) -> Self {
        Self {
            load: Some(token.clone()),
            save: Some(token),
        }
    }

    /// Pin only the load side; saves still auto-generate.
    #[must_use]
    pub fn load_pinned(token: VersionToken) -> Self {
        Self {
            load: Some(token),
            save: None,
        }
    }

    /// Pin only the save side; loads still resolve to most-recent.
    #[must_use]
    pub fn save_pinned(token: VersionToken) -> Self {
        Self {
            load: None,
            save: Some(token),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ── 1. generation is strictly monotonic ─────────────────────────────

    #[test]
    fn generate_is_strictly_monotonic() {
        let a = VersionToken::generate();
        let b = VersionToken::generate();
        let c = VersionToken::generate();
        assert!(a < b);
        assert!(b < c);
        assert!(a.as_str() < b.as_str());
    }

    // ── 2. generated shape: fixed width, dots, Z suffix ─────────────────

    #[test]
    fn generate_shape_is_fixed_width() {
        let token = VersionToken::generate();
        let text = token.as_str();
        assert_eq!(text.len(), 27, "token {text:?}");
        let bytes = text.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b'T');
        assert_eq!(bytes[13], b'.');
        assert_eq!(bytes[16], b'.');
        assert_eq!(bytes[19], b'.');
        assert_eq!(bytes[26], b'Z');
        assert!(!text.contains(':'));
    }

    // ── 3. uniqueness under concurrent generation ───────────────────────

    #[test]
    fn generate_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..64)
                        .map(|_| VersionToken::generate())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut all = std::collections::BTreeSet::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                assert!(all.insert(token), "duplicate token issued");
            }
        }
        assert_eq!(all.len(), 8 * 64);
    }

    // ── 4. caller input validation ──────────────────────────────────────

    #[test]
    fn new_rejects_empty_separator_and_nul() {
        assert_eq!(VersionToken::new("").unwrap_err(), TokenError::Empty);
        assert!(matches!(
            VersionToken::new("a/b").unwrap_err(),
            TokenError::Separator { token } if token == "a/b"
        ));
        assert!(matches!(
            VersionToken::new("a\0b").unwrap_err(),
            TokenError::Nul { .. }
        ));
        let ok = VersionToken::new("v1").unwrap();
        assert_eq!(ok.as_str(), "v1");
        assert_eq!(ok.to_string(), "v1");
    }

    // ── 5. lexicographic order equals temporal order at boundaries ──────

    #[test]
    fn stamp_order_survives_rollovers() {
        let before_minute = VersionToken::new("2024-01-01T00.00.59.999999Z").unwrap();
        let after_minute = VersionToken::new("2024-01-01T00.01.00.000000Z").unwrap();
        assert!(before_minute < after_minute);

        let before_year = VersionToken::new("2024-12-31T23.59.59.999999Z").unwrap();
        let after_year = VersionToken::new("2025-01-01T00.00.00.000000Z").unwrap();
        assert!(before_year < after_year);
    }

    // ── 6. spec constructors ────────────────────────────────────────────

    #[test]
    fn spec_constructors() {
        let t = VersionToken::new("2024-01-01T00.00.00.000000Z").unwrap();

        let latest = VersionSpec::latest();
        assert_eq!(latest.load, None);
        assert_eq!(latest.save, None);

        let pinned = VersionSpec::pinned(t.clone());
        assert_eq!(pinned.load.as_ref(), Some(&t));
        assert_eq!(pinned.save.as_ref(), Some(&t));

        let load_only = VersionSpec::load_pinned(t.clone());
        assert_eq!(load_only.load.as_ref(), Some(&t));
        assert_eq!(load_only.save, None);

        let save_only = VersionSpec::save_pinned(t.clone());
        assert_eq!(save_only.load, None);
        assert_eq!(save_only.save, Some(t));
    }
}
