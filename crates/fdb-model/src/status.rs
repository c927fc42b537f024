//! The canonical support-status classifier.
//!
//! Upstream functionality ratings are inconsistent: single-letter codes
//! (`A`/`B`/`C`), sentinel `?`, literal words, or nothing at all. This module
//! is the single place that maps a raw rating plus a driver count to a
//! [`SupportStatus`]. Both data generation and any presentation-side
//! recomputation go through [`classify_support`]; no other mapping exists in
//! the workspace.

use crate::enums::SupportStatus;

/// Maps a raw functionality rating and driver count to a canonical status.
///
/// Evaluated in order:
/// 1. Absent, empty, `?`, or `unknown` (case-insensitive): `Unsupported` when
///    no drivers exist, `Unknown` otherwise.
/// 2. `A`/`perfect` -> `Perfect`; `B`/`C`/`good`/`partial`/`mostly` ->
///    `Partial`; `unsupported` -> `Unsupported` (all case-insensitive).
/// 3. Any other value: `Unsupported` when no drivers exist, `Unknown`
///    otherwise.
pub fn classify_support(functionality: Option<&str>, driver_count: usize) -> SupportStatus {
    let raw = functionality.map(str::trim).unwrap_or("");
    if raw.is_empty() || raw == "?" || raw.eq_ignore_ascii_case("unknown") {
        return unrated_status(driver_count);
    }
    match raw.to_lowercase().as_str() {
        "a" | "perfect" => SupportStatus::Perfect,
        "b" | "c" | "good" | "partial" | "mostly" => SupportStatus::Partial,
        "unsupported" => SupportStatus::Unsupported,
        _ => unrated_status(driver_count),
    }
}

fn unrated_status(driver_count: usize) -> SupportStatus {
    if driver_count == 0 {
        SupportStatus::Unsupported
    } else {
        SupportStatus::Unknown
    }
}

/// A record that carries a functionality rating and a driver count.
///
/// Implemented by both the full combined record (count from its drivers list)
/// and the summary projection (precomputed count), so a displayed status can
/// never contradict the generation-time status.
pub trait SupportSource {
    fn functionality(&self) -> Option<&str>;
    fn driver_count(&self) -> usize;

    fn support_status(&self) -> SupportStatus {
        classify_support(self.functionality(), self.driver_count())
    }
}
