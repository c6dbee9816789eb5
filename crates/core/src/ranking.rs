//! Ordinal ranking and status predicates shared by incidents and tickets.
//!
//! Severity (incidents) and priority (tickets) use the same four labels.
//! Labels and statuses are free text in storage, so every comparison here is
//! case-insensitive and unknown labels rank as [`LEVEL_UNKNOWN`].

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

pub const LABEL_LOW: &str = "low";
pub const LABEL_MEDIUM: &str = "medium";
pub const LABEL_HIGH: &str = "high";
pub const LABEL_CRITICAL: &str = "critical";

/// Ordinal for labels outside the known set.
pub const LEVEL_UNKNOWN: u8 = 0;

/// Known labels paired with their ordinal, lowest first.
pub const LEVELS: &[(&str, u8)] = &[
    (LABEL_LOW, 1),
    (LABEL_MEDIUM, 2),
    (LABEL_HIGH, 3),
    (LABEL_CRITICAL, 4),
];

pub const STATUS_OPEN: &str = "open";
pub const STATUS_RESOLVED: &str = "resolved";

/// Status written by "close" operations. Stored capitalised, matched
/// case-insensitively like every other status.
pub const STATUS_RESOLVED_DISPLAY: &str = "Resolved";

/* --------------------------------------------------------------------------
Ranking
-------------------------------------------------------------------------- */

/// Map a severity/priority label to its ordinal: low 1, medium 2, high 3,
/// critical 4. Anything else maps to 0.
pub fn ordinal_level(label: &str) -> u8 {
    LEVELS
        .iter()
        .find(|(name, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, level)| *level)
        .unwrap_or(LEVEL_UNKNOWN)
}

/// Whether the label is `critical`.
pub fn is_critical(label: &str) -> bool {
    label.eq_ignore_ascii_case(LABEL_CRITICAL)
}

/* --------------------------------------------------------------------------
Status predicates
-------------------------------------------------------------------------- */

pub fn is_resolved(status: &str) -> bool {
    status.eq_ignore_ascii_case(STATUS_RESOLVED)
}

pub fn is_open(status: &str) -> bool {
    status.eq_ignore_ascii_case(STATUS_OPEN)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
