//! Filename slug derivation
//!
//! Output filenames encode two names — `<guild-slug>.<emoji-slug>.<ext>` —
//! so `.` is reserved as the structural separator and must never appear
//! inside either slug.

/// Derive a filesystem-safe slug from an arbitrary guild or emoji name.
///
/// Runs a standard transliterating slugification (lowercase, non-alphanumeric
/// runs collapsed to `-`, edges trimmed), then substitutes `_` for any
/// remaining literal `.` so the dot stays unambiguous as the
/// guild/emoji separator.
///
/// Deterministic and idempotent: `filename_slug(filename_slug(x)) ==
/// filename_slug(x)`.
///
/// Distinct originals can still collide after slugification (e.g. "Team A"
/// and "Team.A" both become `team-a`). Colliding pairs overwrite each other
/// at the same target path, last writer wins; this is accepted rather than
/// defended against.
pub fn filename_slug(input: &str) -> String {
    slug::slugify(input).replace('.', "_")
}
