//! Reconciler: compares the saved config set against the live system set.
//!
//! # Matching rules (for beginners)
//!
//! Records are joined by [`DisplayId`], never by position, so a config saved
//! as `[A, B]` still matches a system that enumerates `[B, A]`.
//!
//! 1. **Identity match** ([`ids_match`]): both sets contain the same displays.
//!    The sets must have the same length and every system display must be
//!    claimed by a config record, so a subset or a superset never matches.
//! 2. **Value match** ([`values_match`]): the identities match *and* every
//!    display sits at exactly the saved origin.
//! 3. **Divergences** ([`divergences`]): when identities match but values do
//!    not, one [`Divergence`] per display whose origin moved.
//! 4. **Apply plan** ([`plan_apply`]): one [`OriginChange`] per system display
//!    that has a config record.  The plan overwrites every matched display,
//!    moved or not, which makes applying it idempotent.  Displays missing on
//!    either side are skipped rather than reported.

use std::fmt;

use tracing::debug;

use super::display::{DisplayId, DisplaySet};

/// One display whose live origin differs from the saved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divergence {
    pub id: DisplayId,
    pub config_x: i32,
    pub config_y: i32,
    pub system_x: i32,
    pub system_y: i32,
}

impl fmt::Display for Divergence {
    /// Formats as `id, config_x, config_y, system_x, system_y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.id, self.config_x, self.config_y, self.system_x, self.system_y
        )
    }
}

/// A request to move display `id` so its origin becomes `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginChange {
    pub id: DisplayId,
    pub x: i32,
    pub y: i32,
}

/// Outcome of comparing a config set with a system set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// The two sets do not describe the same displays.
    IdentityMismatch {
        config_count: usize,
        system_count: usize,
    },
    /// Same displays, same origins.
    Match,
    /// Same displays, at least one origin differs.
    Diverged(Vec<Divergence>),
}

/// Returns `true` when `config` and `system` contain the same display ids.
pub fn ids_match(config: &DisplaySet, system: &DisplaySet) -> bool {
    if config.len() != system.len() {
        return false;
    }

    let matched = config.iter().filter(|c| system.contains(c.id)).count();
    matched == system.len()
}

/// Returns `true` when the ids match and every display is at its saved origin.
pub fn values_match(config: &DisplaySet, system: &DisplaySet) -> bool {
    if !ids_match(config, system) {
        return false;
    }

    let matched = config
        .iter()
        .filter(|c| system.get(c.id).is_some_and(|s| s == *c))
        .count();
    matched == system.len()
}

/// Lists the displays present in both sets whose origins differ, in config order.
///
/// The system side of each entry is the record matched by id.
pub fn divergences(config: &DisplaySet, system: &DisplaySet) -> Vec<Divergence> {
    config
        .iter()
        .filter_map(|c| {
            let s = system.get(c.id)?;
            (s.origin() != c.origin()).then_some(Divergence {
                id: c.id,
                config_x: c.x,
                config_y: c.y,
                system_x: s.x,
                system_y: s.y,
            })
        })
        .collect()
}

/// Computes the origin changes that make `system` look like `config`.
///
/// Follows system enumeration order.  Every system display with a config
/// record gets a change, including displays that are already in place.
pub fn plan_apply(config: &DisplaySet, system: &DisplaySet) -> Vec<OriginChange> {
    let plan: Vec<OriginChange> = system
        .iter()
        .filter_map(|s| {
            config.get(s.id).map(|c| OriginChange {
                id: s.id,
                x: c.x,
                y: c.y,
            })
        })
        .collect();

    debug!(
        planned = plan.len(),
        skipped = system.len() - plan.len(),
        "apply plan computed"
    );
    plan
}

/// Classifies the relationship between `config` and `system`.
pub fn compare(config: &DisplaySet, system: &DisplaySet) -> Comparison {
    if !ids_match(config, system) {
        return Comparison::IdentityMismatch {
            config_count: config.len(),
            system_count: system.len(),
        };
    }

    if values_match(config, system) {
        Comparison::Match
    } else {
        Comparison::Diverged(divergences(config, system))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
