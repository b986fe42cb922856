//! Display records and bounded display sets.
//!
//! A [`DisplaySet`] is the unit the reconciler works on.  Two of them exist
//! during a run: the *config set* (loaded from disk or captured by a save)
//! and the *system set* (freshly queried from the platform).

use std::fmt;

use thiserror::Error;

/// Number of displays a set may hold unless the caller configures otherwise.
pub const DEFAULT_MAX_DISPLAYS: usize = 16;

/// Stable platform-assigned identity of a physical display or port.
///
/// On macOS this is the `CGDirectDisplayID`; on X11 it is the RandR output
/// XID.  The value is opaque: it is only ever compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(pub u32);

impl DisplayId {
    /// Returns the raw platform identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for DisplayId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// One display and the origin of its top-left corner in desktop space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayRecord {
    /// Join key between the config set and the system set.
    pub id: DisplayId,
    /// X coordinate of the top-left corner (may be negative).
    pub x: i32,
    /// Y coordinate of the top-left corner (may be negative).
    pub y: i32,
}

impl DisplayRecord {
    /// Creates a record from a raw id and an origin.
    pub fn new(id: impl Into<DisplayId>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    /// Returns the `(x, y)` origin.
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Errors raised when a [`DisplaySet`] would violate its invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplaySetError {
    /// More records than the configured maximum.
    #[error("too many displays: {count} exceeds the maximum of {max}")]
    TooManyDisplays { count: usize, max: usize },

    /// The same display identity appears twice.
    #[error("display {0} appears more than once")]
    DuplicateId(DisplayId),
}

/// An ordered, bounded sequence of [`DisplayRecord`]s with unique ids.
///
/// The bound is checked once, at construction, so every `DisplaySet` in the
/// program is known to satisfy it.  Order is significant: it is the parse
/// order of the config file or the enumeration order of the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySet {
    records: Vec<DisplayRecord>,
}

impl DisplaySet {
    /// Builds a set from `records`, enforcing the id-uniqueness and size
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DisplaySetError::TooManyDisplays`] if `records.len()` exceeds
    /// `max_displays`, or [`DisplaySetError::DuplicateId`] for the first id
    /// that repeats.
    pub fn new(records: Vec<DisplayRecord>, max_displays: usize) -> Result<Self, DisplaySetError> {
        if records.len() > max_displays {
            return Err(DisplaySetError::TooManyDisplays {
                count: records.len(),
                max: max_displays,
            });
        }

        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|earlier| earlier.id == record.id) {
                return Err(DisplaySetError::DuplicateId(record.id));
            }
        }

        Ok(Self { records })
    }

    /// Returns a set with no displays.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayRecord> {
        self.records.iter()
    }

    /// Returns the records in set order.
    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    /// Looks up the record for `id`.
    pub fn get(&self, id: DisplayId) -> Option<&DisplayRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: DisplayId) -> bool {
        self.get(id).is_some()
    }

    /// Moves display `id` to `(x, y)`.
    ///
    /// Returns `false` (and changes nothing) when the set has no such display.
    pub fn set_origin(&mut self, id: DisplayId, x: i32, y: i32) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.x = x;
                record.y = y;
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a DisplaySet {
    type Item = &'a DisplayRecord;
    type IntoIter = std::slice::Iter<'a, DisplayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
