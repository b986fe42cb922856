//! Config file format: one `id, x, y` record per line.
//!
//! ```text
//! 441005125, 0, 0
//! 69733382, -1920, 0
//! ```
//!
//! Fields are base-10 integers separated by commas; whitespace around a
//! field is ignored and blank lines are skipped.  There is no header and no
//! comment syntax.  Line order is significant: it becomes the order of the
//! parsed [`DisplaySet`].
//!
//! # Legacy ids
//!
//! Files written by older builds stored display ids in a signed 32-bit
//! field, so an id above `i32::MAX` appears as a negative number.  The parser
//! accepts such values and reinterprets them as the unsigned id; the writer
//! always emits the unsigned form.

use thiserror::Error;

use crate::domain::display::{DisplayId, DisplayRecord, DisplaySet, DisplaySetError};

/// Number of comma-separated fields in one record.
const FIELDS_PER_RECORD: usize = 3;

/// Errors produced while parsing config file text.
///
/// Line numbers are 1-based.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigFormatError {
    /// A line has more than three fields.
    #[error("line {line}: too many values, expected 3 but found {found}")]
    TooManyFields { line: usize, found: usize },

    /// A line has fewer than three fields.
    #[error("line {line}: missing values, expected 3 but found {found}")]
    MissingFields { line: usize, found: usize },

    /// A field is not a base-10 integer in range.
    #[error("line {line}: {field:?} is not a valid integer")]
    InvalidNumber { line: usize, field: String },

    /// The file describes more displays than the configured maximum.
    #[error("line {line}: too many monitors, the maximum is {max}")]
    TooManyDisplays { line: usize, max: usize },

    /// The file is not UTF-8 text; `offset` is the first bad byte.
    #[error("file is not valid UTF-8 text (bad byte at offset {offset})")]
    InvalidEncoding { offset: usize },

    /// The parsed records violate a [`DisplaySet`] invariant.
    #[error(transparent)]
    InvalidSet(#[from] DisplaySetError),
}

/// Parses config file text into a [`DisplaySet`] of at most `max_displays`.
///
/// # Errors
///
/// Returns the first [`ConfigFormatError`] encountered, scanning in line order.
pub fn parse_config(text: &str, max_displays: usize) -> Result<DisplaySet, ConfigFormatError> {
    let mut records = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        if raw_line.trim().is_empty() {
            continue;
        }

        if records.len() == max_displays {
            return Err(ConfigFormatError::TooManyDisplays {
                line,
                max: max_displays,
            });
        }

        records.push(parse_record(raw_line, line)?);
    }

    Ok(DisplaySet::new(records, max_displays)?)
}

/// Renders `set` as config file text, one `id, x, y\n` line per record.
pub fn render_config(set: &DisplaySet) -> String {
    set.iter()
        .map(|r| format!("{}, {}, {}\n", r.id, r.x, r.y))
        .collect()
}

fn parse_record(raw_line: &str, line: usize) -> Result<DisplayRecord, ConfigFormatError> {
    let fields: Vec<&str> = raw_line.split(',').map(str::trim).collect();

    if fields.len() > FIELDS_PER_RECORD {
        return Err(ConfigFormatError::TooManyFields {
            line,
            found: fields.len(),
        });
    }
    if fields.len() < FIELDS_PER_RECORD {
        return Err(ConfigFormatError::MissingFields {
            line,
            found: fields.len(),
        });
    }

    Ok(DisplayRecord {
        id: parse_id(fields[0], line)?,
        x: parse_coordinate(fields[1], line)?,
        y: parse_coordinate(fields[2], line)?,
    })
}

fn parse_id(field: &str, line: usize) -> Result<DisplayId, ConfigFormatError> {
    if let Ok(id) = field.parse::<u32>() {
        return Ok(DisplayId(id));
    }

    // Signed spelling written by older builds; keep the bit pattern.
    match field.parse::<i32>() {
        Ok(legacy) => Ok(DisplayId(legacy as u32)),
        Err(_) => Err(invalid(field, line)),
    }
}

fn parse_coordinate(field: &str, line: usize) -> Result<i32, ConfigFormatError> {
    field.parse::<i32>().map_err(|_| invalid(field, line))
}

fn invalid(field: &str, line: usize) -> ConfigFormatError {
    ConfigFormatError::InvalidNumber {
        line,
        field: field.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::display::DEFAULT_MAX_DISPLAYS;

    #[test]
    fn test_parse_reads_records_in_file_order() {
        // Arrange
        let text = "441005125, 0, 0\n69733382, -1920, 0\n";

        // Act
        let set = parse_config(text, DEFAULT_MAX_DISPLAYS).expect("parse");

        // Assert
        assert_eq!(
            set.records(),
            &[
                DisplayRecord::new(441005125, 0, 0),
                DisplayRecord::new(69733382, -1920, 0),
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_missing_spaces_and_trailing_newline() {
        let set = parse_config("5,100,200", DEFAULT_MAX_DISPLAYS).expect("parse");
        assert_eq!(set.records(), &[DisplayRecord::new(5, 100, 200)]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let set = parse_config("1, 0, 0\n\n   \n2, 1920, 0\n", DEFAULT_MAX_DISPLAYS).expect("parse");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_empty_text_yields_empty_set() {
        let set = parse_config("", DEFAULT_MAX_DISPLAYS).expect("parse");
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_rejects_fourth_field() {
        let result = parse_config("1, 0, 0\n2, 0, 0, 9\n", DEFAULT_MAX_DISPLAYS);
        assert_eq!(
            result,
            Err(ConfigFormatError::TooManyFields { line: 2, found: 4 })
        );
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let result = parse_config("1, 0\n", DEFAULT_MAX_DISPLAYS);
        assert_eq!(
            result,
            Err(ConfigFormatError::MissingFields { line: 1, found: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_field() {
        let result = parse_config("1, left, 0\n", DEFAULT_MAX_DISPLAYS);
        assert_eq!(
            result,
            Err(ConfigFormatError::InvalidNumber {
                line: 1,
                field: "left".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_rejects_more_records_than_max() {
        // Arrange
        let text = "1, 0, 0\n2, 0, 0\n3, 0, 0\n";

        // Act
        let result = parse_config(text, 2);

        // Assert
        assert_eq!(
            result,
            Err(ConfigFormatError::TooManyDisplays { line: 3, max: 2 })
        );
    }

    #[test]
    fn test_parse_rejects_duplicate_display_ids() {
        let result = parse_config("1, 0, 0\n1, 1920, 0\n", DEFAULT_MAX_DISPLAYS);
        assert_eq!(
            result,
            Err(ConfigFormatError::InvalidSet(DisplaySetError::DuplicateId(
                DisplayId(1)
            )))
        );
    }

    #[test]
    fn test_parse_reinterprets_negative_legacy_id() {
        // 0xB1D0_0001 written through a signed 32-bit field.
        let legacy = (0xB1D0_0001u32 as i32).to_string();
        let set = parse_config(&format!("{legacy}, 0, 0\n"), DEFAULT_MAX_DISPLAYS).expect("parse");
        assert_eq!(set.records()[0].id, DisplayId(0xB1D0_0001));
    }

    #[test]
    fn test_render_writes_one_line_per_record() {
        // Arrange
        let set = DisplaySet::new(vec![DisplayRecord::new(5, 100, 200)], DEFAULT_MAX_DISPLAYS)
            .unwrap();

        // Act
        let text = render_config(&set);

        // Assert
        assert_eq!(text, "5, 100, 200\n");
    }

    #[test]
    fn test_render_writes_large_ids_unsigned() {
        let set = DisplaySet::new(
            vec![DisplayRecord::new(0xB1D0_0001u32, -1920, 0)],
            DEFAULT_MAX_DISPLAYS,
        )
        .unwrap();
        assert_eq!(render_config(&set), format!("{}, -1920, 0\n", 0xB1D0_0001u32));
    }

    #[test]
    fn test_render_then_parse_preserves_order() {
        let set = DisplaySet::new(
            vec![
                DisplayRecord::new(2, -1920, 0),
                DisplayRecord::new(1, 0, 0),
                DisplayRecord::new(3, 0, -1080),
            ],
            DEFAULT_MAX_DISPLAYS,
        )
        .unwrap();

        let restored = parse_config(&render_config(&set), DEFAULT_MAX_DISPLAYS).unwrap();

        assert_eq!(restored, set);
    }
}
