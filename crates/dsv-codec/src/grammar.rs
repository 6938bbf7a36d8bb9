//! Line-level grammar: parsing and serializing delimited records.
//!
//! RFC 4180 semantics with a configurable delimiter and enclosure. A field
//! wrapped in the enclosure character may contain literal delimiters, and a
//! doubled enclosure inside it stands for one literal enclosure character.
//!
//! The codec is strictly line-oriented: a quoted field cannot span physical
//! lines. An enclosure still open at the end of a line is rejected as
//! malformed rather than silently accepted, and anything other than a
//! delimiter after a closing enclosure is rejected the same way.

use std::fmt;

use crate::config::FormatConfig;

/// Why a physical line failed to parse into a field sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParseRecordError {
    /// An enclosure was opened but never closed before end of line.
    UnterminatedEnclosure,
    /// A closing enclosure was followed by something other than the
    /// delimiter or end of line.
    TrailingAfterEnclosure(char),
}

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedEnclosure => write!(f, "unterminated enclosure"),
            Self::TrailingAfterEnclosure(ch) => {
                write!(f, "unexpected {ch:?} after closing enclosure")
            }
        }
    }
}

/// Parser position within the current field.
enum FieldState {
    /// At the start of a field, nothing consumed yet.
    Start,
    /// Inside an unquoted field.
    Unquoted,
    /// Inside an enclosed field.
    Quoted,
    /// Just consumed an enclosure character while inside an enclosed
    /// field; it either closes the field or, doubled, escapes itself.
    QuoteInQuoted,
}

/// Parse one physical line into its field sequence.
///
/// The caller is responsible for stripping the line terminator and for
/// skipping entirely empty lines; an empty input here parses as a single
/// empty field.
pub(crate) fn parse_record(
    line: &str,
    config: &FormatConfig,
) -> Result<Vec<String>, ParseRecordError> {
    let delimiter = config.delimiter;
    let enclosure = config.enclosure;

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut state = FieldState::Start;

    for ch in line.chars() {
        state = match state {
            FieldState::Start => {
                if ch == enclosure {
                    FieldState::Quoted
                } else if ch == delimiter {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                } else {
                    field.push(ch);
                    FieldState::Unquoted
                }
            }
            FieldState::Unquoted => {
                if ch == delimiter {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                } else {
                    field.push(ch);
                    FieldState::Unquoted
                }
            }
            FieldState::Quoted => {
                if ch == enclosure {
                    FieldState::QuoteInQuoted
                } else {
                    field.push(ch);
                    FieldState::Quoted
                }
            }
            FieldState::QuoteInQuoted => {
                if ch == enclosure {
                    // Doubled enclosure: one literal enclosure character.
                    field.push(enclosure);
                    FieldState::Quoted
                } else if ch == delimiter {
                    fields.push(std::mem::take(&mut field));
                    FieldState::Start
                } else {
                    return Err(ParseRecordError::TrailingAfterEnclosure(ch));
                }
            }
        };
    }

    match state {
        FieldState::Quoted => Err(ParseRecordError::UnterminatedEnclosure),
        FieldState::Start | FieldState::Unquoted | FieldState::QuoteInQuoted => {
            fields.push(field);
            Ok(fields)
        }
    }
}

/// Serialize a field sequence as one line, without the terminator.
///
/// A field is wrapped in the enclosure iff it contains the delimiter, the
/// enclosure itself, or a line terminator; embedded enclosures are doubled.
pub(crate) fn format_record<S: AsRef<str>>(fields: &[S], config: &FormatConfig) -> String {
    let mut line = String::new();
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            line.push(config.delimiter);
        }
        let field = field.as_ref();
        if needs_enclosure(field, config) {
            line.push(config.enclosure);
            for ch in field.chars() {
                if ch == config.enclosure {
                    line.push(config.enclosure);
                }
                line.push(ch);
            }
            line.push(config.enclosure);
        } else {
            line.push_str(field);
        }
    }
    line
}

fn needs_enclosure(field: &str, config: &FormatConfig) -> bool {
    field
        .chars()
        .any(|ch| ch == config.delimiter || ch == config.enclosure || ch == '\n' || ch == '\r')
}
