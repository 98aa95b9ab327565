//! YAML codec for time-log blocks.
//!
//! The wire shape is a flat mapping:
//!
//! ```yaml
//! project: Acme
//! period:
//!   from: 01-06-2025
//!   to: 30-06-2025
//! June:
//!   01-06-2025:
//!   - from: 09:00
//!     to: 17:00
//!     break: 30m
//! ```
//!
//! Decoding is strict about structure (a mapping root, `project` and
//! `period` present, month sections and days of the right shape) and lenient
//! about leaves: scalar time, date and duration fields are kept as text and
//! judged later by the aggregator. Top-level keys that are neither reserved
//! nor a canonical month name are carried through unchanged.
//!
//! Encoding goes through `serde_yaml`, which indents by two spaces and never
//! emits anchors or aliases, so equal sub-trees are written out in full.

use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tl_core::{DayLog, LogDocument, MonthName, Period, TimeEntry};

/// Reserved top-level key for the project name.
pub const PROJECT_KEY: &str = "project";
/// Reserved top-level key for the reporting period.
pub const PERIOD_KEY: &str = "period";

/// The block text does not decode into a time log.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The root is not a mapping.
    #[error("time log must be a mapping at the top level")]
    NotAMapping,

    /// A reserved key is absent.
    #[error("missing required key '{0}'")]
    MissingField(&'static str),

    /// A value has the wrong shape.
    #[error("'{field}' must be {expected}")]
    InvalidShape {
        field: String,
        expected: &'static str,
    },
}

/// A decoded block: the typed document plus unrecognized top-level keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogBlock {
    pub document: LogDocument,
    /// Top-level keys that are neither reserved nor month names, in order.
    pub passthrough: Mapping,
}

impl LogBlock {
    /// Wraps a document with no passthrough keys.
    pub fn new(document: LogDocument) -> Self {
        Self {
            document,
            passthrough: Mapping::new(),
        }
    }

    /// Returns a block with the document replaced and passthrough kept.
    #[must_use]
    pub fn with_document(&self, document: LogDocument) -> Self {
        Self {
            document,
            passthrough: self.passthrough.clone(),
        }
    }
}

/// Decodes block text into a [`LogBlock`].
pub fn decode_block(text: &str) -> Result<LogBlock, DecodeError> {
    let root: Value = serde_yaml::from_str(text)?;
    let Value::Mapping(root) = root else {
        return Err(DecodeError::NotAMapping);
    };

    let mut project = None;
    let mut period = None;
    let mut document = LogDocument::default();
    let mut passthrough = Mapping::new();

    for (key, value) in root {
        let name = key.as_str().map(str::to_owned);
        match name.as_deref() {
            Some(PROJECT_KEY) => project = Some(scalar_text(PROJECT_KEY, &value)?),
            Some(PERIOD_KEY) => period = Some(decode_period(&value)?),
            Some(other) => match other.parse::<MonthName>() {
                Ok(month) => {
                    let days = decode_days(other, &value)?;
                    document.months.insert(month, days);
                }
                Err(_) => {
                    passthrough.insert(key, value);
                }
            },
            None => {
                passthrough.insert(key, value);
            }
        }
    }

    document.project = project.ok_or(DecodeError::MissingField(PROJECT_KEY))?;
    document.period = period.ok_or(DecodeError::MissingField(PERIOD_KEY))?;

    Ok(LogBlock {
        document,
        passthrough,
    })
}

/// Encodes a [`LogBlock`] as YAML text.
///
/// Key order: `project`, `period`, month sections in document order, then
/// passthrough keys.
pub fn encode_block(block: &LogBlock) -> Result<String, serde_yaml::Error> {
    let doc = &block.document;
    let mut root = Mapping::new();
    root.insert(
        Value::from(PROJECT_KEY),
        Value::String(doc.project.clone()),
    );
    root.insert(Value::from(PERIOD_KEY), serde_yaml::to_value(&doc.period)?);
    for (month, days) in &doc.months {
        root.insert(Value::from(month.as_str()), serde_yaml::to_value(days)?);
    }
    for (key, value) in &block.passthrough {
        root.insert(key.clone(), value.clone());
    }
    serde_yaml::to_string(&Value::Mapping(root))
}

fn decode_period(value: &Value) -> Result<Period, DecodeError> {
    let Value::Mapping(map) = value else {
        return Err(DecodeError::InvalidShape {
            field: PERIOD_KEY.to_string(),
            expected: "a mapping with 'from' and 'to'",
        });
    };
    Ok(Period {
        from: optional_text("period.from", map.get("from"))?.unwrap_or_default(),
        to: optional_text("period.to", map.get("to"))?.unwrap_or_default(),
    })
}

fn decode_days(month: &str, value: &Value) -> Result<DayLog, DecodeError> {
    let map = match value {
        Value::Null => return Ok(DayLog::new()),
        Value::Mapping(map) => map,
        _ => {
            return Err(DecodeError::InvalidShape {
                field: month.to_string(),
                expected: "a mapping of dates to entry lists",
            });
        }
    };

    let mut days = DayLog::new();
    for (key, value) in map {
        let date_key = scalar_text(month, key)?;
        let field = format!("{month}.{date_key}");
        let entries = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .iter()
                .map(|item| decode_entry(&field, item))
                .collect::<Result<_, _>>()?,
            _ => {
                return Err(DecodeError::InvalidShape {
                    field,
                    expected: "a list of entries",
                });
            }
        };
        days.insert(date_key, entries);
    }
    Ok(days)
}

fn decode_entry(field: &str, value: &Value) -> Result<TimeEntry, DecodeError> {
    let Value::Mapping(map) = value else {
        return Err(DecodeError::InvalidShape {
            field: field.to_string(),
            expected: "a list of entries with 'from' and 'to'",
        });
    };
    Ok(TimeEntry {
        from: optional_text(field, map.get("from"))?.unwrap_or_default(),
        to: optional_text(field, map.get("to"))?.unwrap_or_default(),
        break_time: optional_text(field, map.get("break"))?,
        note: optional_text(field, map.get("note"))?,
    })
}

/// Text of a scalar leaf. `null` and absent leaves are `None`.
fn optional_text(field: &str, value: Option<&Value>) -> Result<Option<String>, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(field, value).map(Some),
    }
}

fn scalar_text(field: &str, value: &Value) -> Result<String, DecodeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
            Err(DecodeError::InvalidShape {
                field: field.to_string(),
                expected: "a scalar",
            })
        }
    }
}
