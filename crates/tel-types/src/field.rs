use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Typed value of one record content field.
///
/// The variant set is deliberately closed: every variant has exactly one
/// fixed textual form (see [`FieldValue::canonical_text`]), which is what
/// makes record hashing reproducible across platforms. Floating-point
/// values are excluded because they have no precision-stable rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// One-byte kind tag, part of the canonical encoding.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Null => b'n',
            Self::Bool(_) => b'b',
            Self::Int(_) => b'i',
            Self::Text(_) => b't',
            Self::Timestamp(_) => b'd',
        }
    }

    /// Fixed, locale-independent textual form of the value.
    ///
    /// `Null` renders as the empty string; the kind tag keeps it distinct
    /// from `Text("")`. Timestamps always render in UTC with microsecond
    /// precision (`YYYY-MM-DDTHH:MM:SS.ssssssZ`).
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Text(s) => s.clone(),
            Self::Timestamp(ts) => canonical_timestamp(ts),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            other => write!(f, "{}", other.canonical_text()),
        }
    }
}

/// Render a timestamp in the fixed canonical form used for hashing.
pub fn canonical_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// One named field of a record's content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// Ordered set of named fields forming a record's content.
///
/// Order is significant: the same fields in a different order canonicalize
/// to different bytes and therefore hash differently. The ledger core treats
/// the fields as opaque beyond canonicalizability; what they mean is the
/// calling compliance workflow's business.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFields(Vec<Field>);

impl ContentFields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a field, builder-style.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.push(Field {
            name: name.into(),
            value,
        });
    }

    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the first field with the given name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

impl FromIterator<(String, FieldValue)> for ContentFields {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| Field { name, value })
                .collect(),
        )
    }
}
