use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tel_types::field::canonical_timestamp;
use tel_types::ContentFields;

/// Errors from content canonicalization.
///
/// Canonicalization never fails for well-formed fields; these cover
/// malformed input and are rejected before any hash is computed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("field name is empty")]
    EmptyFieldName,

    #[error("field name {0:?} contains a NUL byte")]
    UnencodableFieldName(String),

    #[error("duplicate field name {0:?}")]
    DuplicateFieldName(String),
}

/// Encode a record's hashed content as one deterministic byte string.
///
/// The encoding is length-prefixed throughout, so it is injective: two
/// logically identical inputs always produce identical bytes, and any
/// change to the actor, the timestamp, or any field's name, value, kind,
/// or position changes the output. Layout:
///
/// ```text
/// len(actor) || actor || len(ts) || ts
/// then per field: len(name) || name || tag || len(text) || text
/// ```
///
/// where every `len` is a big-endian `u32`, `ts` is the fixed UTC
/// microsecond rendering, and `tag`/`text` come from
/// [`tel_types::FieldValue`]'s canonical forms.
pub fn canonicalize(
    actor: &str,
    timestamp: &DateTime<Utc>,
    content: &ContentFields,
) -> Result<Vec<u8>, CanonicalError> {
    let mut seen = HashSet::new();
    for field in content.fields() {
        if field.name.is_empty() {
            return Err(CanonicalError::EmptyFieldName);
        }
        if field.name.contains('\0') {
            return Err(CanonicalError::UnencodableFieldName(field.name.clone()));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(CanonicalError::DuplicateFieldName(field.name.clone()));
        }
    }

    let mut out = Vec::new();
    write_chunk(&mut out, actor.as_bytes());
    write_chunk(&mut out, canonical_timestamp(timestamp).as_bytes());
    for field in content.fields() {
        write_chunk(&mut out, field.name.as_bytes());
        out.push(field.value.tag());
        write_chunk(&mut out, field.value.canonical_text().as_bytes());
    }
    Ok(out)
}

fn write_chunk(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}
