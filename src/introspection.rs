//! # Schema Introspection Adapter
//!
//! The codec never reads schema files directly; `MessageDescriptor`s are
//! built programmatically or loaded through this adapter, the stand-in for
//! whatever external schema-definition front end a deployment uses. A
//! `SchemaSource` is a serde-deserializable JSON document with the same
//! shape a `MessageDescriptor` already derives, kept as a distinct type so
//! the wire schema's validation rules are re-applied on every load rather
//! than trusted from the document.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::field::{FieldDescriptor, FieldKind};
use crate::message::MessageDescriptor;

/// One field as it appears in a schema source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSource {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// A message schema as it appears in a schema source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSource {
    pub id: Option<u16>,
    pub max_bytes: Option<usize>,
    pub fields: Vec<FieldSource>,
}

/// Build a validated `MessageDescriptor` from a `SchemaSource`.
///
/// Every field and the message as a whole are re-validated through the same
/// constructors a caller building a descriptor by hand would use, so a
/// malformed document fails `InvalidSchema` exactly as a malformed
/// programmatic call would.
pub fn from_schema_source(source: SchemaSource) -> Result<MessageDescriptor, CodecError> {
    let fields = source
        .fields
        .into_iter()
        .map(|f| FieldDescriptor::new(f.name, f.kind))
        .collect::<Result<Vec<_>, _>>()?;
    MessageDescriptor::new(source.id, source.max_bytes, fields)
}

/// Parse a `SchemaSource` from a JSON string and build a `MessageDescriptor`.
pub fn from_json(json: &str) -> Result<MessageDescriptor, CodecError> {
    let source: SchemaSource = serde_json::from_str(json)
        .map_err(|e| CodecError::invalid_schema(format!("malformed schema document: {e}")))?;
    from_schema_source(source)
}
