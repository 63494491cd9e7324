//! # Message Schema and Walker
//!
//! A `MessageDescriptor` is an ordered list of `FieldDescriptor`s plus
//! optional metadata (numeric id, advisory max size). The schema walker
//! drives `FieldCodec::encode`/`decode` across that list to produce or
//! consume one message **body** — the bit-packed, byte-aligned payload that
//! every framing mode wraps.

use serde::{Deserialize, Serialize};

use crate::bits::{BitPacker, BitUnpacker};
use crate::error::CodecError;
use crate::field::{FieldDescriptor, FieldValue};

/// An ordered schema: metadata plus its fields.
///
/// Field order is part of the wire contract — reordering fields changes the
/// wire format even though the descriptor's contents are "the same".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub id: Option<u16>,
    pub max_bytes: Option<usize>,
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    /// Construct a descriptor, validating `id` against the varid range.
    pub fn new(
        id: Option<u16>,
        max_bytes: Option<usize>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, CodecError> {
        if let Some(id) = id {
            if id > crate::constants::VARID_MAX {
                return Err(CodecError::invalid_schema(format!(
                    "id {id} exceeds varid maximum of {}",
                    crate::constants::VARID_MAX
                )));
            }
        }
        Ok(Self {
            id,
            max_bytes,
            fields,
        })
    }

    /// Sum of each field's bit width — the body's exact bit length before
    /// byte padding.
    pub fn body_bits(&self) -> usize {
        self.fields.iter().map(|f| f.width() as usize).sum()
    }

    /// `ceil(body_bits / 8)` — the byte-aligned payload length.
    pub fn body_bytes(&self) -> usize {
        self.body_bits().div_ceil(8)
    }
}

/// A message's field values, in the same order as its descriptor's fields.
pub type MessageValue = Vec<FieldValue>;

/// Encode `values` against `descriptor`'s field list, in declaration order,
/// into one byte-aligned body. Fails `OversizeMessage` if the result exceeds
/// `descriptor.max_bytes`, when set.
pub fn encode_body(
    descriptor: &MessageDescriptor,
    values: &MessageValue,
) -> Result<Vec<u8>, CodecError> {
    if values.len() != descriptor.fields.len() {
        return Err(CodecError::invalid_schema(format!(
            "expected {} values, got {}",
            descriptor.fields.len(),
            values.len()
        )));
    }

    let mut packer = BitPacker::with_capacity(descriptor.body_bytes());
    for (field, value) in descriptor.fields.iter().zip(values.iter()) {
        field.encode(value, &mut packer)?;
    }
    let (bytes, _bit_len) = packer.finish();

    if let Some(max_bytes) = descriptor.max_bytes {
        if bytes.len() > max_bytes {
            return Err(CodecError::OversizeMessage(format!(
                "body of {} bytes exceeds max_bytes of {max_bytes}",
                bytes.len()
            )));
        }
    }

    Ok(bytes)
}

/// Decode a byte-aligned body against `descriptor`'s field list, in
/// declaration order. Any bits beyond the sum of field widths are ignored
/// padding.
pub fn decode_body(
    descriptor: &MessageDescriptor,
    body: &[u8],
) -> Result<MessageValue, CodecError> {
    let mut unpacker = BitUnpacker::new(body);
    let mut values = Vec::with_capacity(descriptor.fields.len());
    for field in &descriptor.fields {
        values.push(field.decode(&mut unpacker)?);
    }
    Ok(values)
}
