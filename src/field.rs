//! # Field Descriptors and Per-Field Codec
//!
//! This module defines the schema's atomic unit — a `FieldDescriptor` — and
//! the encode/decode rules for each of its kinds. Bit widths are pure
//! functions of a descriptor's parameters; no value ever changes a field's
//! width.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::bits::{BitPacker, BitUnpacker};

/// The concrete value carried by one field.
///
/// Kind-tagged rather than generic, in the crate's general style of using an
/// explicit enum for a wire-facing value rather than a type parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    UInt(u64),
    SInt(i64),
    Enum(String),
    FixedBytes(Vec<u8>),
    FixedString(String),
    Float(f64),
}

/// One field's domain constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    UInt { lo: u64, hi: u64 },
    SInt { lo: i64, hi: i64 },
    Enum { values: Vec<String> },
    FixedBytes { len: usize },
    FixedString { len: usize },
    BoundedFloat { min: f64, max: f64, precision: u32 },
}

/// An ordered, named field in a message schema.
///
/// `name` is for diagnostics only; it plays no role in the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Construct and validate a field descriptor, failing `InvalidSchema` if
    /// the parameters violate an invariant (e.g. `hi < lo`, `precision > 6`).
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Result<Self, CodecError> {
        let field = Self {
            name: name.into(),
            kind,
        };
        field.validate()?;
        Ok(field)
    }

    fn validate(&self) -> Result<(), CodecError> {
        match &self.kind {
            FieldKind::Bool => Ok(()),
            FieldKind::UInt { lo, hi } => {
                if lo > hi {
                    return Err(CodecError::invalid_schema(format!(
                        "field {:?}: UInt lo ({lo}) > hi ({hi})",
                        self.name
                    )));
                }
                Ok(())
            }
            FieldKind::SInt { lo, hi } => {
                if lo > hi {
                    return Err(CodecError::invalid_schema(format!(
                        "field {:?}: SInt lo ({lo}) > hi ({hi})",
                        self.name
                    )));
                }
                Ok(())
            }
            FieldKind::Enum { values } => {
                if values.is_empty() {
                    return Err(CodecError::invalid_schema(format!(
                        "field {:?}: Enum must declare at least one value",
                        self.name
                    )));
                }
                let mut seen = std::collections::HashSet::new();
                for v in values {
                    if !seen.insert(v) {
                        return Err(CodecError::invalid_schema(format!(
                            "field {:?}: Enum values must be distinct, duplicate {v:?}",
                            self.name
                        )));
                    }
                }
                Ok(())
            }
            FieldKind::FixedBytes { .. } | FieldKind::FixedString { .. } => Ok(()),
            FieldKind::BoundedFloat { min, max, precision } => {
                if !(min < max) {
                    return Err(CodecError::invalid_schema(format!(
                        "field {:?}: BoundedFloat min ({min}) must be < max ({max})",
                        self.name
                    )));
                }
                if *precision > crate::constants::BOUNDED_FLOAT_MAX_PRECISION {
                    return Err(CodecError::invalid_schema(format!(
                        "field {:?}: BoundedFloat precision {precision} exceeds maximum of {}",
                        self.name,
                        crate::constants::BOUNDED_FLOAT_MAX_PRECISION
                    )));
                }
                Ok(())
            }
        }
    }

    /// The effective bit width of this field, derived purely from its kind's
    /// parameters.
    pub fn width(&self) -> u32 {
        match &self.kind {
            FieldKind::Bool => 1,
            FieldKind::UInt { lo, hi } => bits_for_range(hi - lo),
            FieldKind::SInt { lo, hi } => bits_for_range((*hi as i128 - *lo as i128) as u64),
            FieldKind::Enum { values } => bits_for_range(values.len() as u64 - 1),
            FieldKind::FixedBytes { len } | FieldKind::FixedString { len } => (*len as u32) * 8,
            FieldKind::BoundedFloat { min, max, precision } => {
                let scale = 10f64.powi(*precision as i32);
                let steps = ((max - min) * scale).round() as u64;
                bits_for_range(steps)
            }
        }
    }

    /// Encode `value` into `packer`. Fails `OutOfRange` if the value is not a
    /// legal member of this field's domain, `InvalidSchema` (programmer
    /// error) if `value`'s variant does not match the field's kind.
    pub fn encode(&self, value: &FieldValue, packer: &mut BitPacker) -> Result<(), CodecError> {
        let w = self.width();
        match (&self.kind, value) {
            (FieldKind::Bool, FieldValue::Bool(b)) => packer.write(*b as u64, 1),
            (FieldKind::UInt { lo, hi }, FieldValue::UInt(v)) => {
                if v < lo || v > hi {
                    return Err(CodecError::out_of_range(format!(
                        "field {:?}: {v} not in [{lo}, {hi}]",
                        self.name
                    )));
                }
                packer.write(v - lo, w)
            }
            (FieldKind::SInt { lo, hi }, FieldValue::SInt(v)) => {
                if v < lo || v > hi {
                    return Err(CodecError::out_of_range(format!(
                        "field {:?}: {v} not in [{lo}, {hi}]",
                        self.name
                    )));
                }
                packer.write((v - lo) as u64, w)
            }
            (FieldKind::Enum { values }, FieldValue::Enum(sym)) => {
                let idx = values.iter().position(|s| s == sym).ok_or_else(|| {
                    CodecError::out_of_range(format!(
                        "field {:?}: {sym:?} is not a declared enum value",
                        self.name
                    ))
                })?;
                packer.write(idx as u64, w)
            }
            (FieldKind::FixedBytes { len }, FieldValue::FixedBytes(b)) => {
                if b.len() > *len {
                    return Err(CodecError::out_of_range(format!(
                        "field {:?}: {} bytes exceeds declared length {len}",
                        self.name,
                        b.len()
                    )));
                }
                let mut padded = b.clone();
                padded.resize(*len, 0);
                for byte in padded {
                    packer.write(byte as u64, 8)?;
                }
                Ok(())
            }
            (FieldKind::FixedString { len }, FieldValue::FixedString(s)) => {
                let encoded = s.as_bytes();
                if encoded.len() > *len {
                    return Err(CodecError::out_of_range(format!(
                        "field {:?}: encoded length {} exceeds declared length {len}",
                        self.name,
                        encoded.len()
                    )));
                }
                let mut padded = encoded.to_vec();
                padded.resize(*len, 0);
                for byte in padded {
                    packer.write(byte as u64, 8)?;
                }
                Ok(())
            }
            (FieldKind::BoundedFloat { min, max, precision }, FieldValue::Float(v)) => {
                if *v < *min || *v > *max {
                    return Err(CodecError::out_of_range(format!(
                        "field {:?}: {v} not in [{min}, {max}]",
                        self.name
                    )));
                }
                let scale = 10f64.powi(*precision as i32);
                let s = round_half_to_even((v - min) * scale);
                packer.write(s as u64, w)
            }
            _ => Err(CodecError::invalid_schema(format!(
                "field {:?}: value does not match declared kind",
                self.name
            ))),
        }
    }

    /// Decode this field's value from `unpacker`.
    pub fn decode(&self, unpacker: &mut BitUnpacker) -> Result<FieldValue, CodecError> {
        let w = self.width();
        match &self.kind {
            FieldKind::Bool => Ok(FieldValue::Bool(unpacker.read(1)? != 0)),
            FieldKind::UInt { lo, .. } => Ok(FieldValue::UInt(unpacker.read(w)? + lo)),
            FieldKind::SInt { lo, .. } => {
                let raw = unpacker.read(w)? as i64;
                Ok(FieldValue::SInt(raw + lo))
            }
            FieldKind::Enum { values } => {
                let idx = unpacker.read(w)? as usize;
                values
                    .get(idx)
                    .map(|s| FieldValue::Enum(s.clone()))
                    .ok_or_else(|| {
                        CodecError::corrupt(format!(
                            "field {:?}: enum index {idx} out of range (cardinality {})",
                            self.name,
                            values.len()
                        ))
                    })
            }
            FieldKind::FixedBytes { len } => {
                let mut out = Vec::with_capacity(*len);
                for _ in 0..*len {
                    out.push(unpacker.read(8)? as u8);
                }
                Ok(FieldValue::FixedBytes(out))
            }
            FieldKind::FixedString { len } => {
                let mut raw = Vec::with_capacity(*len);
                for _ in 0..*len {
                    raw.push(unpacker.read(8)? as u8);
                }
                while raw.last() == Some(&0) {
                    raw.pop();
                }
                let s = String::from_utf8(raw).map_err(|e| {
                    CodecError::corrupt(format!(
                        "field {:?}: invalid UTF-8 ({e})",
                        self.name
                    ))
                })?;
                Ok(FieldValue::FixedString(s))
            }
            FieldKind::BoundedFloat { min, precision, .. } => {
                let s = unpacker.read(w)?;
                let scale = 10f64.powi(*precision as i32);
                Ok(FieldValue::Float(min + s as f64 / scale))
            }
        }
    }
}

/// Number of bits needed to represent `0..=span` inclusive, i.e.
/// `ceil(log2(span + 1))`, with the degenerate case `span == 0` giving 0.
fn bits_for_range(span: u64) -> u32 {
    if span == 0 {
        return 0;
    }
    // Number of values is span + 1; width is ceil(log2(span + 1)).
    let count = span as u128 + 1;
    128 - (count - 1).leading_zeros()
}

/// Round-half-to-even ("banker's rounding") to the nearest integer, so
/// encoders on different platforms agree on values that fall exactly on a
/// half-step.
fn round_half_to_even(x: f64) -> i64 {
    let floor = x.floor();
    let diff = x - floor;
    let floor_i = floor as i64;
    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}
