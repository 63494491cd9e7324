//! # uwacomm-codec — A Schema-Driven Compact Binary Codec for Acoustic Links
//!
//! `uwacomm-codec` packs structured messages into the smallest possible
//! number of bits for transport over bandwidth-constrained acoustic-modem
//! links, where every bit sent costs real time and power. A message schema
//! (a `MessageDescriptor`) declares each field's domain — a bounded integer
//! range, an enum's cardinality, a float's precision — and the codec derives
//! each field's exact bit width from that domain rather than from a fixed
//! wire type.
//!
//! ## Features
//!
//! - Bit-exact packing via `BitPacker`/`BitUnpacker`, independent of byte
//!   boundaries.
//! - Per-field codecs for bounded integers, enums, fixed-size bytes and
//!   strings, and fixed-precision bounded floats.
//! - Three wire framing modes: payload-only, self-describing (varid
//!   prefixed), and routed (routing header + varid prefixed).
//! - A process-wide message registry for decoding self-describing frames.
//! - CRC-16/CCITT-FALSE and CRC-32/IEEE framing for links that want their
//!   own error detection layer independent of the acoustic modem's.
//! - A size analyzer reporting per-field and per-mode wire footprints.
//! - A schema introspection adapter for loading schemas from JSON documents.
//! - A mock acoustic-modem transport for integration testing without
//!   hardware.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! uwacomm-codec = "0.1.0"
//! ```
//!
//! ```rust
//! use uwacomm_codec::field::{FieldDescriptor, FieldKind, FieldValue};
//! use uwacomm_codec::message::{encode_body, decode_body, MessageDescriptor};
//!
//! let descriptor = MessageDescriptor::new(
//!     Some(42),
//!     None,
//!     vec![FieldDescriptor::new("temp", FieldKind::UInt { lo: 0, hi: 100 }).unwrap()],
//! ).unwrap();
//!
//! let body = encode_body(&descriptor, &vec![FieldValue::UInt(37)]).unwrap();
//! let decoded = decode_body(&descriptor, &body).unwrap();
//! assert_eq!(decoded, vec![FieldValue::UInt(37)]);
//! ```

pub mod analyzer;
pub mod bits;
pub mod constants;
pub mod crc;
pub mod error;
pub mod field;
pub mod introspection;
pub mod logging;
pub mod message;
pub mod mode;
pub mod registry;
pub mod transport;
pub mod util;

pub use crate::error::CodecError;
pub use crate::logging::{init_logger, log_info};

pub use analyzer::{analyze, FieldReport, ModeReport, SizeReport};
pub use bits::{BitPacker, BitUnpacker};
pub use crc::{crc16_ccitt_false, crc32_ieee, frame, frame_with_id, unframe, unframe_with_id, CrcKind};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use introspection::{from_json, from_schema_source, FieldSource, SchemaSource};
pub use message::{decode_body, encode_body, MessageDescriptor, MessageValue};
pub use mode::{
    decode_mode1, decode_mode2, decode_mode3, decode_varid, encode_mode1, encode_mode2,
    encode_mode3, encode_varid, RoutingHeader,
};
pub use registry::{decode_by_id, lookup, register};
pub use transport::{ModemConfig, ModemReceiver, ModemState, MockModem};
