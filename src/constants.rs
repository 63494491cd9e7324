//! Codec-wide constants
//!
//! Wire-format magic numbers shared across the bit packer, mode driver, and
//! CRC framing. Nothing here is configurable; the wire format is fixed.

/// Largest message id representable by the mode-2/3 varid encoding.
pub const VARID_MAX: u16 = 32_767;

/// Continuation bit set on byte 0 of a two-byte varid.
pub const VARID_CONTINUATION_BIT: u8 = 0x80;

/// Largest id encodable in a single varid byte.
pub const VARID_ONE_BYTE_MAX: u16 = 127;

/// Byte length of a mode-3 routing header.
pub const ROUTING_HEADER_LEN: usize = 3;

/// Bit position of the priority field's high bit within routing header byte 2.
pub const ROUTING_PRIORITY_SHIFT: u8 = 6;

/// Bit position of the ack-requested flag within routing header byte 2.
pub const ROUTING_ACK_SHIFT: u8 = 5;

/// Mask covering the reserved low 5 bits of routing header byte 2.
pub const ROUTING_RESERVED_MASK: u8 = 0x1F;

/// `dest_id` value denoting broadcast.
pub const ROUTING_BROADCAST: u8 = 255;

/// Maximum decimal digits of precision a `BoundedFloat` field may declare.
pub const BOUNDED_FLOAT_MAX_PRECISION: u32 = 6;

/// Byte length of the length prefix in a framed message.
pub const FRAME_LEN_PREFIX_BYTES: usize = 2;

/// Byte length of the legacy 8-bit id used by `frame_with_id`.
pub const FRAME_LEGACY_ID_BYTES: usize = 1;
