//! # CRC and Framing
//!
//! Two independent CRCs, built on the `crc` crate's table-driven engines,
//! a required core dependency since framing needs it unconditionally:
//!
//! - CRC-16/CCITT-FALSE (poly `0x1021`, init `0xFFFF`, no reflection, xorout `0x0000`).
//! - CRC-32/IEEE a.k.a. ISO-HDLC (poly `0x04C11DB7` reflected, init/xorout all-ones,
//!   both reflected).
//!
//! `frame`/`unframe` wrap a payload with a 16-bit big-endian length prefix and
//! a trailing CRC; `frame_with_id`/`unframe_with_id` additionally carry a
//! legacy 8-bit message id between the length and the payload, distinct from
//! the mode-2 varid.

use crc::{Crc, CRC_16_IBM_3740, CRC_32_ISO_HDLC};

use crate::constants::{FRAME_LEGACY_ID_BYTES, FRAME_LEN_PREFIX_BYTES};
use crate::error::CodecError;

static CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_3740);
static CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Which CRC a framed message is protected with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcKind {
    Crc16,
    Crc32,
}

impl CrcKind {
    fn len(self) -> usize {
        match self {
            CrcKind::Crc16 => 2,
            CrcKind::Crc32 => 4,
        }
    }
}

/// CRC-16/CCITT-FALSE of `data`.
pub fn crc16_ccitt_false(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// CRC-32/IEEE (ISO-HDLC) of `data`.
pub fn crc32_ieee(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

fn crc_bytes(kind: CrcKind, payload: &[u8]) -> Vec<u8> {
    match kind {
        CrcKind::Crc16 => crc16_ccitt_false(payload).to_be_bytes().to_vec(),
        CrcKind::Crc32 => crc32_ieee(payload).to_be_bytes().to_vec(),
    }
}

/// Wrap `payload` as `len_be16 | payload | crc`. Fails `OversizeMessage` if
/// `payload` is longer than a 16-bit length field can represent.
pub fn frame(payload: &[u8], kind: CrcKind) -> Result<Vec<u8>, CodecError> {
    if payload.len() > u16::MAX as usize {
        return Err(CodecError::OversizeMessage(format!(
            "payload of {} bytes exceeds the 16-bit length prefix",
            payload.len()
        )));
    }

    let mut out = Vec::with_capacity(FRAME_LEN_PREFIX_BYTES + payload.len() + kind.len());
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out.extend(crc_bytes(kind, payload));
    Ok(out)
}

/// Invert `frame`: validate the length against available bytes, check the
/// CRC, and return the payload.
pub fn unframe(wire: &[u8], kind: CrcKind) -> Result<Vec<u8>, CodecError> {
    if wire.len() < FRAME_LEN_PREFIX_BYTES {
        return Err(CodecError::truncated("frame shorter than the length prefix"));
    }
    let len = u16::from_be_bytes([wire[0], wire[1]]) as usize;
    let crc_len = kind.len();
    let needed = FRAME_LEN_PREFIX_BYTES + len + crc_len;
    if wire.len() < needed {
        return Err(CodecError::truncated(format!(
            "frame declares {len} payload bytes but only {} bytes are available",
            wire.len().saturating_sub(FRAME_LEN_PREFIX_BYTES + crc_len)
        )));
    }

    let payload = &wire[FRAME_LEN_PREFIX_BYTES..FRAME_LEN_PREFIX_BYTES + len];
    let crc_field = &wire[FRAME_LEN_PREFIX_BYTES + len..needed];

    match kind {
        CrcKind::Crc16 => {
            let expected = u16::from_be_bytes([crc_field[0], crc_field[1]]);
            let calculated = crc16_ccitt_false(payload);
            if expected != calculated {
                return Err(CodecError::BadChecksum {
                    expected: expected as u32,
                    calculated: calculated as u32,
                });
            }
        }
        CrcKind::Crc32 => {
            let expected = u32::from_be_bytes([
                crc_field[0],
                crc_field[1],
                crc_field[2],
                crc_field[3],
            ]);
            let calculated = crc32_ieee(payload);
            if expected != calculated {
                return Err(CodecError::BadChecksum {
                    expected,
                    calculated,
                });
            }
        }
    }

    Ok(payload.to_vec())
}

/// Like `frame`, but places an 8-bit legacy message id between the length
/// and the payload. Distinct from the mode-2 varid, for legacy uses only.
pub fn frame_with_id(id: u8, payload: &[u8], kind: CrcKind) -> Result<Vec<u8>, CodecError> {
    let mut tagged = Vec::with_capacity(FRAME_LEGACY_ID_BYTES + payload.len());
    tagged.push(id);
    tagged.extend_from_slice(payload);
    frame(&tagged, kind)
}

/// Invert `frame_with_id`, returning the legacy id and the payload.
pub fn unframe_with_id(wire: &[u8], kind: CrcKind) -> Result<(u8, Vec<u8>), CodecError> {
    let tagged = unframe(wire, kind)?;
    if tagged.is_empty() {
        return Err(CodecError::truncated("framed payload missing legacy id byte"));
    }
    Ok((tagged[0], tagged[1..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_reference_vector() {
        // CRC-16/CCITT-FALSE("123456789") = 0x29B1, the catalog's standard check value.
        assert_eq!(crc16_ccitt_false(b"123456789"), 0x29B1);
    }

    #[test]
    fn crc32_reference_vectors() {
        assert_eq!(crc32_ieee(b""), 0x0000_0000);
        assert_eq!(crc32_ieee(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn frame_unframe_round_trip() {
        let payload = b"hello acoustic link";
        let wire = frame(payload, CrcKind::Crc16).unwrap();
        let decoded = unframe(&wire, CrcKind::Crc16).unwrap();
        assert_eq!(decoded, payload);

        let wire32 = frame(payload, CrcKind::Crc32).unwrap();
        let decoded32 = unframe(&wire32, CrcKind::Crc32).unwrap();
        assert_eq!(decoded32, payload);
    }

    #[test]
    fn crc32_empty_payload_frame() {
        let wire = frame(b"", CrcKind::Crc32).unwrap();
        assert_eq!(&wire[0..2], &[0x00, 0x00]); // len = 0
        assert_eq!(&wire[2..], &0u32.to_be_bytes()); // crc("") = 0
    }

    #[test]
    fn single_bit_flip_caught_by_crc() {
        let payload = b"underwater acoustic modems are slow";
        let wire = frame(payload, CrcKind::Crc16).unwrap();

        for bit in 0..(wire.len() * 8) {
            let byte_idx = bit / 8;
            // Don't flip bits inside the length prefix; a corrupted length
            // is a Truncated/OutOfRange failure, not a checksum failure.
            if byte_idx < FRAME_LEN_PREFIX_BYTES {
                continue;
            }
            let mut corrupted = wire.clone();
            corrupted[byte_idx] ^= 1 << (bit % 8);
            let result = unframe(&corrupted, CrcKind::Crc16);
            assert!(
                matches!(result, Err(CodecError::BadChecksum { .. })),
                "bit {bit} flip was not caught"
            );
        }
    }

    #[test]
    fn truncated_frame_fails() {
        let wire = frame(b"short", CrcKind::Crc16).unwrap();
        assert!(matches!(
            unframe(&wire[..wire.len() - 1], CrcKind::Crc16),
            Err(CodecError::Truncated(_))
        ));
    }

    #[test]
    fn frame_with_id_round_trip() {
        let wire = frame_with_id(7, b"payload", CrcKind::Crc32).unwrap();
        let (id, payload) = unframe_with_id(&wire, CrcKind::Crc32).unwrap();
        assert_eq!(id, 7);
        assert_eq!(payload, b"payload");
    }
}
