//! # Size Analyzer
//!
//! Pure, side-effect-free reporting over a `MessageDescriptor`: per-field bit
//! widths, the body's packed size, and the total wire size under each framing
//! mode. Used by the `uwacomm-analyze` CLI and available to callers who want
//! to check a schema's footprint before registering it.

use serde::Serialize;

use crate::constants::ROUTING_HEADER_LEN;
use crate::crc::CrcKind;
use crate::message::MessageDescriptor;

/// Bit width contributed by one field, keyed by its declared name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub bits: u32,
}

/// Wire size of a message under one framing mode, including the two-byte
/// length prefix and CRC that `crc::frame` would add if the body were sent
/// over a checksummed link.
#[derive(Debug, Clone, Serialize)]
pub struct ModeReport {
    pub mode: &'static str,
    pub header_bytes: usize,
    pub body_bytes: usize,
    pub framed_bytes: usize,
}

/// A full size breakdown of one message schema.
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub fields: Vec<FieldReport>,
    pub body_bits: usize,
    pub body_bytes: usize,
    pub max_bytes: Option<usize>,
    pub modes: Vec<ModeReport>,
    pub exceeds_max: bool,
}

/// Bytes a varid would occupy for `id`, without validating range (callers
/// are expected to have already constructed a valid `MessageDescriptor`).
fn varid_bytes(id: u16) -> usize {
    if id <= crate::constants::VARID_ONE_BYTE_MAX {
        1
    } else {
        2
    }
}

/// Compute a full size report for `descriptor`.
///
/// `id` is the numeric id to assume for modes 2/3 (mode-2/3 header sizes
/// depend on whether the varid fits in one or two bytes); pass
/// `descriptor.id` when available, or a representative id otherwise.
pub fn analyze(descriptor: &MessageDescriptor, id: u16, crc: CrcKind) -> SizeReport {
    let fields = descriptor
        .fields
        .iter()
        .map(|f| FieldReport {
            name: f.name.clone(),
            bits: f.width(),
        })
        .collect();

    let body_bits = descriptor.body_bits();
    let body_bytes = descriptor.body_bytes();
    let crc_bytes = match crc {
        CrcKind::Crc16 => 2,
        CrcKind::Crc32 => 4,
    };
    let frame_overhead = 2 + crc_bytes; // length prefix + CRC, see crc::frame

    let varid_len = varid_bytes(id);
    let modes = vec![
        ModeReport {
            mode: "mode1",
            header_bytes: 0,
            body_bytes,
            framed_bytes: frame_overhead + body_bytes,
        },
        ModeReport {
            mode: "mode2",
            header_bytes: varid_len,
            body_bytes,
            framed_bytes: frame_overhead + varid_len + body_bytes,
        },
        ModeReport {
            mode: "mode3",
            header_bytes: ROUTING_HEADER_LEN + varid_len,
            body_bytes,
            framed_bytes: frame_overhead + ROUTING_HEADER_LEN + varid_len + body_bytes,
        },
    ];

    let exceeds_max = descriptor
        .max_bytes
        .map(|max| body_bytes > max)
        .unwrap_or(false);

    SizeReport {
        fields,
        body_bits,
        body_bytes,
        max_bytes: descriptor.max_bytes,
        modes,
        exceeds_max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldKind};

    fn sample() -> MessageDescriptor {
        MessageDescriptor::new(
            Some(42),
            Some(4),
            vec![
                FieldDescriptor::new("a", FieldKind::UInt { lo: 0, hi: 255 }).unwrap(),
                FieldDescriptor::new("b", FieldKind::UInt { lo: 0, hi: 10000 }).unwrap(),
                FieldDescriptor::new("c", FieldKind::UInt { lo: 0, hi: 100 }).unwrap(),
                FieldDescriptor::new("d", FieldKind::Bool).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn reports_exact_body_size() {
        let report = analyze(&sample(), 42, CrcKind::Crc16);
        assert_eq!(report.body_bits, 30);
        assert_eq!(report.body_bytes, 4);
        assert_eq!(report.fields.len(), 4);
        assert!(!report.exceeds_max);
    }

    #[test]
    fn mode_header_sizes_reflect_varid_width() {
        let report = analyze(&sample(), 42, CrcKind::Crc16);
        let mode1 = report.modes.iter().find(|m| m.mode == "mode1").unwrap();
        let mode2 = report.modes.iter().find(|m| m.mode == "mode2").unwrap();
        let mode3 = report.modes.iter().find(|m| m.mode == "mode3").unwrap();

        assert_eq!(mode1.header_bytes, 0);
        assert_eq!(mode2.header_bytes, 1); // id 42 fits in one byte
        assert_eq!(mode3.header_bytes, ROUTING_HEADER_LEN + 1);
        assert!(mode3.framed_bytes > mode2.framed_bytes);
        assert!(mode2.framed_bytes > mode1.framed_bytes);
    }

    #[test]
    fn flags_when_body_exceeds_max_bytes() {
        let mut d = sample();
        d.max_bytes = Some(1);
        let report = analyze(&d, 42, CrcKind::Crc16);
        assert!(report.exceeds_max);
    }

    #[test]
    fn two_byte_varid_widens_mode2_and_mode3_headers() {
        let report = analyze(&sample(), 200, CrcKind::Crc32);
        let mode2 = report.modes.iter().find(|m| m.mode == "mode2").unwrap();
        assert_eq!(mode2.header_bytes, 2);
    }
}
