//! # Mode Driver
//!
//! Three wire framing conventions layered on top of a message body:
//!
//! - Mode 1 (point-to-point): the body alone.
//! - Mode 2 (self-describing): `varid(id) | body`.
//! - Mode 3 (routed): `routing_header | varid(id) | body`.
//!
//! Mode is never carried on the wire; sender and receiver must agree on it
//! out of band. Decoding uses `nom` combinators for binary frame parsing.

use nom::number::complete::be_u8;
use nom::IResult;

use crate::constants::{
    ROUTING_ACK_SHIFT, ROUTING_HEADER_LEN, ROUTING_PRIORITY_SHIFT, ROUTING_RESERVED_MASK,
    VARID_CONTINUATION_BIT, VARID_MAX, VARID_ONE_BYTE_MAX,
};
use crate::error::CodecError;

/// The mode-3 routing header: 3 bytes of addressing and priority metadata
/// prepended ahead of the varid and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingHeader {
    pub source_id: u8,
    pub dest_id: u8,
    pub priority: u8,
    pub ack_requested: bool,
}

impl RoutingHeader {
    /// Construct a routing header, validating `priority` fits in 2 bits.
    pub fn new(
        source_id: u8,
        dest_id: u8,
        priority: u8,
        ack_requested: bool,
    ) -> Result<Self, CodecError> {
        if priority > 3 {
            return Err(CodecError::out_of_range(format!(
                "priority {priority} exceeds 2-bit range [0, 3]"
            )));
        }
        Ok(Self {
            source_id,
            dest_id,
            priority,
            ack_requested,
        })
    }

    /// Encode to the fixed 3-byte wire form.
    pub fn encode(&self) -> [u8; ROUTING_HEADER_LEN] {
        let byte2 = (self.priority << ROUTING_PRIORITY_SHIFT)
            | ((self.ack_requested as u8) << ROUTING_ACK_SHIFT);
        [self.source_id, self.dest_id, byte2]
    }

    /// Parse the fixed 3-byte wire form. The reserved low 5 bits of byte 2
    /// are ignored on decode.
    fn parse(input: &[u8]) -> IResult<&[u8], RoutingHeader> {
        let (input, source_id) = be_u8(input)?;
        let (input, dest_id) = be_u8(input)?;
        let (input, byte2) = be_u8(input)?;
        let _reserved = byte2 & ROUTING_RESERVED_MASK;
        let priority = (byte2 >> ROUTING_PRIORITY_SHIFT) & 0x03;
        let ack_requested = (byte2 >> ROUTING_ACK_SHIFT) & 0x01 != 0;
        Ok((
            input,
            RoutingHeader {
                source_id,
                dest_id,
                priority,
                ack_requested,
            },
        ))
    }
}

/// Encode a message id in `[0, 32767]` as a 1- or 2-byte varid.
///
/// Ids `<= 127` encode as one byte `0xxxxxxx`; larger ids set the
/// continuation bit on byte 0 and carry the remaining 15 bits big-endian.
pub fn encode_varid(id: u16) -> Result<Vec<u8>, CodecError> {
    if id > VARID_MAX {
        return Err(CodecError::out_of_range(format!(
            "message id {id} exceeds varid maximum of {VARID_MAX}"
        )));
    }
    if id <= VARID_ONE_BYTE_MAX {
        Ok(vec![id as u8])
    } else {
        let hi = VARID_CONTINUATION_BIT | ((id >> 8) as u8 & 0x7F);
        let lo = (id & 0xFF) as u8;
        Ok(vec![hi, lo])
    }
}

/// Parse a varid from the front of `input`, returning the id and the
/// remaining bytes.
pub fn decode_varid(input: &[u8]) -> Result<(u16, &[u8]), CodecError> {
    match parse_varid(input) {
        Ok((rest, id)) => Ok((id, rest)),
        Err(_) => Err(CodecError::corrupt("malformed varid: input too short")),
    }
}

fn parse_varid(input: &[u8]) -> IResult<&[u8], u16> {
    let (input, first) = be_u8(input)?;
    if first & VARID_CONTINUATION_BIT == 0 {
        Ok((input, first as u16))
    } else {
        let (input, second) = be_u8(input)?;
        let id = (((first & 0x7F) as u16) << 8) | second as u16;
        Ok((input, id))
    }
}

/// Mode 1: wire bytes are exactly the body.
pub fn encode_mode1(body: &[u8]) -> Vec<u8> {
    body.to_vec()
}

/// Mode 1 decode is the identity; kept for symmetry with modes 2/3.
pub fn decode_mode1(wire: &[u8]) -> &[u8] {
    wire
}

/// Mode 2: `varid(id) | body`.
pub fn encode_mode2(id: u16, body: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = encode_varid(id)?;
    out.extend_from_slice(body);
    Ok(out)
}

/// Mode 2 decode: split the leading varid from the body.
pub fn decode_mode2(wire: &[u8]) -> Result<(u16, &[u8]), CodecError> {
    decode_varid(wire)
}

/// Mode 3: `routing_header | varid(id) | body`.
pub fn encode_mode3(
    routing: &RoutingHeader,
    id: u16,
    body: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(ROUTING_HEADER_LEN + 2 + body.len());
    out.extend_from_slice(&routing.encode());
    out.extend(encode_varid(id)?);
    out.extend_from_slice(body);
    Ok(out)
}

/// Mode 3 decode: split the routing header, the varid, and the body.
pub fn decode_mode3(wire: &[u8]) -> Result<(RoutingHeader, u16, &[u8]), CodecError> {
    if wire.len() < ROUTING_HEADER_LEN {
        return Err(CodecError::truncated(
            "mode-3 wire bytes shorter than the 3-byte routing header",
        ));
    }
    let (rest, routing) = RoutingHeader::parse(wire)
        .map_err(|_| CodecError::truncated("failed to parse routing header"))?;
    let (id, body) = decode_varid(rest)?;
    Ok((routing, id, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varid_boundary_lengths() {
        assert_eq!(encode_varid(0).unwrap().len(), 1);
        assert_eq!(encode_varid(127).unwrap().len(), 1);
        assert_eq!(encode_varid(128).unwrap().len(), 2);
        assert_eq!(encode_varid(32767).unwrap().len(), 2);
    }

    #[test]
    fn varid_overflow_rejected() {
        assert!(encode_varid(32768).is_err());
    }

    #[test]
    fn varid_200_encodes_expected_bytes() {
        let bytes = encode_varid(200).unwrap();
        assert_eq!(bytes, vec![0x80, 0xC8]);
    }

    #[test]
    fn varid_round_trips() {
        for id in [0u16, 1, 127, 128, 200, 32767] {
            let bytes = encode_varid(id).unwrap();
            let (decoded, rest) = decode_varid(&bytes).unwrap();
            assert_eq!(decoded, id);
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn mode2_empty_body_encodes_bare_varid() {
        let wire = encode_mode2(42, &[]).unwrap();
        assert_eq!(wire, vec![0x2A]);
    }

    #[test]
    fn mode3_encodes_header_varid_and_body() {
        let routing = RoutingHeader::new(3, 0, 2, true).unwrap();
        let wire = encode_mode3(&routing, 10, &[]).unwrap();
        assert_eq!(wire, vec![0x03, 0x00, 0xA0, 0x0A]);

        let (decoded_routing, id, body) = decode_mode3(&wire).unwrap();
        assert_eq!(decoded_routing, routing);
        assert_eq!(id, 10);
        assert!(body.is_empty());
    }

    #[test]
    fn mode3_ignores_reserved_bits_on_decode() {
        let wire = vec![0x03, 0x00, 0xA3, 0x0A]; // low 3 reserved bits set
        let (routing, id, body) = decode_mode3(&wire).unwrap();
        assert_eq!(routing.priority, 2);
        assert!(routing.ack_requested);
        assert_eq!(id, 10);
        assert!(body.is_empty());
    }

    #[test]
    fn mode_prefix_independence() {
        let body = vec![0xAA, 0xBB, 0xCC];
        let mode1 = encode_mode1(&body);
        let mode2 = encode_mode2(42, &body).unwrap();
        let routing = RoutingHeader::new(1, 2, 0, false).unwrap();
        let mode3 = encode_mode3(&routing, 42, &body).unwrap();

        assert!(mode2.ends_with(&mode1));
        assert!(mode3.ends_with(&mode1));
    }

    #[test]
    fn priority_out_of_range_rejected() {
        assert!(RoutingHeader::new(0, 0, 4, false).is_err());
    }

    #[test]
    fn mode3_truncated_input_fails() {
        assert!(decode_mode3(&[0x01, 0x02]).is_err());
    }
}
