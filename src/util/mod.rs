//! # Utility Modules
//!
//! Hex encoding/decoding and rate-limited logging helpers shared by the
//! codec, the size analyzer, and the mock acoustic-modem transport.

pub mod hex;
pub mod logging;

pub use hex::{decode_hex, encode_hex, format_hex_compact, hex_to_bytes, pretty_hex};
pub use logging::{log_frame_hex, log_frame_structured, LogThrottle, ThrottleManager};
