#![no_main]

use libfuzzer_sys::fuzz_target;
use uwacomm_codec::crc::{unframe, CrcKind};

fuzz_target!(|data: &[u8]| {
    let _ = unframe(data, CrcKind::Crc16);
    let _ = unframe(data, CrcKind::Crc32);
});
