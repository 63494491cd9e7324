#![no_main]

use libfuzzer_sys::fuzz_target;
use uwacomm_codec::mode::{decode_mode2, decode_mode3};

fuzz_target!(|data: &[u8]| {
    let _ = decode_mode2(data);
    let _ = decode_mode3(data);
});
