#![no_main]

use libfuzzer_sys::fuzz_target;
use uwacomm_codec::field::{FieldDescriptor, FieldKind};
use uwacomm_codec::message::{decode_body, MessageDescriptor};

fuzz_target!(|data: &[u8]| {
    let descriptor = MessageDescriptor::new(
        None,
        None,
        vec![
            FieldDescriptor::new("a", FieldKind::UInt { lo: 0, hi: 255 }).unwrap(),
            FieldDescriptor::new("b", FieldKind::UInt { lo: 0, hi: 10000 }).unwrap(),
            FieldDescriptor::new("c", FieldKind::Enum { values: vec!["x".into(), "y".into(), "z".into()] }).unwrap(),
            FieldDescriptor::new("d", FieldKind::FixedString { len: 4 }).unwrap(),
        ],
    )
    .unwrap();

    let _ = decode_body(&descriptor, data);
});
