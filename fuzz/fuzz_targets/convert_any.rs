#![no_main]

use libfuzzer_sys::fuzz_target;
use sierra_record_id::{convert, ConvertOptions, RecordIdKind};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let to = RecordIdKind::ALL[usize::from(selector) % RecordIdKind::ALL.len()];
    let options = ConvertOptions::new()
        .with_record_type_code('b')
        .with_api_host("fuzz.example.edu")
        .with_initial_period(selector & 0x80 != 0);
    // Errors are fine; panics are not.
    let _ = convert(input, None, to, &options);
});
