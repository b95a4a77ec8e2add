#![no_main]

use libfuzzer_sys::fuzz_target;
use sierra_record_id::{RecordId, ValidationOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(id) = input.parse::<RecordId>() else {
        return;
    };
    if id.validate(&ValidationOptions::default()).is_ok() {
        // The canonical form of a valid id parses to the same id.
        let again = RecordId::parse(id.kind(), id.as_str()).expect("canonical form must parse");
        assert_eq!(again, id);
    }
});
