#![no_main]

use libfuzzer_sys::fuzz_target;
use stamps_protocol::TimestampRecord;

fuzz_target!(|data: &[u8]| {
    if let Ok(records) = TimestampRecord::list_from_json(data) {
        for record in &records {
            // decoding never yields an empty transaction id
            assert!(!record.transaction_id().as_str().is_empty());
        }

        let json = serde_json::to_vec(&records).unwrap();
        let again = TimestampRecord::list_from_json(&json).unwrap();
        assert_eq!(records, again);
    }
});
