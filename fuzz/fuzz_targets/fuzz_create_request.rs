#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stamps_protocol::CreateTimestamp;

#[derive(Arbitrary, Debug)]
struct FuzzCreate {
    name: String,
    data: String,
}

fuzz_target!(|input: FuzzCreate| {
    let Ok(request) = CreateTimestamp::new(input.name, input.data) else {
        return;
    };

    assert!(!request.name().is_empty());
    assert_eq!(request.data().len(), 64);

    let json = serde_json::to_vec(&request).unwrap();
    let decoded: CreateTimestamp = serde_json::from_slice(&json).unwrap();
    assert!(decoded.validate().is_ok());
    assert_eq!(request, decoded);
});
