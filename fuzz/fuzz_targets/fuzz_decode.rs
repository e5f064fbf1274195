#![no_main]
use libfuzzer_sys::fuzz_target;
use zenppm::{DecodeRequest, Limits, SamplePolicy};

fuzz_target!(|data: &[u8]| {
    // Slice and streaming paths must never panic
    let _ = zenppm::decode(data, enough::Unstoppable);
    let _ = zenppm::decode_reader(data, enough::Unstoppable);
    let _ = zenppm::Header::from_bytes(data);

    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    for policy in [SamplePolicy::Clamp, SamplePolicy::Wrap] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_sample_policy(policy)
            .decode(enough::Unstoppable);
    }
});
