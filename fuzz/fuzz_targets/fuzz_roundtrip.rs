#![no_main]
use libfuzzer_sys::fuzz_target;
use zenppm::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding in either format must give the same pixels back
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    for format in [PpmFormat::Ascii, PpmFormat::Binary] {
        let header = decoded.header.with_format(format);
        let Ok(reencoded) = ppm::encode_to_vec(&header, decoded.pixels()) else {
            panic!("decoded image failed to encode as {format:?}");
        };
        let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
            panic!("re-encoded {format:?} data failed to decode");
        };

        assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
        assert_eq!(decoded2.header, header);
    }
});
