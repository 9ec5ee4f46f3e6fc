//! If we panic!, we lose.
//!
//! ```not_rust
//! cargo +nightly fuzz run decode
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use teleinfo_codec::{Decoder, MeterSnapshot, Status};

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new();
    let mut committed = MeterSnapshot::new();

    for &byte in data {
        match decoder.step(byte) {
            Ok(Status::Complete) => committed = decoder.snapshot().clone(),
            Ok(Status::Incomplete) | Err(_) => assert_eq!(decoder.snapshot(), &committed),
        }
    }

    let mut chunked = Decoder::new();
    let mut src = data;

    while !src.is_empty() {
        let (consumed, _) = chunked.decode(src);

        assert!(consumed > 0 && consumed <= src.len());

        src = &src[consumed..];
    }

    assert_eq!(chunked.snapshot(), decoder.snapshot());
});
