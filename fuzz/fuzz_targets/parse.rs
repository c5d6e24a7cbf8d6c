#![no_main]
use libfuzzer_sys::fuzz_target;

use cet::{format_local_time, Instant};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(instant) = Instant::parse(s) {
            let _ = format_local_time(&instant.to_string());
        }
    }
});
