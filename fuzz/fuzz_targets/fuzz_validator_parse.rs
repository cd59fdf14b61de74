#![no_main]

use envguard::{
    boolean, bytes, duration, email, host, json, num, port, string, uuid, RawEnv, Validator,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(raw) = std::str::from_utf8(data) {
        let source = RawEnv::new();

        // Every catalogue parser must return a value or a typed error,
        // never panic
        let _ = string().trim().lowercase().parse(Some(raw), "F", &source);
        let _ = num().parse(Some(raw), "F", &source);
        let _ = boolean().parse(Some(raw), "F", &source);
        let _ = email().parse(Some(raw), "F", &source);
        let _ = host().parse(Some(raw), "F", &source);
        let _ = port().parse(Some(raw), "F", &source);
        let _ = json().parse(Some(raw), "F", &source);
        let _ = uuid().parse(Some(raw), "F", &source);
        let _ = duration().parse(Some(raw), "F", &source);
        let _ = bytes().parse(Some(raw), "F", &source);
    }
});
