#![no_main]

use envguard::{
    array, boolean, num, port, string, RawEnv, ResolveOptions, Resolver, Schema, Validator,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Interpret the input as newline-separated KEY=VALUE pairs
    if let Ok(text) = std::str::from_utf8(data) {
        let mut source = RawEnv::new();
        for line in text.lines().take(64) {
            if let Some((key, value)) = line.split_once('=') {
                source.insert(key, value);
            }
        }

        let schema = Schema::new()
            .field("PORT", port().default(8080))
            .field("HOST", string().default("localhost"))
            .field("DEBUG", boolean().default(false))
            .field("RETRIES", num().integer().min(0.0).warn_only().default(3))
            .field("TAGS", array().unique());

        let options = ResolveOptions {
            strict: true,
            ..Default::default()
        };

        // The pass must account for every field without panicking
        let _ = Resolver::new().resolve(&schema, &source, &options);
    }
});
