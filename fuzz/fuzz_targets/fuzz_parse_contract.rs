#![no_main]
use libfuzzer_sys::fuzz_target;
use api_qi::parsers::OpenApiParser;

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the contract parser.
///
/// Also wraps the input as a path item so that fuzzing reaches operation and
/// response parsing instead of stopping at a missing `paths` key.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parser = OpenApiParser::new();

        let _ = parser.parse_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"{{"paths":{{"/fuzz":{s}}}}}"#);
            let _ = parser.parse_str(&wrapped);
        }
    }
});
