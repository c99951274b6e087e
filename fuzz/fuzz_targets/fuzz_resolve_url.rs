#![no_main]
use libfuzzer_sys::fuzz_target;
use api_qi::audit::{resolve_url, AuditRules};

/// Fuzz placeholder substitution on arbitrary path templates.
fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let url = resolve_url("http://fuzz", path, &AuditRules::default());
        assert!(url.starts_with("http://fuzz"));
    }
});
