#![no_main]

use html5lex::{Policies, ViolationPolicy};
use lex_test_support::run_whole;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // Every policy combination must either tokenize or fail with a
    // FatalViolation; panics and aborts are bugs.
    for comment in [
        ViolationPolicy::Allow,
        ViolationPolicy::Alter,
        ViolationPolicy::Fatal,
    ] {
        let policies = Policies {
            comment,
            ..Policies::default()
        };
        let _ = run_whole(input, policies);
    }
});
