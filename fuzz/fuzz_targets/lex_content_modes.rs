#![no_main]

use html5lex::{ContentMode, Policies};
use lex_test_support::run_with_modes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let modes = [
        ("script", ContentMode::ScriptData),
        ("style", ContentMode::Rawtext),
        ("textarea", ContentMode::Rcdata),
        ("title", ContentMode::Rcdata),
    ];
    let _ = run_with_modes(input, Policies::default(), usize::MAX, &modes);
    let _ = run_with_modes(input, Policies::default(), 3, &modes);
});
