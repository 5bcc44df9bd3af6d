#![no_main]

use html5lex::Policies;
use lex_test_support::{diff_lines, run_chunked, run_whole};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the chunk length, the rest is the document.
    let Some((&len_byte, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let chunk_len = usize::from(len_byte) + 1;
    let whole = run_whole(input, Policies::default());
    let chunked = run_chunked(input, Policies::default(), chunk_len);
    match (whole, chunked) {
        (Ok(whole), Ok(chunked)) => {
            if let Some(diff) = diff_lines(&whole.lines, &chunked.lines) {
                panic!("chunk_len {chunk_len} diverged: {diff}");
            }
            assert_eq!(
                whole.violations, chunked.violations,
                "violations diverged at chunk_len {chunk_len}"
            );
        }
        (Err(whole), Err(chunked)) => assert_eq!(whole, chunked),
        (Ok(_), Err(e)) => panic!("only the chunked run failed at chunk_len {chunk_len}: {e}"),
        (Err(e), Ok(_)) => panic!("only the whole run failed at chunk_len {chunk_len}: {e}"),
    }
});
