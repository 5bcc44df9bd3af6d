//! Chunk-split invariance: every input must tokenize identically no matter
//! where the driver cuts the chunks.

use html5lex::{ContentMode, Policies, ViolationPolicy};
use lex_test_support::{assert_chunk_invariant, run_chunked, run_whole};

const PLAIN_INPUTS: &[&str] = &[
    "plain text only",
    "<div id=\"x\" class='y z'>body</div>",
    "<br/><input type=checkbox checked>",
    "a &amp; b &notin; c &nope; d &noti e",
    "&#65;&#x41;&#x1F600;&#0;&#x80;",
    "<a href=\"?a=1&amp=2&amp;3&ampz\">t</a>",
    "<!-- a comment -- with a double hyphen -->",
    "<!-->",
    "<!DOCTYPE html>",
    "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" \"http://x/dtd\">",
    "<?php echo ?>",
    "</>garbage</ x>",
    "line one\r\nline two\rline three\nline four",
    "a\u{0}b<di\u{0}v>",
    "<div a=b c d='e'f>",
];

#[test]
fn plain_inputs_are_split_invariant() {
    for input in PLAIN_INPUTS {
        assert_chunk_invariant(input, Policies::default(), &[]);
    }
}

#[test]
fn content_modes_are_split_invariant() {
    let modes: &[(&str, ContentMode)] = &[
        ("script", ContentMode::ScriptData),
        ("style", ContentMode::Rawtext),
        ("textarea", ContentMode::Rcdata),
    ];
    let inputs = [
        "<script>if (a < b && c) { d(); }</script>after",
        "<script><!-- escaped </scr --></script>x",
        "<script><!--<script>inner</script>--></script>y",
        "<style>a { content: \"</sty\" }</style>z",
        "<textarea>&lt;still &amp; text</textarea>tail",
        "<script></scriptx></script>done",
    ];
    for input in inputs {
        assert_chunk_invariant(input, Policies::default(), modes);
    }
}

#[test]
fn altering_policies_are_split_invariant() {
    let policies = Policies {
        comment: ViolationPolicy::Alter,
        content_space: ViolationPolicy::Alter,
        ..Policies::default()
    };
    let inputs = [
        "<!--a--b--!>c",
        "a\u{C}b&#xC;c",
        "<!bogus -- comment>",
    ];
    for input in inputs {
        assert_chunk_invariant(input, policies, &[]);
    }
}

#[test]
fn violations_are_split_invariant() {
    // The reported codes, not just the tokens, must be independent of
    // chunking.
    let input = "<div a=1 a=2>&nope;&#xD800;<!--x--y-->";
    let whole = run_whole(input, Policies::default()).unwrap();
    for chunk_len in 1..input.len() {
        let chunked = run_chunked(input, Policies::default(), chunk_len).unwrap();
        assert_eq!(
            whole.violations, chunked.violations,
            "violation mismatch at chunk_len {chunk_len}"
        );
    }
}

#[test]
fn carriage_returns_at_chunk_edges() {
    // CR at a chunk boundary must still swallow a following LF.
    for input in ["a\r\nb", "a\r\rb", "\r\n\r\n", "x\r"] {
        assert_chunk_invariant(input, Policies::default(), &[]);
    }
}
