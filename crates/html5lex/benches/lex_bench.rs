use criterion::{black_box, criterion_group, criterion_main, Criterion};
use html5lex::{
    AttributeList, ContentMode, Host, NameHandle, NameTable, NullReporter, Policies, SinkResponse,
    TokenSink, Tokenizer,
};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

/// Sink that only counts callbacks, so the bench measures the tokenizer and
/// not token storage.
struct CountingSink {
    tokens: usize,
    script: Option<NameHandle>,
}

impl TokenSink for CountingSink {
    fn start_tag(&mut self, name: NameHandle, _: &AttributeList, _: bool) -> SinkResponse {
        self.tokens += 1;
        if Some(name) == self.script {
            SinkResponse::switch_to(ContentMode::ScriptData, Some(name))
        } else {
            SinkResponse::proceed()
        }
    }

    fn end_tag(&mut self, _: NameHandle) -> SinkResponse {
        self.tokens += 1;
        SinkResponse::proceed()
    }

    fn characters(&mut self, _: &[u16]) -> SinkResponse {
        self.tokens += 1;
        SinkResponse::proceed()
    }

    fn comment(&mut self, _: &[u16]) -> SinkResponse {
        self.tokens += 1;
        SinkResponse::proceed()
    }

    fn doctype(
        &mut self,
        _: Option<NameHandle>,
        _: Option<&[u16]>,
        _: Option<&[u16]>,
        _: bool,
    ) -> SinkResponse {
        self.tokens += 1;
        SinkResponse::proceed()
    }

    fn eof(&mut self) {}
}

fn make_blocks(blocks: usize) -> Vec<u16> {
    let mut body = String::with_capacity(blocks * 56);
    for _ in 0..blocks {
        body.push_str("<div class=box><span>hello</span><img src=x></div>");
    }
    body.encode_utf16().collect()
}

fn make_entity_heavy(blocks: usize) -> Vec<u16> {
    let mut body = String::with_capacity(blocks * 48);
    for _ in 0..blocks {
        body.push_str("a &amp; b &notin; c &#x2603; d &nosuch; e\n");
    }
    body.encode_utf16().collect()
}

fn make_script_adversarial(units: usize) -> Vec<u16> {
    // Almost-matching end tags keep the non-data end-tag matcher busy.
    let mut body = String::with_capacity(units + 32);
    body.push_str("<script>");
    while body.len() < units {
        body.push_str("</scri<pt");
    }
    body.push_str("</script>");
    body.encode_utf16().collect()
}

fn tokenize_all(units: &[u16], chunk_len: usize) -> usize {
    let mut sink = CountingSink {
        tokens: 0,
        script: None,
    };
    let mut names = NameTable::new();
    sink.script = Some(names.intern_str("script"));
    let mut reporter = NullReporter;
    let mut tokenizer = Tokenizer::new(Policies::default());
    for chunk in units.chunks(chunk_len.min(units.len().max(1)).max(1)) {
        let mut rest = chunk;
        loop {
            let mut host = Host {
                sink: &mut sink,
                names: &mut names,
                reporter: &mut reporter,
            };
            let consumed = tokenizer
                .tokenize_chunk(rest, &mut host)
                .unwrap_or_else(|e| panic!("fatal violation in bench input: {e}"));
            if consumed >= rest.len() {
                break;
            }
            rest = &rest[consumed..];
        }
    }
    let mut host = Host {
        sink: &mut sink,
        names: &mut names,
        reporter: &mut reporter,
    };
    tokenizer
        .end_of_input(&mut host)
        .unwrap_or_else(|e| panic!("fatal violation in bench input: {e}"));
    sink.tokens
}

fn bench_markup_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("lex_markup_small", |b| {
        b.iter(|| black_box(tokenize_all(black_box(&input), usize::MAX)));
    });
}

fn bench_markup_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("lex_markup_large", |b| {
        b.iter(|| black_box(tokenize_all(black_box(&input), usize::MAX)));
    });
}

fn bench_markup_chunked(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("lex_markup_chunked_64", |b| {
        b.iter(|| black_box(tokenize_all(black_box(&input), 64)));
    });
}

fn bench_entities(c: &mut Criterion) {
    let input = make_entity_heavy(LARGE_BLOCKS / 4);
    c.bench_function("lex_entity_heavy", |b| {
        b.iter(|| black_box(tokenize_all(black_box(&input), usize::MAX)));
    });
}

fn bench_script_adversarial(c: &mut Criterion) {
    let input = make_script_adversarial(512 * 1024);
    c.bench_function("lex_script_adversarial", |b| {
        b.iter(|| black_box(tokenize_all(black_box(&input), usize::MAX)));
    });
}

criterion_group!(
    benches,
    bench_markup_small,
    bench_markup_large,
    bench_markup_chunked,
    bench_entities,
    bench_script_adversarial
);
criterion_main!(benches);
